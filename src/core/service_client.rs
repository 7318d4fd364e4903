// src/core/service_client.rs
//! HTTP client for the evaluation backend

use anyhow::{Context, Result};
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::app_log;
use crate::core::config_manager::ServiceConfig;
use crate::types::{BatchEvaluation, ResumeBatch, SingleEvaluation, SingleSubmission};

pub const EVALUATE_MULTIPLE_ENDPOINT: &str = "/api/evaluate-multiple";
pub const EVALUATE_ENDPOINT: &str = "/api/evaluate";

/// Anything that can score resumes against a job description.
#[rocket::async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate_multiple(&self, batch: ResumeBatch) -> Result<BatchEvaluation>;

    async fn evaluate_single(&self, submission: SingleSubmission) -> Result<SingleEvaluation>;
}

pub struct EvaluationClient {
    client: reqwest::Client,
    base_url: String,
}

impl EvaluationClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout_seconds)
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// POST a multipart body and decode the JSON reply.
    ///
    /// Non-2xx replies fail with `Error: <status code>`.
    async fn post_multipart<R>(&self, endpoint: &str, form: Form) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint);
        app_log!(info, "Calling evaluation service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            app_log!(error, "Evaluation service error response: {}", error_text);
            anyhow::bail!("Error: {}", status.as_u16());
        }

        let response_text = response
            .text()
            .await
            .context("Failed to read response text")?;
        app_log!(debug, "Raw evaluation response: {}", response_text);

        serde_json::from_str(&response_text).with_context(|| {
            format!(
                "Failed to parse evaluation response. Raw response: {}",
                response_text
            )
        })
    }
}

#[rocket::async_trait]
impl Evaluator for EvaluationClient {
    async fn evaluate_multiple(&self, batch: ResumeBatch) -> Result<BatchEvaluation> {
        app_log!(
            info,
            "Submitting {} resumes with threshold {}",
            batch.files.len(),
            batch.threshold
        );

        let evaluation: BatchEvaluation = self
            .post_multipart(EVALUATE_MULTIPLE_ENDPOINT, batch.into_form()?)
            .await?;
        evaluation.validate()?;

        app_log!(
            info,
            "{} of {} resumes qualified",
            evaluation.qualifying.len(),
            evaluation.total
        );
        Ok(evaluation)
    }

    async fn evaluate_single(&self, submission: SingleSubmission) -> Result<SingleEvaluation> {
        app_log!(info, "Submitting resume {}", submission.file.file_name);

        let evaluation: SingleEvaluation = self
            .post_multipart(EVALUATE_ENDPOINT, submission.into_form()?)
            .await?;
        evaluation.validate()?;
        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResumeFile;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Accept one connection, answer with `status_line` and `body`, and hand
    /// back the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}", addr), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            if headers.contains("transfer-encoding: chunked") {
                if buf.ends_with(b"0\r\n\r\n") {
                    break;
                }
                continue;
            }
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn sample_batch() -> ResumeBatch {
        ResumeBatch {
            files: vec![
                ResumeFile::new("ada.pdf", b"%PDF-ada".to_vec()),
                ResumeFile::new("grace.pdf", b"%PDF-grace".to_vec()),
            ],
            job_description: "Senior Rust engineer".to_string(),
            threshold: 70,
        }
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let client = EvaluationClient::new("http://backend:3000/", 5).unwrap();
        assert_eq!(
            client.endpoint_url(EVALUATE_MULTIPLE_ENDPOINT),
            "http://backend:3000/api/evaluate-multiple"
        );
    }

    #[tokio::test]
    async fn test_evaluate_multiple_sends_contract_fields() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"total":2,"qualifying":[{"name":"Ada","email":"ada@example.com","score":88}]}"#,
        )
        .await;
        let client = EvaluationClient::new(&url, 5).unwrap();

        let result = client.evaluate_multiple(sample_batch()).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.qualifying.len(), 1);
        assert_eq!(result.qualifying[0].score, 88);

        assert!(request.starts_with("POST /api/evaluate-multiple "));
        assert!(request.contains(r#"name="pdfFiles"; filename="ada.pdf""#));
        assert!(request.contains(r#"name="pdfFiles"; filename="grace.pdf""#));
        assert!(request.contains(r#"name="jobDescription""#));
        assert!(request.contains("Senior Rust engineer"));
        assert!(request.contains(r#"name="threshold""#));
        assert!(request.contains("application/pdf"));

        let fields: Vec<&str> = request
            .split("form-data; name=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        assert_eq!(
            fields,
            vec!["pdfFiles", "pdfFiles", "jobDescription", "threshold"]
        );
    }

    #[tokio::test]
    async fn test_non_success_status_reports_code() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let client = EvaluationClient::new(&url, 5).unwrap();

        let err = client.evaluate_multiple(sample_batch()).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.to_string(), "Error: 500");
    }

    #[tokio::test]
    async fn test_inconsistent_response_is_rejected() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"total":0,"qualifying":[{"name":"Ada","email":"ada@example.com","score":88}]}"#,
        )
        .await;
        let client = EvaluationClient::new(&url, 5).unwrap();

        assert!(client.evaluate_multiple(sample_batch()).await.is_err());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let (url, server) = serve_once("200 OK", "not json").await;
        let client = EvaluationClient::new(&url, 5).unwrap();

        let err = client.evaluate_multiple(sample_batch()).await.unwrap_err();
        server.await.unwrap();

        assert!(err.to_string().contains("Failed to parse evaluation response"));
    }

    #[tokio::test]
    async fn test_evaluate_single() {
        let (url, server) = serve_once("200 OK", r#"{"score":73,"analysis":"Strong systems background"}"#).await;
        let client = EvaluationClient::new(&url, 5).unwrap();

        let result = client
            .evaluate_single(SingleSubmission {
                file: ResumeFile::new("ada.pdf", b"%PDF".to_vec()),
                job_description: "Rust".to_string(),
            })
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(result.score, 73);
        assert_eq!(result.analysis.as_deref(), Some("Strong systems background"));
        assert!(request.starts_with("POST /api/evaluate "));
        assert!(request.contains(r#"name="pdfFile"; filename="ada.pdf""#));
    }
}
