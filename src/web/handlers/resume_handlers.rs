// src/web/handlers/resume_handlers.rs
//! Batch and single-resume page handlers

use anyhow::{Context, Result};
use askama::Template;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;
use tokio::io::AsyncReadExt;
use tracing::Instrument;

use crate::core::FsOps;
use crate::form::{assemble_batch, is_blank, parse_threshold, processing_failed, FormError};
use crate::render::html::{BatchFormPage, BatchResultsPage, SinglePage};
use crate::types::{ResumeFile, SingleSubmission};
use crate::web::types::{BatchUploadForm, SingleUploadForm, WebState};
use crate::{app_log, app_span};

pub type HtmlResponse = (Status, RawHtml<String>);

/// Render a page template, answering 500 when the template fails.
pub fn render_page(status: Status, page: &impl Template) -> HtmlResponse {
    match page.render() {
        Ok(body) => (status, RawHtml(body)),
        Err(e) => {
            app_log!(error, "Failed to render page: {}", e);
            (
                Status::InternalServerError,
                RawHtml("Failed to render page".to_string()),
            )
        }
    }
}

/// Unsanitized upload name split into its last path segment and whether it
/// sat below the chosen directory's top level.
pub fn upload_file_name(raw: &str) -> (String, bool) {
    let segments: Vec<&str> = raw
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .collect();
    let name = segments.last().copied().unwrap_or_default().to_string();
    (name, segments.len() > 2)
}

async fn read_upload(file: &TempFile<'_>) -> Result<Vec<u8>> {
    let reader = file.open().await.context("Failed to open uploaded file")?;
    tokio::pin!(reader);

    let mut content = Vec::with_capacity(file.len() as usize);
    reader
        .read_to_end(&mut content)
        .await
        .context("Failed to read uploaded file")?;
    Ok(content)
}

/// Read the top-level PDFs of a directory upload, skipping everything else.
async fn collect_uploaded_pdfs(files: &[TempFile<'_>]) -> Result<Vec<ResumeFile>> {
    let mut resumes = Vec::new();
    for file in files {
        let Some(raw) = file.raw_name() else {
            continue;
        };
        let (name, nested) = upload_file_name(raw.dangerous_unsafe_unsanitized_raw().as_str());
        if nested || !FsOps::is_pdf_name(&name) {
            app_log!(trace, "Skipping uploaded entry: {}", name);
            continue;
        }

        let content = read_upload(file)
            .await
            .with_context(|| format!("Failed to read {}", name))?;
        resumes.push(ResumeFile::new(name, content));
    }
    Ok(resumes)
}

pub fn batch_form_handler(state: &State<WebState>) -> HtmlResponse {
    render_page(
        Status::Ok,
        &BatchFormPage {
            job_description: "",
            threshold: state.default_threshold,
            error: None,
        },
    )
}

pub async fn process_batch_handler(
    upload: Form<BatchUploadForm<'_>>,
    state: &State<WebState>,
) -> HtmlResponse {
    let submission_id = uuid::Uuid::new_v4();
    let span = app_span!("web_batch_submission", submission_id = %submission_id);

    async move {
        let job_description = upload.job_description.as_str();
        let form_error = |threshold: u8, message: &str, status: Status| {
            render_page(
                status,
                &BatchFormPage {
                    job_description,
                    threshold,
                    error: Some(message),
                },
            )
        };

        let threshold = match parse_threshold(&upload.threshold) {
            Ok(value) => value,
            Err(e) => {
                return form_error(state.default_threshold, &e.to_string(), Status::BadRequest)
            }
        };

        if upload.pdf_files.is_empty() {
            let message = FormError::MissingDirectory.to_string();
            return form_error(threshold, &message, Status::BadRequest);
        }
        if is_blank(job_description) {
            let message = FormError::MissingJobDescription.to_string();
            return form_error(threshold, &message, Status::BadRequest);
        }

        let files = match collect_uploaded_pdfs(&upload.pdf_files).await {
            Ok(files) => files,
            Err(e) => {
                app_log!(error, "Failed to read uploaded resumes: {:#}", e);
                let message = processing_failed(format!("{:#}", e));
                return form_error(threshold, &message, Status::InternalServerError);
            }
        };

        let batch = match assemble_batch(files, job_description, threshold) {
            Ok(batch) => batch,
            Err(e) => {
                let message = processing_failed(e);
                return form_error(threshold, &message, Status::BadRequest);
            }
        };

        app_log!(info, "Forwarding {} uploaded resumes", batch.files.len());
        match state.evaluator.evaluate_multiple(batch).await {
            Ok(results) => render_page(Status::Ok, &BatchResultsPage::new(&results, threshold)),
            Err(e) => {
                app_log!(error, "Batch evaluation failed: {:#}", e);
                let message = processing_failed(format!("{:#}", e));
                form_error(threshold, &message, Status::BadGateway)
            }
        }
    }
    .instrument(span)
    .await
}

pub fn single_form_handler() -> HtmlResponse {
    render_page(Status::Ok, &SinglePage::default())
}

pub async fn process_single_handler(upload: Form<SingleUploadForm<'_>>, state: &State<WebState>) -> HtmlResponse {
    let job_description = upload.job_description.as_str();
    let form_error = |message: String, status: Status| {
        render_page(
            status,
            &SinglePage {
                job_description,
                error: Some(message.as_str()),
                result: None,
            },
        )
    };

    let raw_name = upload
        .pdf_file
        .raw_name()
        .map(|n| n.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .unwrap_or_default();
    let (name, _) = upload_file_name(&raw_name);

    if name.is_empty() {
        return form_error(FormError::MissingResume.to_string(), Status::BadRequest);
    }
    if !FsOps::is_pdf_name(&name) {
        return form_error(FormError::NotPdf(name).to_string(), Status::BadRequest);
    }
    if is_blank(job_description) {
        return form_error(FormError::MissingJobDescription.to_string(), Status::BadRequest);
    }

    let content = match read_upload(&upload.pdf_file).await {
        Ok(content) => content,
        Err(e) => {
            return form_error(processing_failed(format!("{:#}", e)), Status::InternalServerError)
        }
    };

    let submission = SingleSubmission {
        file: ResumeFile::new(name, content),
        job_description: job_description.to_string(),
    };
    match state.evaluator.evaluate_single(submission).await {
        Ok(result) => render_page(
            Status::Ok,
            &SinglePage {
                job_description,
                error: None,
                result: Some(&result),
            },
        ),
        Err(e) => {
            app_log!(error, "Single evaluation failed: {:#}", e);
            form_error(processing_failed(format!("{:#}", e)), Status::BadGateway)
        }
    }
}
