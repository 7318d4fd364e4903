// src/types/resume.rs
//! Request payloads sent to the evaluation backend

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};

pub const PDF_FILES_FIELD: &str = "pdfFiles";
pub const PDF_FILE_FIELD: &str = "pdfFile";
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
pub const THRESHOLD_FIELD: &str = "threshold";

const PDF_MIME: &str = "application/pdf";

/// A resume read into memory, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    fn into_part(self) -> Result<Part> {
        let file_name = self.file_name;
        Part::bytes(self.content)
            .file_name(file_name.clone())
            .mime_str(PDF_MIME)
            .with_context(|| format!("Failed to create multipart for {}", file_name))
    }
}

/// Everything `POST /api/evaluate-multiple` needs.
#[derive(Debug, Clone)]
pub struct ResumeBatch {
    pub files: Vec<ResumeFile>,
    pub job_description: String,
    pub threshold: u8,
}

impl ResumeBatch {
    pub fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for file in self.files {
            form = form.part(PDF_FILES_FIELD, file.into_part()?);
        }

        Ok(form
            .text(JOB_DESCRIPTION_FIELD, self.job_description)
            .text(THRESHOLD_FIELD, self.threshold.to_string()))
    }
}

/// Everything `POST /api/evaluate` needs.
#[derive(Debug, Clone)]
pub struct SingleSubmission {
    pub file: ResumeFile,
    pub job_description: String,
}

impl SingleSubmission {
    pub fn into_form(self) -> Result<Form> {
        Ok(Form::new()
            .part(PDF_FILE_FIELD, self.file.into_part()?)
            .text(JOB_DESCRIPTION_FIELD, self.job_description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_form_builds() {
        let batch = ResumeBatch {
            files: vec![
                ResumeFile::new("a.pdf", b"%PDF-a".to_vec()),
                ResumeFile::new("b.PDF", b"%PDF-b".to_vec()),
            ],
            job_description: "Rust engineer".to_string(),
            threshold: 70,
        };

        let form = batch.into_form().unwrap();
        assert!(!form.boundary().is_empty());
    }

    #[test]
    fn test_single_form_builds() {
        let submission = SingleSubmission {
            file: ResumeFile::new("cv.pdf", b"%PDF".to_vec()),
            job_description: "Rust engineer".to_string(),
        };
        let form = submission.into_form().unwrap();
        assert!(!form.boundary().is_empty());
    }
}
