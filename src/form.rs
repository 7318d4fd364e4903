// src/form.rs
//! Submission forms: field state, validation and the submit flow

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Instrument;

use crate::core::config_manager::DEFAULT_THRESHOLD;
use crate::core::{Evaluator, FsOps};
use crate::types::{BatchEvaluation, ResumeBatch, ResumeFile, SingleEvaluation, SingleSubmission};
use crate::{app_log, app_span};

pub const MAX_THRESHOLD: u8 = 100;

/// Validation failures. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Failed to select directory. Make sure the path exists and is a directory.")]
    DirectoryUnavailable,
    #[error("Please select a directory containing resumes first")]
    MissingDirectory,
    #[error("Please select a PDF resume first")]
    MissingResume,
    #[error("Only PDF resumes are supported: {0}")]
    NotPdf(String),
    #[error("Please enter a job description")]
    MissingJobDescription,
    #[error("Threshold must be a whole number between 0 and {max}", max = MAX_THRESHOLD)]
    InvalidThreshold,
    #[error("No PDF files found in the selected directory")]
    NoPdfFiles,
    #[error("Resumes are already being processed")]
    Busy,
}

/// Outcome of asking the user for a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySelection {
    Selected(PathBuf),
    Cancelled,
    Rejected,
}

pub fn parse_threshold(input: &str) -> Result<u8, FormError> {
    match input.trim().parse::<u8>() {
        Ok(value) if value <= MAX_THRESHOLD => Ok(value),
        _ => Err(FormError::InvalidThreshold),
    }
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Keep only PDFs and package them with the text fields.
pub fn assemble_batch(
    files: Vec<ResumeFile>,
    job_description: &str,
    threshold: u8,
) -> Result<ResumeBatch, FormError> {
    if is_blank(job_description) {
        return Err(FormError::MissingJobDescription);
    }
    if threshold > MAX_THRESHOLD {
        return Err(FormError::InvalidThreshold);
    }

    let files: Vec<ResumeFile> = files
        .into_iter()
        .filter(|file| FsOps::is_pdf_name(&file.file_name))
        .collect();
    if files.is_empty() {
        return Err(FormError::NoPdfFiles);
    }

    Ok(ResumeBatch {
        files,
        job_description: job_description.to_string(),
        threshold,
    })
}

pub fn processing_failed(err: impl std::fmt::Display) -> String {
    format!("Processing failed: {}", err)
}

/// State behind the batch page: one directory, one job description, one
/// threshold, and at most one submission in flight.
#[derive(Debug, Clone)]
pub struct BatchForm {
    directory: Option<PathBuf>,
    job_description: String,
    threshold: u8,
    processing: bool,
    error: Option<String>,
    results: Option<BatchEvaluation>,
}

impl Default for BatchForm {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl BatchForm {
    pub fn new(threshold: u8) -> Self {
        Self {
            directory: None,
            job_description: String::new(),
            threshold: threshold.min(MAX_THRESHOLD),
            processing: false,
            error: None,
            results: None,
        }
    }

    /// Apply the answer to a directory prompt. A missing or empty answer is a
    /// cancellation and leaves the form untouched.
    pub async fn select_directory(&mut self, answer: Option<&str>) -> DirectorySelection {
        let Some(raw) = answer.map(str::trim).filter(|a| !a.is_empty()) else {
            app_log!(debug, "Directory selection cancelled");
            return DirectorySelection::Cancelled;
        };

        let path = PathBuf::from(raw);
        if FsOps::is_readable_dir(&path).await {
            self.directory = Some(path.clone());
            self.error = None;
            DirectorySelection::Selected(path)
        } else {
            app_log!(warn, "Rejected directory selection: {}", path.display());
            self.error = Some(FormError::DirectoryUnavailable.to_string());
            DirectorySelection::Rejected
        }
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn set_threshold(&mut self, input: &str) -> Result<u8, FormError> {
        let value = parse_threshold(input)?;
        self.threshold = value;
        Ok(value)
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Final path component of the selected directory.
    pub fn directory_name(&self) -> Option<String> {
        self.directory.as_ref().map(|dir| {
            dir.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.display().to_string())
        })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results(&self) -> Option<&BatchEvaluation> {
        self.results.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn can_submit(&self) -> bool {
        self.directory.is_some() && !is_blank(&self.job_description) && !self.processing
    }

    /// Check the fields, returning the directory to scan.
    pub fn validate(&self) -> Result<PathBuf, FormError> {
        if self.processing {
            return Err(FormError::Busy);
        }
        let directory = self.directory.clone().ok_or(FormError::MissingDirectory)?;
        if is_blank(&self.job_description) {
            return Err(FormError::MissingJobDescription);
        }
        Ok(directory)
    }

    /// Scan the directory, send the batch and keep the outcome on the form.
    ///
    /// Validation errors are reported as-is; anything after that is prefixed
    /// with `Processing failed:`.
    pub async fn submit(&mut self, evaluator: &dyn Evaluator) -> Result<&BatchEvaluation, String> {
        let directory = match self.validate() {
            Ok(dir) => dir,
            Err(e) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                return Err(message);
            }
        };

        self.processing = true;
        self.error = None;

        let submission_id = uuid::Uuid::new_v4();
        let span = app_span!("batch_submission", submission_id = %submission_id, directory = %directory.display());
        let outcome = self
            .run(&directory, evaluator)
            .instrument(span)
            .await;

        self.processing = false;
        match outcome {
            Ok(evaluation) => Ok(self.results.insert(evaluation)),
            Err(message) => {
                app_log!(error, "Batch {} failed: {}", submission_id, message);
                let message = processing_failed(message);
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    async fn run(&self, directory: &Path, evaluator: &dyn Evaluator) -> Result<BatchEvaluation, String> {
        let files = FsOps::collect_pdf_files(directory)
            .await
            .map_err(|e| format!("{:#}", e))?;
        let batch = assemble_batch(files, &self.job_description, self.threshold)
            .map_err(|e| e.to_string())?;

        evaluator
            .evaluate_multiple(batch)
            .await
            .map_err(|e| format!("{:#}", e))
    }

    /// Drop the results and go back to the form, keeping the fields.
    pub fn reset(&mut self) {
        self.results = None;
    }
}

/// State behind the single-resume page.
#[derive(Debug, Clone, Default)]
pub struct SingleForm {
    resume: Option<PathBuf>,
    job_description: String,
    error: Option<String>,
    result: Option<SingleEvaluation>,
}

impl SingleForm {
    pub fn set_resume(&mut self, path: impl Into<PathBuf>) {
        self.resume = Some(path.into());
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&SingleEvaluation> {
        self.result.as_ref()
    }

    pub fn validate(&self) -> Result<PathBuf, FormError> {
        let resume = self.resume.clone().ok_or(FormError::MissingResume)?;
        let file_name = resume
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !FsOps::is_pdf_name(&file_name) {
            return Err(FormError::NotPdf(file_name));
        }
        if is_blank(&self.job_description) {
            return Err(FormError::MissingJobDescription);
        }
        Ok(resume)
    }

    pub async fn submit(&mut self, evaluator: &dyn Evaluator) -> Result<&SingleEvaluation, String> {
        let resume = match self.validate() {
            Ok(path) => path,
            Err(e) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                return Err(message);
            }
        };
        self.error = None;

        let outcome = match FsOps::read_resume(&resume).await {
            Ok(file) => {
                evaluator
                    .evaluate_single(SingleSubmission {
                        file,
                        job_description: self.job_description.clone(),
                    })
                    .await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(evaluation) => Ok(self.result.insert(evaluation)),
            Err(e) => {
                let message = processing_failed(format!("{:#}", e));
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}
