// src/web/types.rs

use rocket::form::FromForm;
use rocket::fs::TempFile;
use std::sync::Arc;

use crate::core::Evaluator;

/// Shared, read-only state handed to every route.
pub struct WebState {
    pub evaluator: Arc<dyn Evaluator>,
    pub default_threshold: u8,
}

/// Browser upload from the batch page. A directory picker sends one
/// `pdfFiles` part per file, named `<dir>/<file>`.
#[derive(FromForm)]
pub struct BatchUploadForm<'r> {
    #[field(name = "pdfFiles")]
    pub pdf_files: Vec<TempFile<'r>>,
    #[field(name = "jobDescription")]
    pub job_description: String,
    pub threshold: String,
}

#[derive(FromForm)]
pub struct SingleUploadForm<'r> {
    #[field(name = "pdfFile")]
    pub pdf_file: TempFile<'r>,
    #[field(name = "jobDescription")]
    pub job_description: String,
}
