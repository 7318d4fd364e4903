// src/core/fs_ops.rs
//! Filesystem access for resume selection

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::app_log;
use crate::types::ResumeFile;

pub struct FsOps;

impl FsOps {
    /// Case-insensitive `.pdf` suffix check
    pub fn is_pdf_name(file_name: &str) -> bool {
        file_name.to_lowercase().ends_with(".pdf")
    }

    /// True when `path` exists and can be listed
    pub async fn is_readable_dir(path: &Path) -> bool {
        match fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => fs::read_dir(path).await.is_ok(),
            _ => false,
        }
    }

    /// Read every PDF directly inside `dir`, sorted by file name.
    ///
    /// Subdirectories and non-PDF files are skipped.
    pub async fn collect_pdf_files(dir: &Path) -> Result<Vec<ResumeFile>> {
        let mut entries = fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        let mut resumes = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().into_owned();

            if !Self::is_pdf_name(&file_name) {
                app_log!(trace, "Skipping non-PDF entry: {}", file_name);
                continue;
            }

            // metadata() follows symlinks, matching what a file picker would show
            let is_file = fs::metadata(&path)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }

            let content = fs::read(&path)
                .await
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            resumes.push(ResumeFile::new(file_name, content));
        }

        resumes.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        app_log!(
            info,
            "Found {} PDF files in {}",
            resumes.len(),
            dir.display()
        );
        Ok(resumes)
    }

    /// Read a single resume, keeping only its file name for the upload.
    pub async fn read_resume(path: &Path) -> Result<ResumeFile> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();

        let content = fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(ResumeFile::new(file_name, content))
    }

    pub async fn read_text(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }
}
