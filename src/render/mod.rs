// src/render/mod.rs
//! Result presentation shared by the terminal and the web pages

pub mod html;
pub mod terminal;

use crate::types::BatchEvaluation;

/// How `batch` and `single` print their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub fn results_heading(threshold: u8) -> String {
    format!("Candidates Above {}% Match Score", threshold)
}

/// "Found 1 candidate ... that matches" / "Found 2 candidates ... that match"
pub fn results_summary(results: &BatchEvaluation) -> String {
    let count = results.qualifying.len();
    let (noun_suffix, verb_suffix) = if count != 1 { ("s", "") } else { ("", "es") };
    format!(
        "Found {} candidate{} out of {} resumes that match{} your criteria.",
        count, noun_suffix, results.total, verb_suffix
    )
}

pub fn empty_state(threshold: u8) -> String {
    format!("No candidates met the {}% threshold.", threshold)
}

pub fn total_processed(results: &BatchEvaluation) -> String {
    format!("Total resumes processed: {}", results.total)
}
