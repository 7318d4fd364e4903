// src/render/terminal.rs
//! Plain-text, JSON and CSV output for the command line

use anyhow::{Context, Result};

use super::{empty_state, results_heading, results_summary, total_processed, OutputFormat};
use crate::types::{BatchEvaluation, Candidate, SingleEvaluation};

const BAR_WIDTH: usize = 10;
const HEADERS: [&str; 3] = ["Name", "Email", "Match Score"];

/// `███████░░░ 70%`
pub fn score_bar(score: u32) -> String {
    let score = score.min(100) as usize;
    let filled = (score * BAR_WIDTH + 50) / 100;
    format!(
        "{}{} {}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        score
    )
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// One line per qualifying candidate under a header and a rule.
pub fn candidate_table(candidates: &[Candidate]) -> String {
    let rows: Vec<[String; 3]> = candidates
        .iter()
        .map(|c| [c.name.clone(), c.email.clone(), score_bar(c.score)])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 3]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(HEADERS)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(format_row([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    lines.join("\n")
}

pub fn batch_report(results: &BatchEvaluation, threshold: u8) -> String {
    let mut out = vec![results_heading(threshold), String::new()];

    if results.is_empty() {
        out.push(empty_state(threshold));
        out.push(total_processed(results));
    } else {
        out.push(results_summary(results));
        out.push(String::new());
        out.push(candidate_table(&results.qualifying));
    }

    out.join("\n")
}

pub fn candidates_csv(candidates: &[Candidate]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if candidates.is_empty() {
        writer.write_record(["name", "email", "score"])?;
    }
    for candidate in candidates {
        writer
            .serialize(candidate)
            .context("Failed to write CSV record")?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

pub fn render_batch(results: &BatchEvaluation, threshold: u8, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(batch_report(results, threshold)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(results).context("Failed to serialize results")
        }
        OutputFormat::Csv => candidates_csv(&results.qualifying),
    }
}

pub fn single_report(result: &SingleEvaluation) -> String {
    let mut out = vec![format!("Match Score: {}", score_bar(result.score))];
    if let Some(name) = &result.name {
        out.push(format!("Name: {}", name));
    }
    if let Some(email) = &result.email {
        out.push(format!("Email: {}", email));
    }
    if let Some(analysis) = &result.analysis {
        out.push(String::new());
        out.push(analysis.clone());
    }
    out.join("\n")
}

pub fn render_single(result: &SingleEvaluation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(single_report(result)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to serialize result")
        }
        OutputFormat::Csv => {
            let score = result.score.to_string();
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["name", "email", "score"])?;
            writer.write_record([
                result.name.as_deref().unwrap_or_default(),
                result.email.as_deref().unwrap_or_default(),
                score.as_str(),
            ])?;
            let bytes = writer.into_inner().context("Failed to flush CSV output")?;
            String::from_utf8(bytes).context("CSV output is not valid UTF-8")
        }
    }
}
