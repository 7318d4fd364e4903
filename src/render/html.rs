// src/render/html.rs
//! Server-rendered pages for the web front end

use askama::Template;

use super::{empty_state, results_heading, results_summary, total_processed};
use crate::types::{BatchEvaluation, SingleEvaluation};

/// Batch upload form, prefilled when shown again after an error.
#[derive(Template, Debug, Default)]
#[template(path = "batch_form.html")]
pub struct BatchFormPage<'a> {
    pub job_description: &'a str,
    pub threshold: u8,
    pub error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "batch_results.html")]
pub struct BatchResultsPage<'a> {
    pub results: &'a BatchEvaluation,
    pub heading: String,
    pub summary: String,
    pub empty_state: String,
    pub total_processed: String,
}

impl<'a> BatchResultsPage<'a> {
    pub fn new(results: &'a BatchEvaluation, threshold: u8) -> Self {
        Self {
            results,
            heading: results_heading(threshold),
            summary: results_summary(results),
            empty_state: empty_state(threshold),
            total_processed: total_processed(results),
        }
    }
}

#[derive(Template, Default)]
#[template(path = "single.html")]
pub struct SinglePage<'a> {
    pub job_description: &'a str,
    pub error: Option<&'a str>,
    pub result: Option<&'a SingleEvaluation>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub code: u16,
    pub message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Candidate;

    fn candidates(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate {
                name: format!("Candidate {}", i),
                email: format!("c{}@example.com", i),
                score: 60 + i as u32,
            })
            .collect()
    }

    #[test]
    fn test_results_page_renders_one_row_per_candidate() {
        let results = BatchEvaluation {
            total: 9,
            qualifying: candidates(3),
        };
        let page = BatchResultsPage::new(&results, 60).render().unwrap();

        assert_eq!(page.matches("<tr class=\"candidate").count(), 3);
        assert_eq!(page.matches("<tr class=\"candidate alt\"").count(), 1);
        assert!(page.contains("Candidates Above 60% Match Score"));
        assert!(page.contains("Found 3 candidates out of 9 resumes that match your criteria."));
        assert!(page.contains("style=\"width: 62%\""));
        assert!(page.contains("Process New Batch"));
        assert!(!page.contains("No candidates met"));
    }

    #[test]
    fn test_results_page_empty_state() {
        let results = BatchEvaluation {
            total: 4,
            qualifying: vec![],
        };
        let page = BatchResultsPage::new(&results, 95).render().unwrap();

        assert!(page.contains("No candidates met the 95% threshold."));
        assert!(page.contains("Total resumes processed: 4"));
        assert!(!page.contains("<table>"));
    }

    #[test]
    fn test_backend_text_is_escaped() {
        let results = BatchEvaluation {
            total: 1,
            qualifying: vec![Candidate {
                name: "<b>Mallory</b>".to_string(),
                email: "m@example.com".to_string(),
                score: 99,
            }],
        };
        let page = BatchResultsPage::new(&results, 50).render().unwrap();

        assert!(page.contains("&lt;b&gt;Mallory&lt;/b&gt;"));
        assert!(!page.contains("<b>Mallory</b>"));
    }

    #[test]
    fn test_form_page_keeps_fields_and_error() {
        let page = BatchFormPage {
            job_description: "Rust & Go",
            threshold: 55,
            error: Some("Please enter a job description"),
        }
        .render()
        .unwrap();

        assert!(page.contains("value=\"55\""));
        assert!(page.contains(">Rust &amp; Go</textarea>"));
        assert!(page.contains("<p class=\"error\">Please enter a job description</p>"));
        assert!(page.contains("webkitdirectory"));
        assert!(page.contains("<a href=\"/multiple-resumes\" class=\"active\">"));
    }

    #[test]
    fn test_form_page_without_error() {
        let page = BatchFormPage::default().render().unwrap();

        assert!(!page.contains("class=\"error\""));
        assert!(page.contains("value=\"0\""));
    }

    #[test]
    fn test_single_page_with_result() {
        let result = SingleEvaluation {
            score: 81,
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            analysis: None,
        };
        let page = SinglePage {
            job_description: "Rust",
            error: None,
            result: Some(&result),
        }
        .render()
        .unwrap();

        assert!(page.contains("81%"));
        assert!(page.contains("<strong>Name:</strong> Ada"));
        assert!(!page.contains("class=\"analysis\""));
        assert!(!page.contains("class=\"error\""));
        assert!(page.contains("<a href=\"/single-resume\" class=\"active\">"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = ErrorPage {
            code: 404,
            message: "No \"such\" page <here>",
        }
        .render()
        .unwrap();

        assert!(page.contains("<title>Error 404 · ResuMatch</title>"));
        assert!(page.contains("No &quot;such&quot; page &lt;here&gt;"));
    }
}
