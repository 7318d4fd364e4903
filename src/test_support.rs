// src/test_support.rs
//! In-memory evaluator for unit tests

use anyhow::Result;
use std::sync::Mutex;

use crate::core::Evaluator;
use crate::types::{BatchEvaluation, ResumeBatch, SingleEvaluation, SingleSubmission};

#[derive(Default)]
pub struct StubEvaluator {
    answer: Option<BatchEvaluation>,
    failure: Option<String>,
    batches: Mutex<Vec<ResumeBatch>>,
    singles: Mutex<Vec<SingleSubmission>>,
}

impl StubEvaluator {
    pub const SINGLE_SCORE: u32 = 77;

    pub fn answering(answer: BatchEvaluation) -> Self {
        Self {
            answer: Some(answer),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn batches(&self) -> Vec<ResumeBatch> {
        self.batches.lock().unwrap().clone()
    }

    pub fn singles(&self) -> Vec<SingleSubmission> {
        self.singles.lock().unwrap().clone()
    }
}

#[rocket::async_trait]
impl Evaluator for StubEvaluator {
    async fn evaluate_multiple(&self, batch: ResumeBatch) -> Result<BatchEvaluation> {
        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }
        let total = batch.files.len() as u32;
        self.batches.lock().unwrap().push(batch);

        Ok(self.answer.clone().unwrap_or(BatchEvaluation {
            total,
            qualifying: Vec::new(),
        }))
    }

    async fn evaluate_single(&self, submission: SingleSubmission) -> Result<SingleEvaluation> {
        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }
        self.singles.lock().unwrap().push(submission);

        Ok(SingleEvaluation {
            score: Self::SINGLE_SCORE,
            name: Some("Ada Lovelace".to_string()),
            email: None,
            analysis: None,
        })
    }
}
