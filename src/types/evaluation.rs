// src/types/evaluation.rs
//! Response bodies returned by the evaluation backend

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u32 = 100;

/// One resume that met the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub email: String,
    pub score: u32,
}

/// Body of `POST /api/evaluate-multiple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEvaluation {
    pub total: u32,
    pub qualifying: Vec<Candidate>,
}

impl BatchEvaluation {
    /// Reject responses whose scores or counts cannot be displayed faithfully.
    pub fn validate(&self) -> Result<()> {
        if self.qualifying.len() as u64 > u64::from(self.total) {
            anyhow::bail!(
                "Backend reported {} qualifying candidates out of {} resumes",
                self.qualifying.len(),
                self.total
            );
        }

        if let Some(candidate) = self.qualifying.iter().find(|c| c.score > MAX_SCORE) {
            anyhow::bail!(
                "Backend returned score {} for {}, expected 0-{}",
                candidate.score,
                candidate.name,
                MAX_SCORE
            );
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.qualifying.is_empty()
    }
}

/// Body of `POST /api/evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleEvaluation {
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl SingleEvaluation {
    pub fn validate(&self) -> Result<()> {
        if self.score > MAX_SCORE {
            anyhow::bail!("Backend returned score {}, expected 0-{}", self.score, MAX_SCORE);
        }
        Ok(())
    }
}
