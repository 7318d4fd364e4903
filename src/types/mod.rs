pub mod evaluation;
pub mod resume;

pub use evaluation::{BatchEvaluation, Candidate, SingleEvaluation};
pub use resume::{ResumeBatch, ResumeFile, SingleSubmission};
