//! ResuMatch: uploads resumes and a job description to a matching backend
//! and renders the candidates that clear a score threshold.

pub mod core;
pub mod form;
pub mod render;
pub mod types;
pub mod web;

pub use crate::core::{ConfigManager, EvaluationClient, Evaluator};
pub use crate::web::start_web_server;

/// Level-tagged logging shorthand used across the crate.
///
/// `app_log!(info, "Sent {} files", n)` expands to `tracing::info!(...)`.
#[macro_export]
macro_rules! app_log {
    (trace, $($arg:tt)+) => { ::tracing::trace!($($arg)+) };
    (debug, $($arg:tt)+) => { ::tracing::debug!($($arg)+) };
    (info, $($arg:tt)+) => { ::tracing::info!($($arg)+) };
    (warn, $($arg:tt)+) => { ::tracing::warn!($($arg)+) };
    (error, $($arg:tt)+) => { ::tracing::error!($($arg)+) };
}

/// Info-level span shorthand, paired with [`app_log!`].
#[macro_export]
macro_rules! app_span {
    ($name:expr $(, $($fields:tt)+)?) => {
        ::tracing::info_span!($name $(, $($fields)+)?)
    };
}

#[cfg(test)]
pub(crate) mod test_support;
