// src/core/mod.rs
//! Configuration, filesystem access and the backend client

pub mod config_manager;
pub mod fs_ops;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use service_client::{EvaluationClient, Evaluator};
