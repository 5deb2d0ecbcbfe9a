//! Core library for the hunt-ai platform.
//!
//! Exposes the job-hunt decision pipeline (matching, critique, salary
//! negotiation, and listing imports) together with the configuration,
//! error, and telemetry plumbing shared by the service binaries.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use config::{AppConfig, AppEnvironment, PipelineSettings, ServerConfig};
pub use error::AppError;
