//! DocForge Common Library
//!
//! Shared code for the DocForge services including:
//! - The answer engine (normalizer, classifier, synthesizer)
//! - Database models and the document store
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DocumentStore, Repository};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the root endpoint
pub const SERVICE_NAME: &str = "AI Document Q&A System";
