//! Business logic behind the HTTP handlers

pub mod qa;

pub use qa::{preview, QaService};
