//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod gemini;
pub mod postgres;

#[cfg(test)]
pub mod memory;

// Re-exports
pub use gemini::GeminiFeedbackGenerator;
pub use postgres::{PgFeedbackRepository, PgInterviewRepository};
