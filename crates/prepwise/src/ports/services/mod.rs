//! Service Ports
//!
//! Abstract interfaces for external services.

mod feedback_generator;

pub use feedback_generator::*;
