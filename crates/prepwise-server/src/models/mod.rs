//! PrepWise API Models
//!
//! - Interview: mock interview records and the start request
//! - Feedback: generation request and stored reports
//! - ApiErrorBody: the `{success: false, error}` failure envelope

mod error;
mod feedback;
mod interview;

pub use error::*;
pub use feedback::*;
pub use interview::*;
