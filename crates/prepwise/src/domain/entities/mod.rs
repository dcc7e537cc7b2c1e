//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Interview: A mock interview and its question set
//! - Feedback: Structured evaluation of a finished interview
//! - TranscriptMessage: One finalized line of a call transcript

mod feedback;
mod interview;
mod transcript;

pub use feedback::*;
pub use interview::*;
pub use transcript::*;
