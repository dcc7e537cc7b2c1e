//! PrepWise API Routes
//!
//! - /api/interviews - Interview start and listings
//! - /api/feedback - Feedback generation
//! - /api/interviews/:id/feedback - Stored feedback reports

pub mod feedback;
pub mod interview;
pub mod swagger;
