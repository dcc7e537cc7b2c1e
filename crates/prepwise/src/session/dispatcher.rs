//! Feedback Dispatcher
//!
//! Submits a finished call's transcript for evaluation and moves the user
//! to the report, or home when generation fails.

use std::sync::Arc;

use crate::ports::{FeedbackRequest, Navigator, Route, SessionBackend};

/// Sends transcripts to the feedback endpoint
pub struct FeedbackDispatcher {
    backend: Arc<dyn SessionBackend>,
    navigator: Arc<dyn Navigator>,
}

impl FeedbackDispatcher {
    pub fn new(backend: Arc<dyn SessionBackend>, navigator: Arc<dyn Navigator>) -> Self {
        Self { backend, navigator }
    }

    /// Submit the transcript and navigate. Returns the route taken.
    ///
    /// Callers guarantee a single invocation per finished call.
    pub async fn dispatch(&self, request: FeedbackRequest) -> Route {
        tracing::info!(
            interview_id = %request.interview_id,
            messages = request.transcript.len(),
            "Generating feedback"
        );

        let route = match self.backend.generate_feedback(&request).await {
            Ok(feedback_id) => {
                tracing::info!(%feedback_id, "Feedback generated");
                Route::Feedback {
                    interview_id: request.interview_id,
                }
            }
            Err(e) => {
                tracing::error!("Failed to generate feedback: {}", e);
                Route::Home
            }
        };

        self.navigator.navigate(route.clone());
        route
    }
}
