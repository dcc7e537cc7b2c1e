//! Session Backend Port
//!
//! The HTTP endpoints the interview session calls while a call is in
//! progress, plus the navigation hook used once feedback is ready.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::TranscriptMessage;
use crate::domain::errors::DomainError;

/// Request body for the feedback generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub interview_id: String,
    pub user_id: String,
    pub transcript: Vec<TranscriptMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_id: Option<String>,
}

/// Request body for the outbound telephony initiation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneCallRequest {
    #[serde(rename = "userid")]
    pub user_id: Option<String>,
    #[serde(rename = "userPhone")]
    pub phone_number: String,
    #[serde(rename = "type")]
    pub call_type: String,
}

/// Backend endpoints used by an interview session
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Mark an interview as started (or create one when `interview_id` is
    /// absent). Returns the interview ID the backend recorded.
    async fn mark_interview_started(
        &self,
        interview_id: Option<&str>,
        user_id: &str,
    ) -> Result<String, DomainError>;

    /// Submit a transcript for evaluation. Returns the feedback ID.
    async fn generate_feedback(&self, request: &FeedbackRequest) -> Result<String, DomainError>;

    /// Ask the telephony endpoint to dial the user. Returns the provider
    /// call ID when one is reported.
    async fn initiate_phone_call(
        &self,
        request: &PhoneCallRequest,
    ) -> Result<Option<String>, DomainError>;
}

/// Views the session can send the user to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Dashboard / safe fallback
    Home,
    /// Feedback report for an interview
    Feedback { interview_id: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Feedback { interview_id } => format!("/interview/{}/feedback", interview_id),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Navigation hook of the hosting view
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
