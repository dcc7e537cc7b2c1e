//! Feedback - Generated interview evaluation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use prepwise::{CategoryScore, Feedback, MessageRole, TranscriptMessage};

// ============================================
// Request/Response DTOs
// ============================================

/// One finalized transcript line as posted by the session
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TranscriptLine {
    /// `user`, `system` or `assistant`
    #[schema(value_type = String)]
    pub role: MessageRole,
    pub content: String,
}

impl From<TranscriptLine> for TranscriptMessage {
    fn from(line: TranscriptLine) -> Self {
        TranscriptMessage::new(line.role, line.content)
    }
}

/// Generate feedback request
///
/// Every field is optional at the wire level so that missing fields map to
/// a 400 with a stable message instead of a deserialization error.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFeedbackRequest {
    pub interview_id: Option<String>,
    pub user_id: Option<String>,
    pub transcript: Option<Vec<TranscriptLine>>,
    /// Existing feedback to overwrite when regenerating
    pub feedback_id: Option<String>,
}

/// Generate feedback response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFeedbackResponse {
    pub success: bool,
    pub feedback_id: String,
}

/// Category score response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryScoreResponse {
    pub name: String,
    pub score: f64,
    pub comment: String,
}

impl From<CategoryScore> for CategoryScoreResponse {
    fn from(score: CategoryScore) -> Self {
        Self {
            name: score.name,
            score: score.score,
            comment: score.comment,
        }
    }
}

/// Feedback response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: String,
    pub interview_id: String,
    pub user_id: String,
    pub total_score: f64,
    pub category_scores: Vec<CategoryScoreResponse>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            interview_id: feedback.interview_id,
            user_id: feedback.user_id,
            total_score: feedback.total_score,
            category_scores: feedback
                .category_scores
                .into_iter()
                .map(Into::into)
                .collect(),
            strengths: feedback.strengths,
            areas_for_improvement: feedback.areas_for_improvement,
            final_assessment: feedback.final_assessment,
            created_at: feedback.created_at,
        }
    }
}
