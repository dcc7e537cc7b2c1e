//! Interview - Mock interview session record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use prepwise::Interview;

// ============================================
// Request/Response DTOs
// ============================================

/// Start interview request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewRequest {
    /// Existing interview to mark started; omitted creates a new one
    pub interview_id: Option<String>,
    pub user_id: Option<String>,
}

/// Start interview response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewResponse {
    pub success: bool,
    pub interview_id: String,
}

/// Interview response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finalized: bool,
    #[serde(rename = "type")]
    pub interview_type: String,
    pub role: String,
    pub level: String,
    pub techstack: Vec<String>,
    pub questions: Vec<String>,
    pub cover_image: String,
}

impl From<Interview> for InterviewResponse {
    fn from(interview: Interview) -> Self {
        Self {
            id: interview.id,
            user_id: interview.user_id,
            created_at: interview.created_at,
            started_at: interview.started_at,
            finalized: interview.finalized,
            interview_type: interview.interview_type,
            role: interview.role,
            level: interview.level,
            techstack: interview.techstack,
            questions: interview.questions,
            cover_image: interview.cover_image,
        }
    }
}

/// Query for a user's own interviews
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserInterviewsQuery {
    pub user_id: String,
}

/// Query for other users' finalized interviews
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LatestInterviewsQuery {
    /// User whose interviews are excluded
    pub user_id: String,
    /// Maximum results (default 20)
    pub limit: Option<usize>,
}
