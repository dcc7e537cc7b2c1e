//! Interview - A mock interview session definition
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::services::random_interview_cover;

/// Interview - Question set and ownership of a mock interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
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

impl Interview {
    pub const DEFAULT_TYPE: &'static str = "Mixed";
    pub const DEFAULT_ROLE: &'static str = "Interview";
    pub const DEFAULT_LEVEL: &'static str = "N/A";

    /// Create an ad-hoc interview that is already in progress.
    ///
    /// Used when a call starts without a prepared interview: no questions,
    /// not finalized, created and started at the same instant.
    pub fn new_in_progress(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            created_at: now,
            started_at: Some(now),
            finalized: false,
            interview_type: Self::DEFAULT_TYPE.to_string(),
            role: Self::DEFAULT_ROLE.to_string(),
            level: Self::DEFAULT_LEVEL.to_string(),
            techstack: Vec::new(),
            questions: Vec::new(),
            cover_image: random_interview_cover().to_string(),
        }
    }

    /// Record that a user started this interview
    pub fn mark_started(&mut self, user_id: impl Into<String>, at: DateTime<Utc>) {
        self.user_id = user_id.into();
        self.started_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_in_progress_defaults() {
        let interview = Interview::new_in_progress("u1");

        assert_eq!(interview.user_id, "u1");
        assert!(!interview.finalized);
        assert!(interview.techstack.is_empty());
        assert!(interview.questions.is_empty());
        assert_eq!(interview.interview_type, "Mixed");
        assert_eq!(interview.role, "Interview");
        assert_eq!(interview.level, "N/A");
        assert_eq!(interview.started_at, Some(interview.created_at));
        assert!(interview.cover_image.starts_with("/covers/"));
    }

    #[test]
    fn test_serializes_type_field() {
        let interview = Interview::new_in_progress("u1");
        let json = serde_json::to_value(&interview).unwrap();

        assert_eq!(json["type"], "Mixed");
        assert_eq!(json["userId"], "u1");
        assert!(json.get("coverImage").is_some());
    }
}
