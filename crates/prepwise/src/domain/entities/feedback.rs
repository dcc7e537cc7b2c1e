//! Feedback - Structured evaluation of a finished interview
//!
//! Pure domain entity without infrastructure dependencies.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::FeedbackCategory;

/// Score for a single evaluation category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: f64,
    pub comment: String,
}

/// The structured output the feedback model must produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAssessment {
    pub total_score: f64,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
}

impl FeedbackAssessment {
    /// Check that the model scored exactly the instructed categories,
    /// with every score on the 0-100 scale.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_score("Total score", self.total_score)?;

        let mut seen = HashSet::new();

        for score in &self.category_scores {
            check_score(&score.name, score.score)?;
            let category = FeedbackCategory::from_name(&score.name).ok_or_else(|| {
                DomainError::Validation(format!("Unexpected feedback category: {}", score.name))
            })?;
            if !seen.insert(category) {
                return Err(DomainError::Validation(format!(
                    "Duplicate feedback category: {}",
                    score.name
                )));
            }
        }

        let missing: Vec<&str> = FeedbackCategory::ALL
            .iter()
            .filter(|category| !seen.contains(*category))
            .map(|category| category.display_name())
            .collect();

        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "Missing feedback categories: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}

fn check_score(label: &str, score: f64) -> Result<(), DomainError> {
    if (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "{} out of range: {}",
            label, score
        )))
    }
}

/// Feedback - Persisted evaluation of an interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub interview_id: String,
    pub user_id: String,
    pub total_score: f64,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Build a feedback record from a model assessment.
    ///
    /// Reuses `id` when regenerating so the write overwrites the previous
    /// record, otherwise allocates a fresh one.
    pub fn from_assessment(
        id: Option<String>,
        interview_id: impl Into<String>,
        user_id: impl Into<String>,
        assessment: FeedbackAssessment,
    ) -> Self {
        Self {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            interview_id: interview_id.into(),
            user_id: user_id.into(),
            total_score: assessment.total_score,
            category_scores: assessment.category_scores,
            strengths: assessment.strengths,
            areas_for_improvement: assessment.areas_for_improvement,
            final_assessment: assessment.final_assessment,
            created_at: Utc::now(),
        }
    }
}
