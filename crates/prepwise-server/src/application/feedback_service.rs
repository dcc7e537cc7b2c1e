//! Feedback Application Service (Use Case)
//!
//! Turns an interview transcript into a persisted feedback report:
//! format, prompt, generate, validate, save.

use std::sync::Arc;

use prepwise::domain::{build_feedback_prompt, format_transcript, FEEDBACK_SYSTEM_PROMPT};
use prepwise::{
    DomainError, Feedback, FeedbackGenerator, FeedbackRepository, TranscriptMessage,
};

/// Input of a feedback generation run
#[derive(Debug, Clone)]
pub struct GenerateFeedback {
    pub interview_id: String,
    pub user_id: String,
    pub transcript: Vec<TranscriptMessage>,
    /// Overwrite this record instead of creating a new one
    pub feedback_id: Option<String>,
}

/// Result of a feedback generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    Created { feedback_id: String },
    Failed,
}

/// Application service for Feedback operations
pub struct FeedbackService<R: FeedbackRepository + ?Sized> {
    repo: Arc<R>,
    generator: Arc<dyn FeedbackGenerator>,
}

impl<R: FeedbackRepository + ?Sized> FeedbackService<R> {
    pub fn new(repo: Arc<R>, generator: Arc<dyn FeedbackGenerator>) -> Self {
        Self { repo, generator }
    }

    /// Generate and persist feedback. Failures are logged, never returned.
    pub async fn generate(&self, input: GenerateFeedback) -> FeedbackOutcome {
        let interview_id = input.interview_id.clone();
        match self.try_generate(input).await {
            Ok(feedback) => {
                tracing::info!(
                    "Feedback {} saved for interview {} (score {})",
                    feedback.id,
                    feedback.interview_id,
                    feedback.total_score
                );
                FeedbackOutcome::Created {
                    feedback_id: feedback.id,
                }
            }
            Err(e) => {
                tracing::error!("Error saving feedback for {}: {}", interview_id, e);
                FeedbackOutcome::Failed
            }
        }
    }

    async fn try_generate(&self, input: GenerateFeedback) -> Result<Feedback, DomainError> {
        let transcript = format_transcript(&input.transcript);
        let prompt = build_feedback_prompt(&transcript);

        tracing::debug!(
            provider = self.generator.provider_name(),
            model = self.generator.model_id(),
            "Requesting feedback assessment"
        );
        let assessment = self
            .generator
            .generate(FEEDBACK_SYSTEM_PROMPT, &prompt)
            .await?;
        assessment.validate()?;

        let feedback = Feedback::from_assessment(
            input.feedback_id,
            input.interview_id,
            input.user_id,
            assessment,
        );
        self.repo.save(&feedback).await
    }

    /// Most recent Feedback for an Interview
    pub async fn latest_for_interview(
        &self,
        interview_id: &str,
    ) -> Result<Option<Feedback>, DomainError> {
        self.repo.find_latest_by_interview(interview_id).await
    }
}
