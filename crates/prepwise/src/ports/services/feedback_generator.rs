//! Feedback Generator Port
//!
//! Abstract interface for the hosted structured-output model that scores
//! an interview transcript. Each provider (Gemini, OpenAI, ...) gets its
//! own implementation in the infrastructure layer.

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::FeedbackAssessment;

/// Structured-output model interface
///
/// # Example
///
/// ```rust,ignore
/// use prepwise::ports::FeedbackGenerator;
///
/// struct GeminiFeedbackGenerator { /* ... */ }
///
/// #[async_trait]
/// impl FeedbackGenerator for GeminiFeedbackGenerator {
///     async fn generate(&self, system: &str, prompt: &str)
///         -> Result<FeedbackAssessment, DomainError> {
///         // Call generateContent with a response schema
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    /// Produce an assessment conforming to the feedback schema
    async fn generate(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<FeedbackAssessment, DomainError>;

    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
