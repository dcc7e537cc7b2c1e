//! Feedback prompt construction
//!
//! The instruction text sent to the structured-output model. The category
//! list is generated from [`FeedbackCategory::ALL`] so the prompt and the
//! response validation cannot drift apart.

use crate::domain::value_objects::FeedbackCategory;

/// System instruction for the feedback model
pub const FEEDBACK_SYSTEM_PROMPT: &str = "You are a professional interviewer analyzing a mock interview. Your task is to evaluate the candidate based on structured categories";

/// Build the user prompt for an already formatted transcript
pub fn build_feedback_prompt(formatted_transcript: &str) -> String {
    let categories: String = FeedbackCategory::ALL
        .iter()
        .map(|c| format!("- **{}**: {}\n", c.display_name(), c.description()))
        .collect();

    format!(
        r#"You are an AI interviewer analyzing a mock interview. Your task is to evaluate the candidate based on structured categories. Be thorough and detailed in your analysis. Don't be lenient with the candidate. If there are mistakes or areas for improvement, point them out.
Transcript:
{formatted_transcript}
Please score the candidate from 0 to 100 in the following areas. Do not add categories other than the ones provided:
{categories}"#
    )
}
