//! Feedback Routes - Generate and read interview feedback

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::application::{FeedbackOutcome, GenerateFeedback};
use crate::models::{
    api_error, invalid_body, ApiError, ApiErrorBody, FeedbackResponse, GenerateFeedbackRequest,
    GenerateFeedbackResponse,
};
use crate::AppState;

/// Generate feedback for a finished interview
///
/// With `feedbackId` the existing report is overwritten.
#[utoipa::path(
    post,
    path = "/api/feedback/generate",
    request_body = GenerateFeedbackRequest,
    responses(
        (status = 200, description = "Feedback generated", body = GenerateFeedbackResponse),
        (status = 400, description = "Missing required fields or invalid body", body = ApiErrorBody),
        (status = 500, description = "Feedback generation failed", body = ApiErrorBody)
    ),
    tag = "Feedback"
)]
pub async fn generate_feedback(
    State(state): State<AppState>,
    payload: Result<Json<GenerateFeedbackRequest>, JsonRejection>,
) -> Result<Json<GenerateFeedbackResponse>, ApiError> {
    let Json(payload) = payload.map_err(invalid_body)?;

    let (Some(interview_id), Some(user_id), Some(transcript)) = (
        payload.interview_id.filter(|id| !id.is_empty()),
        payload.user_id.filter(|id| !id.is_empty()),
        payload.transcript,
    ) else {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing required fields"));
    };

    let outcome = state
        .feedback_service
        .generate(GenerateFeedback {
            interview_id,
            user_id,
            transcript: transcript.into_iter().map(Into::into).collect(),
            feedback_id: payload.feedback_id.filter(|id| !id.is_empty()),
        })
        .await;

    match outcome {
        FeedbackOutcome::Created { feedback_id } => Ok(Json(GenerateFeedbackResponse {
            success: true,
            feedback_id,
        })),
        FeedbackOutcome::Failed => Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to create feedback",
        )),
    }
}

/// Get the latest feedback for an interview
#[utoipa::path(
    get,
    path = "/api/interviews/{id}/feedback",
    params(
        ("id" = String, Path, description = "Interview ID")
    ),
    responses(
        (status = 200, description = "Most recent feedback", body = FeedbackResponse),
        (status = 404, description = "No feedback for this interview", body = ApiErrorBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody)
    ),
    tag = "Feedback"
)]
pub async fn get_interview_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let feedback = state
        .feedback_service
        .latest_for_interview(&id)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Feedback not found"))?;

    Ok(Json(feedback.into()))
}

/// Create the Feedback router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/feedback/generate", post(generate_feedback))
        .route("/api/interviews/:id/feedback", get(get_interview_feedback))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::{json, Value};

    use crate::adapters::memory::{
        sample_assessment, MemoryFeedbackRepository, StubFeedbackGenerator, TestContext,
    };
    use prepwise::{CategoryScore, FeedbackCategory};

    use super::*;

    fn context() -> TestContext {
        TestContext::new(StubFeedbackGenerator::new(sample_assessment(82.0)))
    }

    fn transcript() -> Value {
        json!([
            { "role": "assistant", "content": "Tell me about yourself." },
            { "role": "user", "content": "I build backend services in Rust." }
        ])
    }

    #[tokio::test]
    async fn test_generate_persists_schema_fields() {
        let ctx = context();
        let server = ctx.server();

        let response = server
            .post("/api/feedback/generate")
            .json(&json!({
                "interviewId": "abc",
                "userId": "u1",
                "transcript": transcript()
            }))
            .await;

        response.assert_status_ok();
        let body: GenerateFeedbackResponse = response.json();
        assert!(body.success);

        let stored = ctx.feedback.get(&body.feedback_id).unwrap();
        let expected = sample_assessment(82.0);
        assert_eq!(stored.interview_id, "abc");
        assert_eq!(stored.user_id, "u1");
        assert_eq!(stored.total_score, expected.total_score);
        assert_eq!(stored.category_scores, expected.category_scores);
        assert_eq!(stored.strengths, expected.strengths);
        assert_eq!(stored.areas_for_improvement, expected.areas_for_improvement);
        assert_eq!(stored.final_assessment, expected.final_assessment);

        let names: BTreeSet<&str> = stored
            .category_scores
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        let instructed: BTreeSet<&str> = FeedbackCategory::ALL
            .iter()
            .map(|c| c.display_name())
            .collect();
        assert_eq!(names, instructed);

        let document = serde_json::to_value(&stored).unwrap();
        let mut keys: Vec<&str> = document
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "areasForImprovement",
                "categoryScores",
                "createdAt",
                "finalAssessment",
                "id",
                "interviewId",
                "strengths",
                "totalScore",
                "userId"
            ]
        );

        let prompts = ctx.generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- assistant: Tell me about yourself.\n"));
        assert!(prompts[0].contains("- user: I build backend services in Rust.\n"));
    }

    #[tokio::test]
    async fn test_regenerate_overwrites_existing_feedback() {
        let ctx = context();
        let server = ctx.server();

        let first: GenerateFeedbackResponse = server
            .post("/api/feedback/generate")
            .json(&json!({ "interviewId": "abc", "userId": "u1", "transcript": transcript() }))
            .await
            .json();

        let second: GenerateFeedbackResponse = server
            .post("/api/feedback/generate")
            .json(&json!({
                "interviewId": "abc",
                "userId": "u1",
                "transcript": transcript(),
                "feedbackId": first.feedback_id
            }))
            .await
            .json();

        assert_eq!(second.feedback_id, first.feedback_id);
        assert_eq!(ctx.feedback.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let ctx = context();
        let server = ctx.server();

        let bodies = [
            json!({ "interviewId": "abc", "userId": "u1" }),
            json!({ "userId": "u1", "transcript": transcript() }),
            json!({ "interviewId": "", "userId": "u1", "transcript": transcript() }),
            json!({ "interviewId": "abc", "transcript": transcript() }),
        ];

        for body in bodies {
            let response = server.post("/api/feedback/generate").json(&body).await;

            response.assert_status_bad_request();
            let body: Value = response.json();
            assert_eq!(
                body,
                json!({ "success": false, "error": "Missing required fields" })
            );
        }
        assert!(ctx.generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_empty_transcript_is_accepted() {
        let ctx = context();
        let server = ctx.server();

        let response = server
            .post("/api/feedback/generate")
            .json(&json!({ "interviewId": "abc", "userId": "u1", "transcript": [] }))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_model_failure_reports_failure() {
        let ctx = TestContext::new(StubFeedbackGenerator::failing("quota exceeded"));
        let server = ctx.server();

        let response = server
            .post("/api/feedback/generate")
            .json(&json!({ "interviewId": "abc", "userId": "u1", "transcript": transcript() }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "success": false, "error": "Failed to create feedback" })
        );
        assert_eq!(ctx.feedback.len(), 0);
    }

    #[tokio::test]
    async fn test_unexpected_category_is_not_persisted() {
        let mut assessment = sample_assessment(60.0);
        assessment.category_scores.push(CategoryScore {
            name: "Leadership".to_string(),
            score: 40.0,
            comment: "Not asked".to_string(),
        });
        let ctx = TestContext::new(StubFeedbackGenerator::new(assessment));
        let server = ctx.server();

        let response = server
            .post("/api/feedback/generate")
            .json(&json!({ "interviewId": "abc", "userId": "u1", "transcript": transcript() }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ctx.feedback.len(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_not_persisted() {
        let ctx = TestContext::new(StubFeedbackGenerator::new(sample_assessment(140.0)));
        let server = ctx.server();

        let response = server
            .post("/api/feedback/generate")
            .json(&json!({ "interviewId": "abc", "userId": "u1", "transcript": transcript() }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ctx.feedback.len(), 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_reports_failure() {
        let ctx = TestContext::with_feedback_repo(
            StubFeedbackGenerator::new(sample_assessment(70.0)),
            MemoryFeedbackRepository::failing(),
        );
        let server = ctx.server();

        let response = server
            .post("/api/feedback/generate")
            .json(&json!({ "interviewId": "abc", "userId": "u1", "transcript": transcript() }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_transcript_role_is_bad_body() {
        let ctx = context();
        let server = ctx.server();

        let response = server
            .post("/api/feedback/generate")
            .json(&json!({
                "interviewId": "abc",
                "userId": "u1",
                "transcript": [{ "role": "narrator", "content": "..." }]
            }))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_get_latest_feedback() {
        let ctx = context();
        let server = ctx.server();

        server
            .get("/api/interviews/abc/feedback")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let created: GenerateFeedbackResponse = server
            .post("/api/feedback/generate")
            .json(&json!({ "interviewId": "abc", "userId": "u1", "transcript": transcript() }))
            .await
            .json();

        let response = server.get("/api/interviews/abc/feedback").await;
        response.assert_status_ok();
        let body: FeedbackResponse = response.json();
        assert_eq!(body.id, created.feedback_id);
        assert_eq!(body.total_score, 82.0);
        assert_eq!(body.category_scores.len(), 5);
    }
}
