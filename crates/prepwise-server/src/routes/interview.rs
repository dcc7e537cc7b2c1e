//! Interview Routes - Start and browse mock interviews
//!
//! HTTP handlers that delegate to InterviewService for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::models::{
    api_error, invalid_body, ApiError, ApiErrorBody, InterviewResponse, LatestInterviewsQuery,
    StartInterviewRequest, StartInterviewResponse, UserInterviewsQuery,
};
use crate::AppState;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn missing_user_id<E: std::fmt::Display>(rejection: E) -> ApiError {
    tracing::debug!("Rejected query: {}", rejection);
    api_error(StatusCode::BAD_REQUEST, "Missing userId")
}

/// Mark an interview as started
///
/// Without `interviewId` a new ad-hoc interview is created.
#[utoipa::path(
    post,
    path = "/api/interviews/start",
    request_body = StartInterviewRequest,
    responses(
        (status = 200, description = "Interview started", body = StartInterviewResponse),
        (status = 400, description = "Missing userId or invalid body", body = ApiErrorBody),
        (status = 404, description = "Interview not found", body = ApiErrorBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody)
    ),
    tag = "Interview"
)]
pub async fn start_interview(
    State(state): State<AppState>,
    payload: Result<Json<StartInterviewRequest>, JsonRejection>,
) -> Result<Json<StartInterviewResponse>, ApiError> {
    let Json(payload) = payload.map_err(invalid_body)?;

    let user_id = non_empty(payload.user_id)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing userId"))?;
    let interview_id = non_empty(payload.interview_id);

    let interview_id = state
        .interview_service
        .start(interview_id.as_deref(), &user_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                api_error(StatusCode::NOT_FOUND, "Interview not found")
            } else {
                tracing::error!("Failed to start interview: {}", e);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        })?;

    Ok(Json(StartInterviewResponse {
        success: true,
        interview_id,
    }))
}

/// List a user's interviews
#[utoipa::path(
    get,
    path = "/api/interviews",
    params(UserInterviewsQuery),
    responses(
        (status = 200, description = "Interviews of the user, newest first", body = Vec<InterviewResponse>),
        (status = 400, description = "Missing userId", body = ApiErrorBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody)
    ),
    tag = "Interview"
)]
pub async fn list_user_interviews(
    State(state): State<AppState>,
    query: Result<Query<UserInterviewsQuery>, QueryRejection>,
) -> Result<Json<Vec<InterviewResponse>>, ApiError> {
    let Query(query) = query.map_err(missing_user_id)?;

    let interviews = state
        .interview_service
        .list_by_user(&query.user_id)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;

    Ok(Json(interviews.into_iter().map(Into::into).collect()))
}

/// List recent finalized interviews of other users
#[utoipa::path(
    get,
    path = "/api/interviews/latest",
    params(LatestInterviewsQuery),
    responses(
        (status = 200, description = "Finalized interviews, newest first", body = Vec<InterviewResponse>),
        (status = 400, description = "Missing userId", body = ApiErrorBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody)
    ),
    tag = "Interview"
)]
pub async fn list_latest_interviews(
    State(state): State<AppState>,
    query: Result<Query<LatestInterviewsQuery>, QueryRejection>,
) -> Result<Json<Vec<InterviewResponse>>, ApiError> {
    let Query(query) = query.map_err(missing_user_id)?;

    let interviews = state
        .interview_service
        .list_latest(&query.user_id, query.limit)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;

    Ok(Json(interviews.into_iter().map(Into::into).collect()))
}

/// Get interview by ID
#[utoipa::path(
    get,
    path = "/api/interviews/{id}",
    params(
        ("id" = String, Path, description = "Interview ID")
    ),
    responses(
        (status = 200, description = "Interview found", body = InterviewResponse),
        (status = 404, description = "Interview not found", body = ApiErrorBody),
        (status = 500, description = "Internal server error", body = ApiErrorBody)
    ),
    tag = "Interview"
)]
pub async fn get_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InterviewResponse>, ApiError> {
    let interview = state
        .interview_service
        .get_by_id(&id)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Interview not found"))?;

    Ok(Json(interview.into()))
}

/// Create the Interview router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/interviews", get(list_user_interviews))
        .route("/api/interviews/start", post(start_interview))
        .route("/api/interviews/latest", get(list_latest_interviews))
        .route("/api/interviews/:id", get(get_interview))
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};

    use crate::adapters::memory::{sample_assessment, StubFeedbackGenerator, TestContext};
    use crate::models::{InterviewResponse, StartInterviewResponse};
    use prepwise::Interview;

    use super::*;

    fn context() -> TestContext {
        TestContext::new(StubFeedbackGenerator::new(sample_assessment(75.0)))
    }

    fn interview(id: &str, user_id: &str, finalized: bool, age_minutes: i64) -> Interview {
        let mut interview = Interview::new_in_progress(user_id);
        interview.id = id.to_string();
        interview.started_at = None;
        interview.finalized = finalized;
        interview.created_at = Utc::now() - Duration::minutes(age_minutes);
        interview.role = "Backend Engineer".to_string();
        interview.questions = vec!["Tell me about Rust".to_string()];
        interview
    }

    #[tokio::test]
    async fn test_start_unknown_interview_is_not_found() {
        let ctx = context();
        let server = ctx.server();

        let response = server
            .post("/api/interviews/start")
            .json(&json!({ "interviewId": "abc", "userId": "u1" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body, json!({ "success": false, "error": "Interview not found" }));
        assert_eq!(ctx.interviews.len(), 0);
    }

    #[tokio::test]
    async fn test_start_without_interview_creates_one() {
        let ctx = context();
        let server = ctx.server();

        let response = server
            .post("/api/interviews/start")
            .json(&json!({ "userId": "u1" }))
            .await;

        response.assert_status_ok();
        let body: StartInterviewResponse = response.json();
        assert!(body.success);

        let created = ctx.interviews.get(&body.interview_id).unwrap();
        assert_eq!(created.user_id, "u1");
        assert!(!created.finalized);
        assert!(created.techstack.is_empty());
        assert!(created.questions.is_empty());
        assert_eq!(created.interview_type, "Mixed");
        assert_eq!(created.role, "Interview");
        assert_eq!(created.level, "N/A");
        assert_eq!(created.started_at, Some(created.created_at));
    }

    #[tokio::test]
    async fn test_start_existing_interview_merges_start() {
        let ctx = context();
        ctx.interviews.insert(interview("abc", "author", false, 60));
        let server = ctx.server();

        let response = server
            .post("/api/interviews/start")
            .json(&json!({ "interviewId": "abc", "userId": "u1" }))
            .await;

        response.assert_status_ok();
        let body: StartInterviewResponse = response.json();
        assert_eq!(body.interview_id, "abc");

        let stored = ctx.interviews.get("abc").unwrap();
        assert_eq!(stored.user_id, "u1");
        assert!(stored.started_at.is_some());
        assert_eq!(stored.role, "Backend Engineer");
        assert_eq!(stored.questions, vec!["Tell me about Rust"]);
    }

    #[tokio::test]
    async fn test_start_requires_user_id() {
        let ctx = context();
        let server = ctx.server();

        for body in [json!({ "interviewId": "abc" }), json!({ "userId": "" })] {
            let response = server.post("/api/interviews/start").json(&body).await;

            response.assert_status_bad_request();
            let body: Value = response.json();
            assert_eq!(body["error"], "Missing userId");
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn test_start_with_malformed_body() {
        let ctx = context();
        let server = ctx.server();

        let response = server
            .post("/api/interviews/start")
            .content_type("application/json")
            .bytes(Bytes::from_static(b"{\"userId\": "))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_get_interview() {
        let ctx = context();
        ctx.interviews.insert(interview("abc", "u1", true, 5));
        let server = ctx.server();

        let response = server.get("/api/interviews/abc").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"], "abc");
        assert_eq!(body["type"], "Mixed");
        assert_eq!(body["coverImage"], ctx.interviews.get("abc").unwrap().cover_image);

        server
            .get("/api/interviews/missing")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_user_interviews_newest_first() {
        let ctx = context();
        ctx.interviews.insert(interview("old", "u1", false, 30));
        ctx.interviews.insert(interview("new", "u1", false, 1));
        ctx.interviews.insert(interview("other", "u2", false, 2));
        let server = ctx.server();

        let response = server.get("/api/interviews").add_query_param("userId", "u1").await;
        response.assert_status_ok();
        let body: Vec<InterviewResponse> = response.json();
        let ids: Vec<&str> = body.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);

        server
            .get("/api/interviews")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_latest_interviews_excludes_own_and_unfinalized() {
        let ctx = context();
        ctx.interviews.insert(interview("mine", "u1", true, 1));
        ctx.interviews.insert(interview("draft", "u2", false, 2));
        ctx.interviews.insert(interview("a", "u2", true, 3));
        ctx.interviews.insert(interview("b", "u3", true, 4));
        let server = ctx.server();

        let response = server
            .get("/api/interviews/latest")
            .add_query_param("userId", "u1")
            .await;
        response.assert_status_ok();
        let body: Vec<InterviewResponse> = response.json();
        let ids: Vec<&str> = body.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let limited = server
            .get("/api/interviews/latest")
            .add_query_param("userId", "u1")
            .add_query_param("limit", 1)
            .await;
        let body: Vec<InterviewResponse> = limited.json();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].id, "a");
    }

    #[tokio::test]
    async fn test_latest_interviews_oversized_limit_is_clamped() {
        let ctx = context();
        ctx.interviews.insert(interview("a", "u2", true, 3));
        let server = ctx.server();

        let response = server
            .get("/api/interviews/latest")
            .add_query_param("userId", "u1")
            .add_query_param("limit", u64::MAX)
            .await;
        response.assert_status_ok();
        let body: Vec<InterviewResponse> = response.json();
        assert_eq!(body.len(), 1);
    }
}
