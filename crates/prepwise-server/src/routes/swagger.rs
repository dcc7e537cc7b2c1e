//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    ApiErrorBody,
    CategoryScoreResponse,
    FeedbackResponse,
    // Feedback models
    GenerateFeedbackRequest,
    GenerateFeedbackResponse,
    // Interview models
    InterviewResponse,
    StartInterviewRequest,
    StartInterviewResponse,
    TranscriptLine,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Interview endpoints
        super::interview::start_interview,
        super::interview::list_user_interviews,
        super::interview::list_latest_interviews,
        super::interview::get_interview,
        // Feedback endpoints
        super::feedback::generate_feedback,
        super::feedback::get_interview_feedback,
    ),
    info(
        title = "PrepWise API",
        version = "0.1.0",
        description = "Mock interview practice with AI-generated feedback",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Interview", description = "Interview - Mock interview sessions"),
        (name = "Feedback", description = "Feedback - AI-generated interview evaluation"),
    ),
    components(
        schemas(
            // Interview
            InterviewResponse,
            StartInterviewRequest,
            StartInterviewResponse,
            // Feedback
            TranscriptLine,
            GenerateFeedbackRequest,
            GenerateFeedbackResponse,
            CategoryScoreResponse,
            FeedbackResponse,
            // Errors
            ApiErrorBody,
        )
    ),
)]
pub struct ApiDoc;
