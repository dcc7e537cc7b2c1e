use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod models;
mod routes;

use adapters::{GeminiFeedbackGenerator, PgFeedbackRepository, PgInterviewRepository};
use application::{FeedbackService, InterviewService};
use prepwise::{FeedbackGenerator, FeedbackRepository, InterviewRepository};

/// Application services over whichever repository adapters are wired in
pub type AppInterviewService = InterviewService<dyn InterviewRepository>;
pub type AppFeedbackService = FeedbackService<dyn FeedbackRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub interview_service: Arc<AppInterviewService>,
    pub feedback_service: Arc<AppFeedbackService>,
}

impl AppState {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        feedback: Arc<dyn FeedbackRepository>,
        generator: Arc<dyn FeedbackGenerator>,
    ) -> Self {
        Self {
            interview_service: Arc::new(AppInterviewService::new(interviews)),
            feedback_service: Arc::new(AppFeedbackService::new(feedback, generator)),
        }
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "PrepWise API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the full HTTP application for the given state
pub fn app(state: AppState) -> Router {
    // Protected routes (require authentication)
    let api_routes = Router::new()
        .merge(routes::interview::router())
        .merge(routes::feedback::router())
        .layer(middleware::from_fn(auth::require_api_key));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("PrepWise API initializing...");

    // Initialize API key from secrets
    if let Some(api_key) = secrets.get("PREPWISE_API_KEY") {
        auth::init_api_key(api_key);
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("No PREPWISE_API_KEY set - authentication disabled");
    }

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    // Feedback generation degrades to a logged failure without a key
    let gemini_api_key = secrets.get("GEMINI_API_KEY");
    if gemini_api_key.is_none() {
        tracing::warn!("No GEMINI_API_KEY set - feedback generation will fail");
    }
    let mut generator = GeminiFeedbackGenerator::new(gemini_api_key);
    if let Some(model) = secrets.get("GEMINI_MODEL") {
        generator = generator.with_model(model);
    }
    tracing::info!("Feedback generator: {}", generator.model_id());

    let state = AppState::new(
        Arc::new(PgInterviewRepository::new(pool.clone())),
        Arc::new(PgFeedbackRepository::new(pool)),
        Arc::new(generator),
    );

    let router = app(state);

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("PrepWise API ready");

    Ok(router.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters::memory::{sample_assessment, StubFeedbackGenerator, TestContext};

    #[tokio::test]
    async fn test_health_check() {
        let ctx = TestContext::new(StubFeedbackGenerator::new(sample_assessment(80.0)));
        let server = ctx.server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_endpoints() {
        let ctx = TestContext::new(StubFeedbackGenerator::new(sample_assessment(80.0)));
        let server = ctx.server();

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert!(body["paths"]["/api/feedback/generate"].is_object());
        assert!(body["paths"]["/api/interviews/start"].is_object());
    }
}
