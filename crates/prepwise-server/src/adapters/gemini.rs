//! Gemini structured-output adapter for feedback generation.
//!
//! Calls `generateContent` with a JSON response schema so the model answers
//! with a [`FeedbackAssessment`] document and nothing else.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use prepwise::{DomainError, FeedbackAssessment, FeedbackGenerator};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Gemini adapter errors
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY is not configured")]
    NoApiKey,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<GeminiError> for DomainError {
    fn from(err: GeminiError) -> Self {
        DomainError::ExternalService(err.to_string())
    }
}

/// Feedback generator backed by Gemini
#[derive(Clone)]
pub struct GeminiFeedbackGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiFeedbackGenerator {
    /// Create a generator. Without a key every request fails with
    /// [`GeminiError::NoApiKey`].
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Overrides the Gemini model name if needed.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn request(&self, system_prompt: &str, prompt: &str) -> Result<Value, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::NoApiKey)?;
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
        );

        let request = GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: system_prompt.to_string(),
                }],
            },
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: feedback_schema(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| GeminiError::RequestFailed(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        response
            .json()
            .await
            .map_err(|err| GeminiError::ParseError(err.to_string()))
    }
}

#[async_trait]
impl FeedbackGenerator for GeminiFeedbackGenerator {
    async fn generate(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<FeedbackAssessment, DomainError> {
        let payload = self.request(system_prompt, prompt).await?;
        Ok(parse_assessment(&payload)?)
    }

    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

// ============================================
// Helper Functions
// ============================================

/// OpenAPI-subset schema of [`FeedbackAssessment`]
fn feedback_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "totalScore": { "type": "NUMBER" },
            "categoryScores": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "score": { "type": "NUMBER" },
                        "comment": { "type": "STRING" }
                    },
                    "required": ["name", "score", "comment"]
                }
            },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "areasForImprovement": { "type": "ARRAY", "items": { "type": "STRING" } },
            "finalAssessment": { "type": "STRING" }
        },
        "required": [
            "totalScore",
            "categoryScores",
            "strengths",
            "areasForImprovement",
            "finalAssessment"
        ]
    })
}

fn parse_assessment(root: &Value) -> Result<FeedbackAssessment, GeminiError> {
    let text = root
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .and_then(|parts| parts.iter().find_map(|p| p.get("text")?.as_str()))
        .ok_or_else(|| GeminiError::ParseError("Response contained no text".to_string()))?;

    serde_json::from_str(text.trim()).map_err(|err| GeminiError::ParseError(err.to_string()))
}

fn map_http_error(status: StatusCode, body: String) -> GeminiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return GeminiError::RateLimited;
    }

    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    GeminiError::ApiError {
        status: status.as_u16(),
        message,
    }
}
