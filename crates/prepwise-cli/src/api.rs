//! PrepWise API Client

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use prepwise::{
    CategoryScore, DomainError, FeedbackRequest, Interview, PhoneCallRequest, SessionBackend,
};

/// API Client for PrepWise
pub struct PrepWiseClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    telephony_url: Option<String>,
}

// ============================================
// API Request/Response Types
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartInterviewRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    interview_id: Option<&'a str>,
    user_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartInterviewResponse {
    interview_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateFeedbackResponse {
    feedback_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhoneCallResponse {
    call_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Stored feedback report
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub id: String,
    pub interview_id: String,
    pub total_score: f64,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    pub created_at: String,
}

impl PrepWiseClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
            telephony_url: None,
        }
    }

    /// Endpoint used to place outbound phone interviews
    pub fn with_telephony_url(mut self, url: Option<String>) -> Self {
        self.telephony_url = url;
        self
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        self.authorized(request)
            .send()
            .await
            .context("Failed to connect to PrepWise API")
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            bail!("API error ({}): {}", status, message);
        }

        resp.json().await.context("Failed to parse response")
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Check that the API key is accepted by the protected routes
    pub async fn verify_key(&self) -> Result<bool> {
        let url = format!("{}/api/interviews?userId=", self.base_url);
        let resp = self.send(self.client.get(&url)).await?;
        Ok(resp.status() != StatusCode::UNAUTHORIZED)
    }

    /// Mark an interview started, or create one. Returns its ID.
    pub async fn start_interview(&self, interview_id: Option<&str>, user_id: &str) -> Result<String> {
        let url = format!("{}/api/interviews/start", self.base_url);
        let request = StartInterviewRequest {
            interview_id,
            user_id,
        };

        let resp = self.send(self.client.post(&url).json(&request)).await?;
        let body: StartInterviewResponse = Self::parse(resp).await?;
        Ok(body.interview_id)
    }

    /// Get a specific interview
    pub async fn get_interview(&self, interview_id: &str) -> Result<Interview> {
        let url = format!(
            "{}/api/interviews/{}",
            self.base_url,
            urlencoding::encode(interview_id)
        );
        let resp = self.send(self.client.get(&url)).await?;
        Self::parse(resp).await
    }

    /// List a user's interviews
    pub async fn list_interviews(&self, user_id: &str) -> Result<Vec<Interview>> {
        let url = format!(
            "{}/api/interviews?userId={}",
            self.base_url,
            urlencoding::encode(user_id)
        );
        let resp = self.send(self.client.get(&url)).await?;
        Self::parse(resp).await
    }

    /// List recent finalized interviews of other users
    pub async fn latest_interviews(&self, user_id: &str, limit: usize) -> Result<Vec<Interview>> {
        let url = format!(
            "{}/api/interviews/latest?userId={}&limit={}",
            self.base_url,
            urlencoding::encode(user_id),
            limit
        );
        let resp = self.send(self.client.get(&url)).await?;
        Self::parse(resp).await
    }

    /// Submit a transcript for evaluation. Returns the feedback ID.
    pub async fn generate_feedback(&self, request: &FeedbackRequest) -> Result<String> {
        let url = format!("{}/api/feedback/generate", self.base_url);
        let resp = self.send(self.client.post(&url).json(request)).await?;
        let body: GenerateFeedbackResponse = Self::parse(resp).await?;
        Ok(body.feedback_id)
    }

    /// Latest feedback for an interview, if any
    pub async fn get_feedback(&self, interview_id: &str) -> Result<Option<FeedbackReport>> {
        let url = format!(
            "{}/api/interviews/{}/feedback",
            self.base_url,
            urlencoding::encode(interview_id)
        );
        let resp = self.send(self.client.get(&url)).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse(resp).await.map(Some)
    }

    /// Ask the telephony endpoint to dial the candidate
    pub async fn initiate_phone_call(&self, request: &PhoneCallRequest) -> Result<Option<String>> {
        let url = self
            .telephony_url
            .as_deref()
            .context("No telephony endpoint configured. Set telephony_url or PREPWISE_TELEPHONY_URL.")?;

        let resp = self.send(self.client.post(url).json(request)).await?;
        let body: PhoneCallResponse = Self::parse(resp).await?;
        Ok(body.call_id)
    }
}

fn external(err: anyhow::Error) -> DomainError {
    DomainError::ExternalService(format!("{:#}", err))
}

#[async_trait]
impl SessionBackend for PrepWiseClient {
    async fn mark_interview_started(
        &self,
        interview_id: Option<&str>,
        user_id: &str,
    ) -> Result<String, DomainError> {
        self.start_interview(interview_id, user_id)
            .await
            .map_err(external)
    }

    async fn generate_feedback(&self, request: &FeedbackRequest) -> Result<String, DomainError> {
        PrepWiseClient::generate_feedback(self, request)
            .await
            .map_err(external)
    }

    async fn initiate_phone_call(
        &self,
        request: &PhoneCallRequest,
    ) -> Result<Option<String>, DomainError> {
        PrepWiseClient::initiate_phone_call(self, request)
            .await
            .map_err(external)
    }
}
