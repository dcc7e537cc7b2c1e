//! In-memory adapters for route and service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use prepwise::{
    CategoryScore, DomainError, Feedback, FeedbackAssessment, FeedbackCategory,
    FeedbackGenerator, FeedbackRepository, Interview, InterviewRepository,
};

#[derive(Default)]
pub struct MemoryInterviewRepository {
    interviews: Mutex<HashMap<String, Interview>>,
}

impl MemoryInterviewRepository {
    pub fn insert(&self, interview: Interview) {
        self.interviews
            .lock()
            .unwrap()
            .insert(interview.id.clone(), interview);
    }

    pub fn get(&self, id: &str) -> Option<Interview> {
        self.interviews.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.interviews.lock().unwrap().len()
    }

    fn sorted(&self, keep: impl Fn(&Interview) -> bool) -> Vec<Interview> {
        let mut found: Vec<Interview> = self
            .interviews
            .lock()
            .unwrap()
            .values()
            .filter(|i| keep(i))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}

#[async_trait]
impl InterviewRepository for MemoryInterviewRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Interview>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Interview>, DomainError> {
        Ok(self.sorted(|i| i.user_id == user_id))
    }

    async fn find_latest_finalized(
        &self,
        exclude_user_id: &str,
        limit: usize,
    ) -> Result<Vec<Interview>, DomainError> {
        let mut found = self.sorted(|i| i.finalized && i.user_id != exclude_user_id);
        found.truncate(limit);
        Ok(found)
    }

    async fn create(&self, interview: &Interview) -> Result<Interview, DomainError> {
        self.insert(interview.clone());
        Ok(interview.clone())
    }

    async fn mark_started(
        &self,
        id: &str,
        user_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut interviews = self.interviews.lock().unwrap();
        match interviews.get_mut(id) {
            Some(interview) => {
                interview.mark_started(user_id, started_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryFeedbackRepository {
    records: Mutex<HashMap<String, Feedback>>,
    fail_writes: bool,
}

impl MemoryFeedbackRepository {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn get(&self, id: &str) -> Option<Feedback> {
        self.records.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackRepository {
    async fn save(&self, feedback: &Feedback) -> Result<Feedback, DomainError> {
        if self.fail_writes {
            return Err(DomainError::Repository("write refused".to_string()));
        }
        self.records
            .lock()
            .unwrap()
            .insert(feedback.id.clone(), feedback.clone());
        Ok(feedback.clone())
    }

    async fn find_latest_by_interview(
        &self,
        interview_id: &str,
    ) -> Result<Option<Feedback>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|f| f.interview_id == interview_id)
            .max_by(|a, b| a.created_at.cmp(&b.created_at))
            .cloned())
    }
}

/// Generator returning a canned assessment and recording its prompts
pub struct StubFeedbackGenerator {
    response: Result<FeedbackAssessment, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubFeedbackGenerator {
    pub fn new(assessment: FeedbackAssessment) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(assessment),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackGenerator for StubFeedbackGenerator {
    async fn generate(
        &self,
        _system_prompt: &str,
        prompt: &str,
    ) -> Result<FeedbackAssessment, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response
            .clone()
            .map_err(DomainError::ExternalService)
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_id(&self) -> &str {
        "stub-model"
    }
}

/// An assessment scoring exactly the five instructed categories
pub fn sample_assessment(total_score: f64) -> FeedbackAssessment {
    FeedbackAssessment {
        total_score,
        category_scores: FeedbackCategory::ALL
            .iter()
            .map(|c| CategoryScore {
                name: c.display_name().to_string(),
                score: total_score,
                comment: format!("{} observed", c.display_name()),
            })
            .collect(),
        strengths: vec!["Structured answers".to_string()],
        areas_for_improvement: vec!["Quantify impact".to_string()],
        final_assessment: "Good foundation, needs more depth.".to_string(),
    }
}

/// Application wired to in-memory adapters
pub struct TestContext {
    pub interviews: Arc<MemoryInterviewRepository>,
    pub feedback: Arc<MemoryFeedbackRepository>,
    pub generator: Arc<StubFeedbackGenerator>,
}

impl TestContext {
    pub fn new(generator: Arc<StubFeedbackGenerator>) -> Self {
        Self::with_feedback_repo(generator, MemoryFeedbackRepository::default())
    }

    pub fn with_feedback_repo(
        generator: Arc<StubFeedbackGenerator>,
        feedback: MemoryFeedbackRepository,
    ) -> Self {
        Self {
            interviews: Arc::new(MemoryInterviewRepository::default()),
            feedback: Arc::new(feedback),
            generator,
        }
    }

    pub fn state(&self) -> crate::AppState {
        crate::AppState::new(
            self.interviews.clone(),
            self.feedback.clone(),
            self.generator.clone(),
        )
    }

    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::new(crate::app(self.state())).unwrap()
    }
}
