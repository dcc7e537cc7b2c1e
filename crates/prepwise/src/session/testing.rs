//! In-memory fakes for session tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::errors::DomainError;
use crate::ports::{
    EventSubscription, FeedbackRequest, Navigator, PhoneCallRequest, Route, SessionBackend,
    VoiceEvent, VoiceSession, WebCallConfig,
};

type Sender = Arc<Mutex<Option<mpsc::UnboundedSender<VoiceEvent>>>>;

#[derive(Default)]
pub struct FakeVoice {
    started: Mutex<Vec<WebCallConfig>>,
    spoken: Mutex<Vec<String>>,
    stops: AtomicUsize,
    fail_sends: AtomicBool,
    sender: Sender,
}

impl FakeVoice {
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn started_with(&self) -> Vec<WebCallConfig> {
        self.started.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn is_subscribed(&self) -> bool {
        self.sender.lock().unwrap().is_some()
    }

    /// Deliver an event to the current subscriber, if any
    pub fn emit(&self, event: VoiceEvent) {
        if let Some(tx) = self.sender.lock().unwrap().as_ref() {
            let _ = tx.send(event);
        }
    }
}

#[async_trait]
impl VoiceSession for FakeVoice {
    async fn start(&self, config: &WebCallConfig) -> Result<(), DomainError> {
        self.started.lock().unwrap().push(config.clone());
        Ok(())
    }

    async fn stop(&self) -> Result<(), DomainError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn send_assistant_message(&self, content: &str) -> Result<(), DomainError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(DomainError::ExternalService("call not live".to_string()));
        }
        self.spoken.lock().unwrap().push(content.to_string());
        Ok(())
    }

    fn subscribe(&self) -> EventSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.sender.lock().unwrap() = Some(tx);
        let sender = self.sender.clone();
        EventSubscription::new(rx, move || {
            sender.lock().unwrap().take();
        })
    }
}

#[derive(Default)]
pub struct FakeBackend {
    fail_feedback: bool,
    fail_phone: bool,
    started: Mutex<Vec<(Option<String>, String)>>,
    feedback: Mutex<Vec<FeedbackRequest>>,
    phone_calls: Mutex<Vec<PhoneCallRequest>>,
}

impl FakeBackend {
    pub fn failing_feedback() -> Self {
        Self {
            fail_feedback: true,
            ..Self::default()
        }
    }

    pub fn failing_phone() -> Self {
        Self {
            fail_phone: true,
            ..Self::default()
        }
    }

    pub fn started_calls(&self) -> Vec<(Option<String>, String)> {
        self.started.lock().unwrap().clone()
    }

    pub fn feedback_requests(&self) -> Vec<FeedbackRequest> {
        self.feedback.lock().unwrap().clone()
    }

    pub fn phone_calls(&self) -> Vec<PhoneCallRequest> {
        self.phone_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionBackend for FakeBackend {
    async fn mark_interview_started(
        &self,
        interview_id: Option<&str>,
        user_id: &str,
    ) -> Result<String, DomainError> {
        self.started
            .lock()
            .unwrap()
            .push((interview_id.map(str::to_string), user_id.to_string()));
        Ok(interview_id.unwrap_or("new-interview").to_string())
    }

    async fn generate_feedback(&self, request: &FeedbackRequest) -> Result<String, DomainError> {
        self.feedback.lock().unwrap().push(request.clone());
        if self.fail_feedback {
            return Err(DomainError::ExternalService("HTTP 500".to_string()));
        }
        Ok("fb-1".to_string())
    }

    async fn initiate_phone_call(
        &self,
        request: &PhoneCallRequest,
    ) -> Result<Option<String>, DomainError> {
        self.phone_calls.lock().unwrap().push(request.clone());
        if self.fail_phone {
            return Err(DomainError::ExternalService("dial failed".to_string()));
        }
        Ok(Some("call-1".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
