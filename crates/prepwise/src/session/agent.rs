//! Interview Agent
//!
//! Call lifecycle controller and provider event bridge for one interview.
//!
//! The agent owns the [`SessionState`]. Provider events arrive through a
//! single [`EventSubscription`] and are handled one at a time, so the
//! question cursor and the transcript are only ever touched from one place.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::TranscriptMessage;
use crate::domain::value_objects::MessageRole;
use crate::ports::{
    EventSubscription, FeedbackRequest, Navigator, PhoneCallRequest, ProviderMessage,
    SessionBackend, TranscriptType, VoiceEvent, VoiceSession, WebCallConfig,
};
use crate::session::dispatcher::FeedbackDispatcher;
use crate::session::state::{CallStatus, SessionState};

/// Errors surfaced to the caller of a session action
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot {action} while call is {status}")]
    InvalidTransition {
        status: CallStatus,
        action: &'static str,
    },

    #[error("Phone call initiation failed: {0}")]
    Telephony(String),

    #[error("Voice session error: {0}")]
    VoiceSession(String),
}

/// How the call reaches the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallMode {
    /// In-browser real-time session
    Web {
        username: String,
        user_id: Option<String>,
    },
    /// Outbound phone call placed by the telephony endpoint
    Phone {
        user_id: Option<String>,
        phone_number: String,
    },
}

/// Static inputs of the interview view
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    pub user_name: String,
    pub user_id: Option<String>,
    pub interview_id: Option<String>,
    /// Feedback that already exists for this interview, if any
    pub feedback_id: Option<String>,
    /// Feedback record to overwrite with this call's evaluation
    pub regenerate_feedback_id: Option<String>,
    /// Interview type forwarded to the telephony endpoint
    pub call_type: String,
    pub questions: Vec<String>,
    /// Provider workflow used for web calls
    pub workflow_id: String,
}

impl AgentConfig {
    /// Call mode for this view: phone when a number is given, web otherwise
    pub fn call_mode(&self, phone_number: Option<&str>) -> CallMode {
        match phone_number {
            Some(phone) => CallMode::Phone {
                user_id: self.user_id.clone(),
                phone_number: phone.to_string(),
            },
            None => CallMode::Web {
                username: self.user_name.clone(),
                user_id: self.user_id.clone(),
            },
        }
    }
}

/// Drives one interview call end to end
pub struct InterviewAgent {
    config: AgentConfig,
    state: SessionState,
    voice: Arc<dyn VoiceSession>,
    backend: Arc<dyn SessionBackend>,
    dispatcher: FeedbackDispatcher,
}

impl InterviewAgent {
    pub fn new(
        config: AgentConfig,
        voice: Arc<dyn VoiceSession>,
        backend: Arc<dyn SessionBackend>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let state = SessionState::new(config.questions.clone());
        let dispatcher = FeedbackDispatcher::new(backend.clone(), navigator);
        Self {
            config,
            state,
            voice,
            backend,
            dispatcher,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> CallStatus {
        self.state.status
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Register for provider events for the lifetime of this session
    pub fn subscribe(&self) -> EventSubscription {
        self.voice.subscribe()
    }

    // ============================================
    // Call lifecycle
    // ============================================

    /// Start a call: INACTIVE/FINISHED -> CONNECTING.
    ///
    /// The call becomes ACTIVE only when the provider reports call-start.
    pub async fn start_call(&mut self, mode: CallMode) -> Result<(), SessionError> {
        if !self.state.status.can_start() {
            return Err(SessionError::InvalidTransition {
                status: self.state.status,
                action: "start a call",
            });
        }

        if self.state.status == CallStatus::Finished {
            self.state.reset();
        }
        self.state.status = CallStatus::Connecting;

        match mode {
            CallMode::Phone {
                user_id,
                phone_number,
            } => {
                let request = PhoneCallRequest {
                    user_id,
                    phone_number,
                    call_type: self.config.call_type.clone(),
                };
                match self.backend.initiate_phone_call(&request).await {
                    Ok(call_id) => {
                        tracing::info!(call_id = ?call_id, "Phone call initiated");
                        Ok(())
                    }
                    Err(e) => {
                        tracing::error!("Failed to initiate phone call: {}", e);
                        self.state.status = CallStatus::Inactive;
                        Err(SessionError::Telephony(e.to_string()))
                    }
                }
            }
            CallMode::Web { username, user_id } => {
                let config =
                    WebCallConfig::new(&self.config.workflow_id, &username, user_id.as_deref());
                match self.voice.start(&config).await {
                    Ok(()) => {
                        tracing::info!("Web call started");
                        Ok(())
                    }
                    Err(e) => {
                        tracing::error!("Failed to start web call: {}", e);
                        self.state.status = CallStatus::Inactive;
                        Err(SessionError::VoiceSession(e.to_string()))
                    }
                }
            }
        }
    }

    /// End the call from the user's side: stop the provider and finish.
    pub async fn disconnect(&mut self) {
        if self.state.status == CallStatus::Inactive {
            tracing::debug!("Disconnect ignored, no call in progress");
            return;
        }

        if let Err(e) = self.voice.stop().await {
            tracing::warn!("Failed to stop voice session: {}", e);
        }
        tracing::info!("Call ended");
        self.finish().await;
    }

    // ============================================
    // Event bridge
    // ============================================

    /// Apply one provider event to the session
    pub async fn handle_event(&mut self, event: VoiceEvent) {
        match event {
            VoiceEvent::CallStart => self.on_call_start(),
            VoiceEvent::CallEnd => self.finish().await,
            VoiceEvent::Message(message) => self.on_message(message),
            VoiceEvent::SpeechStart => self.state.is_speaking = true,
            VoiceEvent::SpeechEnd => self.state.is_speaking = false,
            VoiceEvent::Error(error) => tracing::warn!("Voice session error: {}", error),
        }
    }

    /// Process events until the call finishes or the provider goes away.
    ///
    /// The subscription is borrowed so the caller decides when it is
    /// released; dropping it unsubscribes.
    pub async fn run_until_finished(&mut self, subscription: &mut EventSubscription) {
        while let Some(event) = subscription.next().await {
            self.handle_event(event).await;
            if self.state.status == CallStatus::Finished {
                break;
            }
        }
    }

    fn on_call_start(&mut self) {
        match self.state.status {
            CallStatus::Active => {
                tracing::debug!("Duplicate call-start ignored");
                return;
            }
            CallStatus::Finished => {
                tracing::warn!("call-start received after the call finished, ignoring");
                return;
            }
            CallStatus::Inactive | CallStatus::Connecting => {}
        }

        self.state.status = CallStatus::Active;
        tracing::info!("Call active");

        if let Some(user_id) = self.config.user_id.clone() {
            self.spawn_mark_started(user_id);
        }

        if !self.state.sequencer.has_started() {
            self.state.sequencer.advance(self.voice.as_ref());
        }
    }

    fn on_message(&mut self, message: ProviderMessage) {
        let ProviderMessage::Transcript {
            role,
            transcript_type,
            transcript,
        } = message
        else {
            return;
        };

        if transcript_type != TranscriptType::Final {
            return;
        }

        tracing::debug!(%role, "Final transcript");
        self.state
            .messages
            .push(TranscriptMessage::new(role, transcript));

        if role == MessageRole::User {
            self.state.sequencer.advance(self.voice.as_ref());
        }
    }

    /// Best-effort: the session never waits for or reports this request
    fn spawn_mark_started(&self, user_id: String) {
        let backend = self.backend.clone();
        let interview_id = self.config.interview_id.clone();
        tokio::spawn(async move {
            if let Err(e) = backend
                .mark_interview_started(interview_id.as_deref(), &user_id)
                .await
            {
                tracing::debug!("Failed to mark interview started: {}", e);
            }
        });
    }

    /// Enter FINISHED and request feedback when the call qualifies
    async fn finish(&mut self) {
        self.state.status = CallStatus::Finished;
        self.state.is_speaking = false;

        if let Some(request) = self.feedback_request() {
            self.state.feedback_requested = true;
            self.dispatcher.dispatch(request).await;
        }
    }

    fn feedback_request(&self) -> Option<FeedbackRequest> {
        if self.state.feedback_requested
            || self.config.feedback_id.is_some()
            || self.state.messages.is_empty()
        {
            return None;
        }

        Some(FeedbackRequest {
            interview_id: self.config.interview_id.clone()?,
            user_id: self.config.user_id.clone()?,
            transcript: self.state.messages.clone(),
            feedback_id: self.config.regenerate_feedback_id.clone(),
        })
    }
}
