//! Voice Session Port
//!
//! Abstract interface for the third-party real-time voice provider that
//! conducts the interview call. The provider is consumed, never
//! reimplemented: this port covers its commands (`start`, `stop`, `send`)
//! and the events it emits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::MessageRole;

/// Voice provider interface
///
/// Implementations deliver provider events into the receiver of the
/// [`EventSubscription`] returned by [`VoiceSession::subscribe`], in the
/// order the provider emits them.
#[async_trait]
pub trait VoiceSession: Send + Sync {
    /// Start a web-based call with the given workflow and variables
    async fn start(&self, config: &WebCallConfig) -> Result<(), DomainError>;

    /// Ask the provider to end the current call
    async fn stop(&self) -> Result<(), DomainError>;

    /// Inject a message into the live call that the assistant speaks aloud
    fn send_assistant_message(&self, content: &str) -> Result<(), DomainError>;

    /// Register for provider events until the subscription is dropped
    fn subscribe(&self) -> EventSubscription;
}

/// Configuration for a web-based call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebCallConfig {
    /// Provider workflow that drives the conversation
    pub workflow_id: String,
    /// Template variables bound into the workflow (`username`, `userid`)
    pub variable_values: BTreeMap<String, String>,
}

impl WebCallConfig {
    pub fn new(workflow_id: impl Into<String>, username: &str, user_id: Option<&str>) -> Self {
        let mut variable_values = BTreeMap::new();
        variable_values.insert("username".to_string(), username.to_string());
        if let Some(user_id) = user_id {
            variable_values.insert("userid".to_string(), user_id.to_string());
        }
        Self {
            workflow_id: workflow_id.into(),
            variable_values,
        }
    }
}

/// Events emitted by the voice provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum VoiceEvent {
    CallStart,
    CallEnd,
    Message(ProviderMessage),
    SpeechStart,
    SpeechEnd,
    Error(String),
}

/// Payload of a provider `message` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProviderMessage {
    #[serde(rename_all = "camelCase")]
    Transcript {
        role: MessageRole,
        transcript_type: TranscriptType,
        transcript: String,
    },
    /// Any message kind the session does not act on
    #[serde(other)]
    Other,
}

/// Whether a transcript update is settled or still being revised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptType {
    Final,
    Partial,
}

/// Live registration for provider events.
///
/// Dropping the subscription runs the release hook exactly once, so the
/// provider stops delivering events on every exit path.
pub struct EventSubscription {
    receiver: mpsc::UnboundedReceiver<VoiceEvent>,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl EventSubscription {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<VoiceEvent>,
        on_release: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            on_release: Some(Box::new(on_release)),
        }
    }

    /// Wait for the next event; `None` once the provider side is closed
    pub async fn next(&mut self) -> Option<VoiceEvent> {
        self.receiver.recv().await
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.on_release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for EventSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSubscription")
            .field("released", &self.on_release.is_none())
            .finish()
    }
}
