//! Session State
//!
//! Everything a single interview call holds in memory.

use serde::{Deserialize, Serialize};

use crate::domain::entities::TranscriptMessage;
use crate::session::sequencer::QuestionSequencer;

/// Lifecycle of a call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    #[default]
    Inactive,
    Connecting,
    Active,
    Finished,
}

impl CallStatus {
    /// Whether a new call may be started from this status
    pub fn can_start(&self) -> bool {
        matches!(self, CallStatus::Inactive | CallStatus::Finished)
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallStatus::Inactive => write!(f, "INACTIVE"),
            CallStatus::Connecting => write!(f, "CONNECTING"),
            CallStatus::Active => write!(f, "ACTIVE"),
            CallStatus::Finished => write!(f, "FINISHED"),
        }
    }
}

/// In-memory state of one interview call
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub status: CallStatus,
    /// Whether the remote party is speaking (presentation only)
    pub is_speaking: bool,
    /// Finalized transcript, in arrival order
    pub messages: Vec<TranscriptMessage>,
    pub sequencer: QuestionSequencer,
    /// Set once a feedback request has been issued for this call
    pub feedback_requested: bool,
}

impl SessionState {
    pub fn new(questions: Vec<String>) -> Self {
        Self {
            sequencer: QuestionSequencer::new(questions),
            ..Self::default()
        }
    }

    /// Clear per-call data before a new call begins
    pub fn reset(&mut self) {
        self.status = CallStatus::Inactive;
        self.is_speaking = false;
        self.messages.clear();
        self.sequencer.reset();
        self.feedback_requested = false;
    }

    /// Content of the most recent finalized message
    pub fn latest_message(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}
