//! Interview Session
//!
//! Client-side state machine for a live interview call: lifecycle,
//! question delivery, event handling and feedback dispatch.

pub mod agent;
pub mod dispatcher;
pub mod sequencer;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use agent::{AgentConfig, CallMode, InterviewAgent, SessionError};
pub use dispatcher::FeedbackDispatcher;
pub use sequencer::QuestionSequencer;
pub use state::{CallStatus, SessionState};
