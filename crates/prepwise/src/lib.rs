//! PrepWise Domain Library
//!
//! Core domain types, interfaces and the interview session state machine
//! for the PrepWise mock interview system.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Interview, Feedback, TranscriptMessage)
//!   - `value_objects/`: Immutable value types (MessageRole, FeedbackCategory)
//!   - `services/`: Transcript formatting, feedback prompt, cover selection
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces
//!   - `voice_session`: The real-time voice provider
//!   - `session_backend`: HTTP endpoints a live session calls
//!
//! - **Session** (`session/`): Client-side call lifecycle, question
//!   delivery and feedback dispatch
//!
//! # Usage
//!
//! ```rust,ignore
//! use prepwise::session::{AgentConfig, InterviewAgent};
//! use prepwise::ports::{SessionBackend, VoiceSession};
//! ```

pub mod domain;
pub mod ports;
pub mod session;

// Re-export commonly used types
pub use domain::{
    CategoryScore, DomainError, Feedback, FeedbackAssessment, FeedbackCategory, Interview,
    MessageRole, TranscriptMessage,
};
pub use ports::{
    // Session
    EventSubscription,
    FeedbackGenerator,
    FeedbackRepository,
    FeedbackRequest,
    // Repositories
    InterviewRepository,
    Navigator,
    PhoneCallRequest,
    Route,
    SessionBackend,
    VoiceEvent,
    VoiceSession,
    WebCallConfig,
};
pub use session::{AgentConfig, CallMode, CallStatus, InterviewAgent, SessionError};
