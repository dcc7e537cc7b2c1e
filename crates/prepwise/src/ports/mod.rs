//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (repositories, services).
//!
//! Implementations of these traits live in the infrastructure layer
//! (`prepwise-server` adapters, `prepwise-cli` HTTP client).

pub mod repositories;
pub mod services;
pub mod session_backend;
pub mod voice_session;

// Re-exports
pub use repositories::*;
pub use services::*;
pub use session_backend::*;
pub use voice_session::*;
