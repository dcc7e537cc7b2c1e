//! Domain Services
//!
//! Stateless helpers shared by the server and the session client.

mod cover;
mod feedback_prompt;
mod transcript;

pub use cover::*;
pub use feedback_prompt::*;
pub use transcript::*;
