//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod feedback_category;
mod message_role;

pub use feedback_category::*;
pub use message_role::*;
