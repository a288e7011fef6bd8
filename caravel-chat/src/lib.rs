pub mod classify;
pub mod engine;
pub mod error;
pub mod extract;
pub mod session;

pub use engine::TurnEngine;
pub use error::ChatError;
pub use session::{ConversationSession, FlowState};
