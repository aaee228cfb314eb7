//! `storepilot-assistant`
//!
//! **Responsibility:** the scripted shopping assistant.
//!
//! This is intentionally not a generative system: replies come from an
//! ordered list of keyword trigger rules with a generic fallback, and the
//! only live computation is the milk count. The conversation log is
//! append-only; replies are delivered through deferred completions so they
//! always land strictly after the user message that triggered them.

pub mod conversation;
pub mod message;
pub mod reply;
pub mod responder;
pub mod rules;

pub use conversation::{Conversation, TYPING_DELAY};
pub use message::{Message, MessageId, Role};
pub use reply::Reply;
pub use responder::Responder;
pub use rules::{SCRIPTED_RULES, TriggerRule, fallback_reply, greeting};
