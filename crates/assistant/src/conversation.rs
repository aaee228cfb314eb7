use std::time::Duration;

use storepilot_catalog::Catalog;
use storepilot_core::{DomainError, DomainResult};
use storepilot_events::DeferredQueue;

use crate::message::Message;
use crate::reply::Reply;
use crate::responder::Responder;
use crate::rules::greeting;

/// Advisory typing delay before an assistant reply is delivered.
pub const TYPING_DELAY: Duration = Duration::from_millis(1500);

/// Append-only conversation log.
///
/// Replies are computed synchronously on `send` but delivered through a
/// deferred completion, so an assistant message always lands strictly after
/// the user message that triggered it — never interleaved or reordered.
/// After N completed sends the log holds exactly 2N+1 messages (greeting
/// plus N user/assistant pairs).
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    pending: DeferredQueue<Message>,
    responder: Responder,
}

impl Conversation {
    /// Start a conversation seeded with the assistant greeting.
    pub fn start() -> Self {
        let opening = greeting();
        Self {
            messages: vec![Message::assistant(opening.content, opening.suggestions)],
            pending: DeferredQueue::new(),
            responder: Responder::default(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// A reply has been computed but not yet delivered.
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Append a user message and queue the assistant reply.
    ///
    /// Blank input is rejected and does not count as a send action.
    pub fn send(&mut self, input: &str, catalog: &Catalog) -> DomainResult<Reply> {
        if input.trim().is_empty() {
            return Err(DomainError::validation("message cannot be empty"));
        }

        self.messages.push(Message::user(input));
        let reply = self.responder.respond(input, catalog);
        self.pending.schedule(
            Message::assistant(reply.content.clone(), reply.suggestions.clone()),
            TYPING_DELAY,
        );
        Ok(reply)
    }

    /// Deliver the oldest pending reply, if any, and return the appended
    /// message.
    pub fn complete_reply(&mut self) -> Option<&Message> {
        let message = self.pending.complete_next()?;
        self.messages.push(message);
        self.messages.last()
    }

    /// Drop pending replies without delivering them (view dismissed). The
    /// log itself is untouched.
    pub fn cancel_pending(&mut self) {
        self.pending.cancel_all();
    }
}
