//! Events, envelopes, the append-only log, and deferred completions.

pub mod deferred;
pub mod envelope;
pub mod event;
pub mod log;

pub use deferred::{Deferred, DeferredQueue};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use log::EventLog;
