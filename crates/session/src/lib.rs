//! `storepilot-session`
//!
//! **Responsibility:** the store-visit flow.
//!
//! `Session` is the screen/tab aggregate, `GuidedRoute` the scripted walking
//! directions, and `App` the explicit application-state struct tying session,
//! catalog, cart, conversation, and profile together. Every user action goes
//! through an `App` method that dispatches a command and journals the
//! resulting events — there is no ambient mutable state.

pub mod app;
pub mod navigation;
pub mod session;

pub use app::{App, AppEvent, CHECKOUT_DELAY, CHECKOUT_SUCCESS, PendingEffect, SettledEffect};
pub use navigation::{GuidedRoute, ROUTE_STEPS, STEP_DELAY};
pub use session::{Screen, Session, SessionCommand, SessionEvent, SessionId, Tab};
