//! The application-state struct and its action handlers.
//!
//! `App` composes the session aggregate, the fixture catalog, the cart, the
//! conversation, and the shopper profile. Every user action is a method that
//! dispatches a command, journals the resulting events, and returns a
//! `DomainResult` — the reducer-style replacement for ambient mutable UI
//! state.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use storepilot_assistant::{Conversation, Message, Reply};
use storepilot_cart::{
    AddItem, ApplyCoupon, BeginCheckout, Cart, CartCommand, CartEvent, CartId, SetQuantity,
    SettleCheckout, Totals,
};
use storepilot_catalog::{Catalog, Product, ProductId, Recommendation, StoreLayout, fixtures, recommend};
use storepilot_core::{DomainError, DomainResult, EntityId, execute};
use storepilot_events::{DeferredQueue, Event, EventLog};
use storepilot_profile::{Shopper, sample_shopper};

use crate::navigation::{GuidedRoute, ROUTE_STEPS, STEP_DELAY};
use crate::session::{
    EnterStore, Screen, SelectTab, Session, SessionCommand, SessionEvent, SessionId, SignIn, Tab,
};

/// Advisory payment-processing delay before checkout settles.
pub const CHECKOUT_DELAY: Duration = Duration::from_secs(3);

/// Checkout always ends here; there is no failure path.
pub const CHECKOUT_SUCCESS: &str = "Order placed successfully! You can now exit the store.";

/// Work that has been scheduled but not yet delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingEffect {
    RouteAdvance,
    CheckoutSettle,
}

/// Outcome of settling one pending effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettledEffect {
    RouteAdvanced {
        step: usize,
        instruction: &'static str,
    },
    CheckoutSettled {
        message: String,
    },
}

/// Union of journaled domain events.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Session(SessionEvent),
    Cart(CartEvent),
}

impl Event for AppEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AppEvent::Session(e) => e.event_type(),
            AppEvent::Cart(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AppEvent::Session(e) => e.occurred_at(),
            AppEvent::Cart(e) => e.occurred_at(),
        }
    }
}

/// Everything the app works on, in one explicit state struct.
#[derive(Debug)]
pub struct App {
    session: Session,
    shopper: Shopper,
    catalog: Catalog,
    layout: StoreLayout,
    recommendations: Vec<Recommendation>,
    cart: Cart,
    conversation: Conversation,
    route: GuidedRoute,
    effects: DeferredQueue<PendingEffect>,
    journal: EventLog<AppEvent>,
}

impl App {
    /// Fresh app over the fixture catalog and sample shopper.
    pub fn new() -> Self {
        Self {
            session: Session::new(SessionId::new(EntityId::new())),
            shopper: sample_shopper(),
            catalog: fixtures::sample_catalog(),
            layout: fixtures::sample_layout(),
            recommendations: fixtures::sample_recommendations(),
            cart: Cart::new(CartId::new(EntityId::new())),
            conversation: Conversation::start(),
            route: GuidedRoute::idle(),
            effects: DeferredQueue::new(),
            journal: EventLog::new("app"),
        }
    }

    // ── read access ────────────────────────────────────────────────────

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn active_tab(&self) -> Tab {
        self.session.active_tab()
    }

    pub fn shopper(&self) -> &Shopper {
        &self.shopper
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn route(&self) -> &GuidedRoute {
        &self.route
    }

    pub fn journal(&self) -> &EventLog<AppEvent> {
        &self.journal
    }

    /// Case-insensitive product search for the finder tab.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.catalog.search(query)
    }

    /// Recommendations resolved against the catalog.
    pub fn recommended(&self) -> Vec<(&Product, &str)> {
        recommend::recommended(&self.catalog, &self.recommendations)
    }

    /// Current cart money summary.
    pub fn totals(&self) -> Totals {
        self.cart.totals()
    }

    // ── session actions ────────────────────────────────────────────────

    pub fn sign_in(&mut self, email: &str) -> DomainResult<()> {
        info!(email, "sign in");
        self.dispatch_session(SessionCommand::SignIn(SignIn {
            session_id: self.session.id_typed(),
            email: email.to_string(),
            occurred_at: Utc::now(),
        }))
    }

    pub fn enter_store(&mut self) -> DomainResult<()> {
        self.dispatch_session(SessionCommand::EnterStore(EnterStore {
            session_id: self.session.id_typed(),
            occurred_at: Utc::now(),
        }))
    }

    pub fn select_tab(&mut self, tab: Tab) -> DomainResult<()> {
        self.dispatch_session(SessionCommand::SelectTab(SelectTab {
            session_id: self.session.id_typed(),
            tab,
            occurred_at: Utc::now(),
        }))
    }

    // ── navigation actions ─────────────────────────────────────────────

    /// Begin guided navigation to a product's aisle. Out-of-stock products
    /// cannot be navigated to.
    pub fn start_route(&mut self, product_id: &ProductId) -> DomainResult<()> {
        let product = self.catalog.get(product_id).ok_or(DomainError::NotFound)?;
        if !product.in_stock {
            return Err(DomainError::validation("product is out of stock"));
        }

        debug!(product = %product.name, aisle = %product.aisle, "route started");
        self.route.start(product.aisle.clone());
        // One deferred advance per remaining step of the script.
        for _ in 1..ROUTE_STEPS.len() {
            self.effects.schedule(PendingEffect::RouteAdvance, STEP_DELAY);
        }
        Ok(())
    }

    /// Hide the navigation view. Pending step advances become no-ops.
    pub fn cancel_route(&mut self) {
        self.route.cancel();
    }

    // ── assistant actions ──────────────────────────────────────────────

    pub fn send_message(&mut self, text: &str) -> DomainResult<Reply> {
        self.conversation.send(text, &self.catalog)
    }

    /// Deliver the pending assistant reply, if any.
    pub fn complete_reply(&mut self) -> Option<&Message> {
        self.conversation.complete_reply()
    }

    // ── cart actions ───────────────────────────────────────────────────

    pub fn add_to_cart(&mut self, product_id: &ProductId, quantity: u32) -> DomainResult<()> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or(DomainError::NotFound)?
            .clone();
        self.dispatch_cart(CartCommand::AddItem(AddItem {
            cart_id: self.cart.id_typed(),
            product_id: product.id,
            name: product.name,
            unit_price: product.price,
            category: product.category,
            quantity,
            occurred_at: Utc::now(),
        }))
    }

    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> DomainResult<()> {
        self.dispatch_cart(CartCommand::SetQuantity(SetQuantity {
            cart_id: self.cart.id_typed(),
            product_id: product_id.clone(),
            quantity,
            occurred_at: Utc::now(),
        }))
    }

    pub fn apply_coupon(&mut self, code: &str) -> DomainResult<()> {
        self.dispatch_cart(CartCommand::ApplyCoupon(ApplyCoupon {
            cart_id: self.cart.id_typed(),
            code: code.to_string(),
            occurred_at: Utc::now(),
        }))
    }

    /// Start checkout. Settlement arrives as a deferred effect and always
    /// succeeds.
    pub fn begin_checkout(&mut self) -> DomainResult<()> {
        self.dispatch_cart(CartCommand::BeginCheckout(BeginCheckout {
            cart_id: self.cart.id_typed(),
            occurred_at: Utc::now(),
        }))?;
        self.effects
            .schedule(PendingEffect::CheckoutSettle, CHECKOUT_DELAY);
        Ok(())
    }

    // ── deferred effects ───────────────────────────────────────────────

    /// Deliver the oldest pending effect. Tests and the demo binary drive
    /// this synchronously instead of waiting on timers.
    pub fn settle_next(&mut self) -> DomainResult<Option<SettledEffect>> {
        let Some(effect) = self.effects.complete_next() else {
            return Ok(None);
        };

        match effect {
            PendingEffect::RouteAdvance => {
                if !self.route.is_active() {
                    // Route was cancelled; the pending step has nothing to
                    // show, and cancelled completions have no side effects.
                    return Ok(None);
                }
                self.route.advance();
                Ok(Some(SettledEffect::RouteAdvanced {
                    step: self.route.current_step(),
                    instruction: self.route.instruction().unwrap_or(""),
                }))
            }
            PendingEffect::CheckoutSettle => {
                self.dispatch_cart(CartCommand::SettleCheckout(SettleCheckout {
                    cart_id: self.cart.id_typed(),
                    occurred_at: Utc::now(),
                }))?;
                info!("checkout settled");
                Ok(Some(SettledEffect::CheckoutSettled {
                    message: CHECKOUT_SUCCESS.to_string(),
                }))
            }
        }
    }

    /// Pending effects not yet delivered.
    pub fn pending_effects(&self) -> usize {
        self.effects.len()
    }

    // ── dispatch plumbing ──────────────────────────────────────────────

    fn dispatch_session(&mut self, command: SessionCommand) -> DomainResult<()> {
        let events = execute(&mut self.session, &command)?;
        for event in events {
            debug!(event = event.event_type(), "session event");
            self.journal.append(AppEvent::Session(event));
        }
        Ok(())
    }

    fn dispatch_cart(&mut self, command: CartCommand) -> DomainResult<()> {
        let events = execute(&mut self.cart, &command)?;
        for event in events {
            debug!(event = event.event_type(), "cart event");
            self.journal.append(AppEvent::Cart(event));
        }
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
