//! Guided in-store navigation: a fixed script shown one step at a time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use storepilot_catalog::AisleCode;

/// Scripted walking directions. The script is the same for every
/// destination; only the destination label differs.
pub const ROUTE_STEPS: [&str; 5] = [
    "Head towards the back of the store",
    "Turn right at the pharmacy",
    "Walk straight for 50 feet",
    "Turn left into Aisle A12",
    "Your item is on the right side, middle shelf",
];

/// Advisory pause between steps.
pub const STEP_DELAY: Duration = Duration::from_secs(3);

/// Progress through the scripted route to a destination aisle.
///
/// Invariant: `step < ROUTE_STEPS.len()` whenever a route is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidedRoute {
    destination: Option<AisleCode>,
    step: usize,
}

impl GuidedRoute {
    pub fn idle() -> Self {
        Self {
            destination: None,
            step: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.destination.is_some()
    }

    pub fn destination(&self) -> Option<&AisleCode> {
        self.destination.as_ref()
    }

    /// Begin guiding towards an aisle, restarting from the first step.
    pub fn start(&mut self, destination: AisleCode) {
        self.destination = Some(destination);
        self.step = 0;
    }

    /// Zero-based index of the current step.
    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Current instruction, if navigating.
    pub fn instruction(&self) -> Option<&'static str> {
        self.is_active().then(|| ROUTE_STEPS[self.step])
    }

    /// Step forward; stays on the final step once reached.
    pub fn advance(&mut self) {
        if self.is_active() && self.step + 1 < ROUTE_STEPS.len() {
            self.step += 1;
        }
    }

    pub fn is_final_step(&self) -> bool {
        self.is_active() && self.step == ROUTE_STEPS.len() - 1
    }

    /// Fraction of steps shown, matching the on-screen progress bar.
    pub fn progress(&self) -> f64 {
        if self.is_active() {
            (self.step + 1) as f64 / ROUTE_STEPS.len() as f64
        } else {
            0.0
        }
    }

    /// Stop guiding. Dropping a route mid-way has no other effects.
    pub fn cancel(&mut self) {
        self.destination = None;
        self.step = 0;
    }
}

impl Default for GuidedRoute {
    fn default() -> Self {
        Self::idle()
    }
}
