use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storepilot_catalog::{Category, ProductId};
use storepilot_core::{Aggregate, AggregateRoot, Amount, DomainError, EntityId};
use storepilot_events::Event;

use crate::pricing::{Totals, compute_totals, rule_for};

/// Cart identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub EntityId);

impl CartId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CartId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Cart lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    Shopping,
    CheckingOut,
    Completed,
}

/// Cart entry pairing a catalog product with a positive quantity.
///
/// The line snapshots the product fields pricing needs (price, category,
/// name); the catalog itself stays out of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Amount,
    pub category: Category,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Amount {
        self.unit_price.times(self.quantity)
    }
}

/// Aggregate root: Cart.
///
/// Lines are owned exclusively by the cart and change only through event
/// application. No line ever has quantity 0: driving a quantity to zero (or
/// below) removes the line entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    id: CartId,
    status: CartStatus,
    lines: Vec<CartLine>,
    coupons: BTreeSet<String>,
    version: u64,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            status: CartStatus::Shopping,
            lines: Vec::new(),
            coupons: BTreeSet::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> CartId {
        self.id
    }

    pub fn status(&self) -> CartStatus {
        self.status
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn coupons(&self) -> &BTreeSet<String> {
        &self.coupons
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.status, CartStatus::Shopping)
    }

    /// Current money summary over lines + applied coupons.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.lines, &self.coupons)
    }
}

impl AggregateRoot for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Amount,
    pub category: Category,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetQuantity.
///
/// `quantity` is signed on purpose: a value ≤ 0 removes the line, which is
/// also the only guard against negative quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ApplyCoupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyCoupon {
    pub cart_id: CartId,
    pub code: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: BeginCheckout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeginCheckout {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SettleCheckout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleCheckout {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    SetQuantity(SetQuantity),
    ApplyCoupon(ApplyCoupon),
    BeginCheckout(BeginCheckout),
    SettleCheckout(SettleCheckout),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Amount,
    pub category: Category,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantitySet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySet {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRemoved {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CouponApplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponApplied {
    pub cart_id: CartId,
    pub code: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckoutStarted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutStarted {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckoutSettled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSettled {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    QuantitySet(QuantitySet),
    LineRemoved(LineRemoved),
    CouponApplied(CouponApplied),
    CheckoutStarted(CheckoutStarted),
    CheckoutSettled(CheckoutSettled),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item_added",
            CartEvent::QuantitySet(_) => "cart.quantity_set",
            CartEvent::LineRemoved(_) => "cart.line_removed",
            CartEvent::CouponApplied(_) => "cart.coupon_applied",
            CartEvent::CheckoutStarted(_) => "cart.checkout_started",
            CartEvent::CheckoutSettled(_) => "cart.checkout_settled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::QuantitySet(e) => e.occurred_at,
            CartEvent::LineRemoved(e) => e.occurred_at,
            CartEvent::CouponApplied(e) => e.occurred_at,
            CartEvent::CheckoutStarted(e) => e.occurred_at,
            CartEvent::CheckoutSettled(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                self.lines.push(CartLine {
                    product_id: e.product_id.clone(),
                    name: e.name.clone(),
                    unit_price: e.unit_price,
                    category: e.category,
                    quantity: e.quantity,
                });
            }
            CartEvent::QuantitySet(e) => {
                for line in &mut self.lines {
                    if line.product_id == e.product_id {
                        line.quantity = e.quantity;
                    }
                }
            }
            CartEvent::LineRemoved(e) => {
                self.lines.retain(|l| l.product_id != e.product_id);
            }
            CartEvent::CouponApplied(e) => {
                self.coupons.insert(e.code.clone());
            }
            CartEvent::CheckoutStarted(_) => {
                self.status = CartStatus::CheckingOut;
            }
            CartEvent::CheckoutSettled(_) => {
                self.status = CartStatus::Completed;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add_item(cmd),
            CartCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
            CartCommand::ApplyCoupon(cmd) => self.handle_apply_coupon(cmd),
            CartCommand::BeginCheckout(cmd) => self.handle_begin_checkout(cmd),
            CartCommand::SettleCheckout(cmd) => self.handle_settle_checkout(cmd),
        }
    }
}

impl Cart {
    fn ensure_cart_id(&self, cart_id: CartId) -> Result<(), DomainError> {
        if self.id != cart_id {
            return Err(DomainError::invariant("cart_id mismatch"));
        }
        Ok(())
    }

    fn ensure_modifiable(&self) -> Result<(), DomainError> {
        if !self.is_modifiable() {
            return Err(DomainError::invariant(
                "cart cannot change once checkout has started",
            ));
        }
        Ok(())
    }

    fn handle_add_item(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;
        self.ensure_modifiable()?;

        if cmd.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        // Adding a product already in the cart bumps its quantity instead of
        // creating a duplicate line.
        if let Some(existing) = self.line(&cmd.product_id) {
            return Ok(vec![CartEvent::QuantitySet(QuantitySet {
                cart_id: cmd.cart_id,
                product_id: cmd.product_id.clone(),
                quantity: existing.quantity.saturating_add(cmd.quantity),
                occurred_at: cmd.occurred_at,
            })]);
        }

        Ok(vec![CartEvent::ItemAdded(ItemAdded {
            cart_id: cmd.cart_id,
            product_id: cmd.product_id.clone(),
            name: cmd.name.clone(),
            unit_price: cmd.unit_price,
            category: cmd.category,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_quantity(&self, cmd: &SetQuantity) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;
        self.ensure_modifiable()?;

        if self.line(&cmd.product_id).is_none() {
            return Err(DomainError::not_found());
        }

        if cmd.quantity <= 0 {
            return Ok(vec![CartEvent::LineRemoved(LineRemoved {
                cart_id: cmd.cart_id,
                product_id: cmd.product_id.clone(),
                occurred_at: cmd.occurred_at,
            })]);
        }

        let quantity = u32::try_from(cmd.quantity)
            .map_err(|_| DomainError::validation("quantity out of range"))?;

        Ok(vec![CartEvent::QuantitySet(QuantitySet {
            cart_id: cmd.cart_id,
            product_id: cmd.product_id.clone(),
            quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_apply_coupon(&self, cmd: &ApplyCoupon) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;
        self.ensure_modifiable()?;

        if rule_for(&cmd.code).is_none() {
            return Err(DomainError::validation("unknown coupon code"));
        }

        // Idempotent: the coupon set is a set, re-applying changes nothing.
        if self.coupons.contains(&cmd.code) {
            return Ok(Vec::new());
        }

        Ok(vec![CartEvent::CouponApplied(CouponApplied {
            cart_id: cmd.cart_id,
            code: cmd.code.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_begin_checkout(&self, cmd: &BeginCheckout) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;

        if self.status != CartStatus::Shopping {
            return Err(DomainError::conflict("checkout already started"));
        }

        Ok(vec![CartEvent::CheckoutStarted(CheckoutStarted {
            cart_id: cmd.cart_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_settle_checkout(&self, cmd: &SettleCheckout) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;

        if self.status != CartStatus::CheckingOut {
            return Err(DomainError::invariant("no checkout in progress"));
        }

        // Settlement is unconditional: there is no payment failure path.
        Ok(vec![CartEvent::CheckoutSettled(CheckoutSettled {
            cart_id: cmd.cart_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storepilot_core::execute;

    fn test_cart_id() -> CartId {
        CartId::new(EntityId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn add_item_cmd(cart_id: CartId, id: &str, price: f64, quantity: u32) -> CartCommand {
        CartCommand::AddItem(AddItem {
            cart_id,
            product_id: ProductId::from(id),
            name: format!("Product {id}"),
            unit_price: Amount::from_dollars(price),
            category: Category::Dairy,
            quantity,
            occurred_at: test_time(),
        })
    }

    fn cart_with_lines() -> Cart {
        let mut cart = Cart::new(test_cart_id());
        let id = cart.id_typed();
        execute(&mut cart, &add_item_cmd(id, "1", 3.48, 1)).unwrap();
        execute(&mut cart, &add_item_cmd(id, "2", 1.98, 2)).unwrap();
        execute(&mut cart, &add_item_cmd(id, "5", 2.48, 1)).unwrap();
        cart
    }

    #[test]
    fn add_item_emits_item_added() {
        let cart = Cart::new(test_cart_id());
        let events = cart
            .handle(&add_item_cmd(cart.id_typed(), "1", 3.48, 1))
            .unwrap();
        assert_eq!(events.len(), 1);
        match &events[0] {
            CartEvent::ItemAdded(e) => {
                assert_eq!(e.product_id, ProductId::from("1"));
                assert_eq!(e.quantity, 1);
            }
            _ => panic!("Expected ItemAdded event"),
        }
    }

    #[test]
    fn adding_an_existing_product_bumps_its_quantity() {
        let mut cart = Cart::new(test_cart_id());
        let id = cart.id_typed();
        execute(&mut cart, &add_item_cmd(id, "1", 3.48, 1)).unwrap();

        let events = execute(&mut cart, &add_item_cmd(id, "1", 3.48, 2)).unwrap();
        match &events[0] {
            CartEvent::QuantitySet(e) => assert_eq!(e.quantity, 3),
            _ => panic!("Expected QuantitySet event"),
        }
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn add_item_rejects_zero_quantity() {
        let cart = Cart::new(test_cart_id());
        let err = cart
            .handle(&add_item_cmd(cart.id_typed(), "1", 3.48, 0))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn setting_quantity_to_zero_removes_exactly_that_line() {
        let mut cart = cart_with_lines();
        let id = cart.id_typed();
        let before: Vec<CartLine> = cart.lines().to_vec();

        execute(
            &mut cart,
            &CartCommand::SetQuantity(SetQuantity {
                cart_id: id,
                product_id: ProductId::from("2"),
                quantity: 0,
                occurred_at: test_time(),
            }),
        )
        .unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert!(cart.line(&ProductId::from("2")).is_none());
        // The other lines are untouched.
        assert_eq!(cart.lines()[0], before[0]);
        assert_eq!(cart.lines()[1], before[2]);
    }

    #[test]
    fn negative_quantity_also_removes_the_line() {
        let mut cart = cart_with_lines();
        let id = cart.id_typed();
        execute(
            &mut cart,
            &CartCommand::SetQuantity(SetQuantity {
                cart_id: id,
                product_id: ProductId::from("1"),
                quantity: -3,
                occurred_at: test_time(),
            }),
        )
        .unwrap();
        assert!(cart.line(&ProductId::from("1")).is_none());
    }

    #[test]
    fn positive_quantity_replaces_the_existing_value() {
        let mut cart = cart_with_lines();
        let id = cart.id_typed();
        execute(
            &mut cart,
            &CartCommand::SetQuantity(SetQuantity {
                cart_id: id,
                product_id: ProductId::from("2"),
                quantity: 5,
                occurred_at: test_time(),
            }),
        )
        .unwrap();
        assert_eq!(cart.line(&ProductId::from("2")).unwrap().quantity, 5);
    }

    #[test]
    fn set_quantity_on_unknown_product_is_not_found() {
        let cart = cart_with_lines();
        let err = cart
            .handle(&CartCommand::SetQuantity(SetQuantity {
                cart_id: cart.id_typed(),
                product_id: ProductId::from("999"),
                quantity: 1,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn applying_a_coupon_twice_has_no_additional_effect() {
        let mut cart = cart_with_lines();
        let id = cart.id_typed();
        let apply = CartCommand::ApplyCoupon(ApplyCoupon {
            cart_id: id,
            code: "ORGANIC15".to_string(),
            occurred_at: test_time(),
        });

        let events = execute(&mut cart, &apply).unwrap();
        assert_eq!(events.len(), 1);
        let discount_after_first = cart.totals().discount;

        let events = execute(&mut cart, &apply).unwrap();
        assert!(events.is_empty());
        assert_eq!(cart.totals().discount, discount_after_first);
        assert_eq!(cart.coupons().len(), 1);
    }

    #[test]
    fn unknown_coupon_codes_are_rejected() {
        let cart = cart_with_lines();
        let err = cart
            .handle(&CartCommand::ApplyCoupon(ApplyCoupon {
                cart_id: cart.id_typed(),
                code: "SAVE99".to_string(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn cart_cannot_change_after_checkout_starts() {
        let mut cart = cart_with_lines();
        let id = cart.id_typed();
        execute(
            &mut cart,
            &CartCommand::BeginCheckout(BeginCheckout {
                cart_id: id,
                occurred_at: test_time(),
            }),
        )
        .unwrap();
        assert_eq!(cart.status(), CartStatus::CheckingOut);

        let err = cart
            .handle(&add_item_cmd(id, "4", 8.97, 1))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn checkout_settles_unconditionally_once_started() {
        let mut cart = cart_with_lines();
        let id = cart.id_typed();
        execute(
            &mut cart,
            &CartCommand::BeginCheckout(BeginCheckout {
                cart_id: id,
                occurred_at: test_time(),
            }),
        )
        .unwrap();
        execute(
            &mut cart,
            &CartCommand::SettleCheckout(SettleCheckout {
                cart_id: id,
                occurred_at: test_time(),
            }),
        )
        .unwrap();
        assert_eq!(cart.status(), CartStatus::Completed);
    }

    #[test]
    fn settle_without_begin_is_an_invariant_violation() {
        let cart = cart_with_lines();
        let err = cart
            .handle(&CartCommand::SettleCheckout(SettleCheckout {
                cart_id: cart.id_typed(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn version_increments_on_apply() {
        let mut cart = Cart::new(test_cart_id());
        assert_eq!(cart.version(), 0);
        let id = cart.id_typed();
        execute(&mut cart, &add_item_cmd(id, "1", 3.48, 1)).unwrap();
        assert_eq!(cart.version(), 1);
        execute(&mut cart, &add_item_cmd(id, "2", 1.98, 1)).unwrap();
        assert_eq!(cart.version(), 2);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let cart = cart_with_lines();
        let before = cart.clone();

        let cmd = add_item_cmd(cart.id_typed(), "4", 8.97, 1);
        let events1 = cart.handle(&cmd).unwrap();
        let events2 = cart.handle(&cmd).unwrap();

        assert_eq!(cart, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn apply_is_deterministic() {
        let id = test_cart_id();
        let events = vec![
            CartEvent::ItemAdded(ItemAdded {
                cart_id: id,
                product_id: ProductId::from("1"),
                name: "Product 1".to_string(),
                unit_price: Amount::from_dollars(3.48),
                category: Category::Dairy,
                quantity: 1,
                occurred_at: test_time(),
            }),
            CartEvent::QuantitySet(QuantitySet {
                cart_id: id,
                product_id: ProductId::from("1"),
                quantity: 4,
                occurred_at: test_time(),
            }),
            CartEvent::CouponApplied(CouponApplied {
                cart_id: id,
                code: "ORGANIC15".to_string(),
                occurred_at: test_time(),
            }),
        ];

        let mut cart1 = Cart::new(id);
        let mut cart2 = Cart::new(id);
        for event in &events {
            cart1.apply(event);
            cart2.apply(event);
        }

        assert_eq!(cart1, cart2);
        assert_eq!(cart1.version(), 3);
        assert_eq!(cart1.lines()[0].quantity, 4);
    }
}
