//! Demo walkthrough: sign in, enter the store, find a product, chat, fill
//! the cart, apply a coupon, and check out — all over fixture data, all
//! synchronous.

use anyhow::Result;
use tracing::info;

use storepilot_catalog::ProductId;
use storepilot_session::{App, SettledEffect, Tab};

fn main() -> Result<()> {
    storepilot_observability::init();

    let mut app = App::new();

    app.sign_in("sarah.johnson@email.com")?;
    app.enter_store()?;
    info!(
        shopper = %app.shopper().name,
        points = app.shopper().loyalty_points(),
        tier = %app.shopper().tier(),
        "entered store"
    );

    for (product, reason) in app.recommended() {
        info!(product = %product.name, reason, "recommended");
    }

    let milk = ProductId::from("1");
    for hit in app.search("milk") {
        let section = app
            .layout()
            .section(&hit.aisle)
            .map(|s| s.section.clone())
            .unwrap_or_default();
        info!(product = %hit.name, aisle = %hit.aisle, %section, price = %hit.price, "search hit");
    }

    app.start_route(&milk)?;
    while let Some(SettledEffect::RouteAdvanced { step, instruction }) = app.settle_next()? {
        info!(step, instruction, "route");
    }

    app.select_tab(Tab::Assistant)?;
    app.send_message("Where can I find organic milk?")?;
    while let Some(message) = app.complete_reply() {
        info!(reply = %message.content, "assistant");
    }

    app.select_tab(Tab::Cart)?;
    app.add_to_cart(&milk, 1)?;
    app.add_to_cart(&ProductId::from("2"), 2)?;
    app.add_to_cart(&ProductId::from("5"), 1)?;
    app.apply_coupon("ORGANIC15")?;

    let totals = app.totals();
    info!(
        subtotal = %totals.subtotal,
        discount = %totals.discount,
        tax = %totals.tax,
        total = %totals.total,
        "cart totals"
    );

    app.begin_checkout()?;
    while let Some(effect) = app.settle_next()? {
        if let SettledEffect::CheckoutSettled { message } = effect {
            info!(%message, "checkout");
        }
    }

    info!(events = app.journal().len(), "session journal");
    Ok(())
}
