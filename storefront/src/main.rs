//! Marsline storefront demo binary
//!
//! Walks one purchase session end to end: add tickets, name passengers,
//! pick add-ons, checkout, and compose the export document with a stub
//! renderer.

use marsline_core::environment::SystemClock;
use marsline_runtime::Store;
use marsline_storefront::export::{self, TicketImage, TicketRenderer};
use marsline_storefront::i18n::{CatalogTranslator, Translator};
use marsline_storefront::{
    CartAction, CartEnvironment, CartReducer, FinalizedTicket, MealPlanType, PassengerPatch,
    RandomTicketIds, StorefrontConfig, StorefrontState, WifiDuration, WifiSpeed,
    standard_catalog,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Stand-in renderer: emits a fixed-size blank bitmap per ticket
struct BlankRenderer;

#[async_trait::async_trait]
impl TicketRenderer for BlankRenderer {
    async fn render(&self, _ticket: &FinalizedTicket) -> Option<TicketImage> {
        Some(TicketImage {
            width_px: 760,
            height_px: 240,
            data: vec![0xFF; 760 * 240 / 8],
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("marsline={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let translator = CatalogTranslator::english();
    println!("=== {} ===\n", translator.translate("header.title", &[]));

    let catalog = standard_catalog();
    for tier in catalog.tiers() {
        println!("  {} - ${}", tier.tier, tier.price);
    }

    let env = CartEnvironment::new(
        catalog,
        Arc::new(RandomTicketIds),
        Arc::new(SystemClock),
        config.checkout,
    );
    let store = Store::new(StorefrontState::new(), CartReducer::new(), env);

    // Two pioneers and one luxury passenger
    store.send(CartAction::OpenCart).await?;
    for _ in 0..2 {
        store
            .send(CartAction::AddToCart {
                tier: "Red Planet Pioneer".to_string(),
            })
            .await?;
    }
    store
        .send(CartAction::AddToCart {
            tier: "Olympus Prime".to_string(),
        })
        .await?;

    store
        .send(CartAction::UpdatePassenger {
            tier: "Red Planet Pioneer".to_string(),
            index: 0,
            patch: PassengerPatch::rename("Ada Lovelace"),
        })
        .await?;
    store
        .send(CartAction::UpdatePassenger {
            tier: "Red Planet Pioneer".to_string(),
            index: 1,
            patch: PassengerPatch::rename("Grace Hopper"),
        })
        .await?;
    store
        .send(CartAction::UpdatePassenger {
            tier: "Red Planet Pioneer".to_string(),
            index: 1,
            patch: PassengerPatch::select_meal_plan(MealPlanType::Vegetarian),
        })
        .await?;
    store
        .send(CartAction::UpdatePassenger {
            tier: "Olympus Prime".to_string(),
            index: 0,
            patch: PassengerPatch::rename("Katherine Johnson"),
        })
        .await?;
    store
        .send(CartAction::UpdatePassenger {
            tier: "Olympus Prime".to_string(),
            index: 0,
            patch: PassengerPatch::select_wifi(WifiSpeed::Ultra, WifiDuration::SixMonths),
        })
        .await?;

    store.send(CartAction::Checkout).await?;

    let tickets = store.state(|s| s.tickets.clone()).await;
    println!("\nIssued {} tickets:", tickets.len());
    for ticket in &tickets {
        println!(
            "  {}  {}  ({})",
            ticket.ticket_id, ticket.name, ticket.tier
        );
    }

    let document = export::compose_document(&tickets, &BlankRenderer).await;
    println!(
        "\nExport document: {} page(s), {} ticket image(s)",
        document.pages.len(),
        document.placement_count()
    );

    Ok(())
}
