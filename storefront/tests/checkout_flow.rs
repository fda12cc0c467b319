//! End-to-end purchase flows through the Store runtime.

#![allow(clippy::unwrap_used)] // Test code can unwrap

use marsline_runtime::Store;
use marsline_storefront::{
    CartAction, CartEnvironment, CartError, CartReducer, CheckoutSettings, PassengerPatch, Phase,
    SequencedTicketIds, StorefrontState, standard_catalog,
};
use marsline_testing::test_clock;
use std::collections::HashSet;
use std::sync::Arc;

type CartStore = Store<StorefrontState, CartAction, CartEnvironment, CartReducer>;

fn store() -> CartStore {
    let env = CartEnvironment::new(
        standard_catalog(),
        Arc::new(SequencedTicketIds::new()),
        Arc::new(test_clock()),
        CheckoutSettings::default(),
    );
    Store::new(StorefrontState::new(), CartReducer::new(), env)
}

async fn add(store: &CartStore, tier: &str) {
    store
        .send(CartAction::AddToCart {
            tier: tier.to_string(),
        })
        .await
        .unwrap();
}

async fn rename(store: &CartStore, tier: &str, index: usize, name: &str) {
    store
        .send(CartAction::UpdatePassenger {
            tier: tier.to_string(),
            index,
            patch: PassengerPatch::rename(name),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn single_pioneer_scenario() {
    let store = store();

    add(&store, "Red Planet Pioneer").await;

    let item = store
        .state(|s| s.item("Red Planet Pioneer").cloned())
        .await
        .unwrap();
    assert_eq!(item.quantity(), 1);
    assert_eq!(item.passengers[0].name, "");

    rename(&store, "Red Planet Pioneer", 0, "Ada Lovelace").await;
    let name = store
        .state(|s| s.item("Red Planet Pioneer").unwrap().passengers[0].name.clone())
        .await;
    assert_eq!(name, "Ada Lovelace");

    store.send(CartAction::Checkout).await.unwrap();

    let (phase, tickets) = store.state(|s| (s.phase, s.tickets.clone())).await;
    assert_eq!(phase, Phase::Confirmed);
    assert_eq!(tickets.len(), 1);
    let ticket = &tickets[0];
    assert_eq!(ticket.name, "Ada Lovelace");
    assert_eq!(ticket.tier, "Red Planet Pioneer");
    assert!(ticket.ticket_id.is_well_formed());
    assert!(ticket.meal_plan.is_none());
    assert!(ticket.wifi_package.is_none());
}

#[tokio::test]
async fn multi_tier_checkout_preserves_order_and_uniqueness() {
    let store = store();

    for _ in 0..3 {
        add(&store, "Red Planet Pioneer").await;
    }
    for _ in 0..2 {
        add(&store, "Martian Elite").await;
    }
    for (index, name) in ["One", "Two", "Three"].iter().enumerate() {
        rename(&store, "Red Planet Pioneer", index, name).await;
    }
    for (index, name) in ["Four", "Five"].iter().enumerate() {
        rename(&store, "Martian Elite", index, name).await;
    }

    store.send(CartAction::Checkout).await.unwrap();

    let tickets = store.state(|s| s.tickets.clone()).await;
    assert_eq!(tickets.len(), 5);

    // Cart order, then passenger order within each item
    let names: Vec<_> = tickets.iter().map(|t| t.name.clone()).collect();
    assert_eq!(names, ["One", "Two", "Three", "Four", "Five"]);
    assert!(tickets[..3].iter().all(|t| t.tier == "Red Planet Pioneer"));
    assert!(tickets[3..].iter().all(|t| t.tier == "Martian Elite"));

    let ids: HashSet<_> = tickets.iter().map(|t| t.ticket_id.clone()).collect();
    assert_eq!(ids.len(), tickets.len());
    assert!(tickets.iter().all(|t| t.ticket_id.is_well_formed()));
}

#[tokio::test]
async fn failed_checkout_leaves_cart_intact() {
    let store = store();

    add(&store, "Olympus Prime").await;
    add(&store, "Olympus Prime").await;
    rename(&store, "Olympus Prime", 0, "Katherine Johnson").await;

    let before = store.state(|s| s.cart.clone()).await;
    store.send(CartAction::Checkout).await.unwrap();

    let (cart, tickets, error, phase) = store
        .state(|s| (s.cart.clone(), s.tickets.clone(), s.last_error.clone(), s.phase))
        .await;
    assert_eq!(cart, before);
    assert!(tickets.is_empty());
    assert_eq!(error, Some(CartError::ValidationError { blank_passengers: 1 }));
    assert_ne!(phase, Phase::Confirmed);

    // Correct the input and retry: locally recoverable
    rename(&store, "Olympus Prime", 1, "Dorothy Vaughan").await;
    store.send(CartAction::Checkout).await.unwrap();
    assert_eq!(store.state(|s| s.tickets.len()).await, 2);
}

#[tokio::test]
async fn limit_is_surfaced_through_store() {
    let store = store();

    for _ in 0..10 {
        add(&store, "Martian Elite").await;
    }
    add(&store, "Martian Elite").await;

    let (quantity, error) = store
        .state(|s| {
            (
                s.item("Martian Elite").map(marsline_storefront::CartItem::quantity),
                s.last_error.clone(),
            )
        })
        .await;
    assert_eq!(quantity, Some(10));
    assert!(matches!(error, Some(CartError::LimitExceeded { .. })));
}
