//! The cart/checkout state machine.
//!
//! Owns cart contents, passenger records, add-on selection, validation,
//! and the transition into the confirmed (post-checkout) phase. Implemented
//! as a pure reducer: every operation is a synchronous transformation of
//! the session state, and all effects are `Effect::None`.
//!
//! Error policy: quantity-cap and checkout-validation failures are
//! user-facing and block the operation; a patch addressed at a tier or
//! passenger slot that does not resolve never mutates the cart, but is
//! recorded in `last_error` (and logged) rather than silently swallowed,
//! so the contract stays testable.

use crate::catalog::Catalog;
use crate::config::CheckoutSettings;
use crate::materializer::{self, TicketIdSource};
use crate::types::{CartItem, FinalizedTicket, PassengerPatch};
use marsline_core::{
    SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec,
};
use std::sync::Arc;
use thiserror::Error;

/// Session phase of the storefront
///
/// `Confirmed` is terminal: once tickets are issued the session only reads
/// them (and exports); there is no path back to browsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// Browsing the catalog, cart panel closed
    #[default]
    Browsing,
    /// Cart panel open for editing
    CartOpen,
    /// Checkout completed, tickets issued
    Confirmed,
}

/// Errors surfaced by cart operations
///
/// Everything here is locally recoverable: the user corrects input and
/// retries. Nothing is retried automatically and nothing is fatal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CartError {
    /// A tier is already at the per-tier ticket cap
    #[error("maximum {max} tickets per tier allowed for {tier}")]
    LimitExceeded {
        /// Tier that hit the cap
        tier: String,
        /// The cap itself
        max: usize,
    },

    /// One or more passengers have blank names at checkout
    #[error("{blank_passengers} passenger name(s) missing at checkout")]
    ValidationError {
        /// Number of passengers with blank names
        blank_passengers: usize,
    },

    /// An operation addressed a tier or passenger slot that does not exist
    #[error("no cart entry for tier {tier:?} (passenger index {index:?})")]
    NotFound {
        /// Tier name that failed to resolve
        tier: String,
        /// Passenger index, when the operation addressed one
        index: Option<usize>,
    },
}

/// Complete session state for the storefront
#[derive(Clone, Debug, Default)]
pub struct StorefrontState {
    /// Current session phase
    pub phase: Phase,
    /// Cart items in first-added tier order
    pub cart: Vec<CartItem>,
    /// Tickets issued at checkout (empty before)
    pub tickets: Vec<FinalizedTicket>,
    /// Most recent rejected operation, cleared by the next success
    pub last_error: Option<CartError>,
}

impl StorefrontState {
    /// Fresh session: browsing, empty cart
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart item for a tier, if present
    #[must_use]
    pub fn item(&self, tier: &str) -> Option<&CartItem> {
        self.cart.iter().find(|item| item.tier == tier)
    }

    /// Total tickets across all cart items
    #[must_use]
    pub fn total_quantity(&self) -> usize {
        self.cart.iter().map(CartItem::quantity).sum()
    }
}

/// Actions the UI layer can drive into the state machine
#[derive(Clone, Debug)]
pub enum CartAction {
    /// Open the cart panel
    OpenCart,
    /// Close the cart panel
    CloseCart,
    /// Add one ticket for a tier (creates the item on first add)
    AddToCart {
        /// Tier display name
        tier: String,
    },
    /// Merge a partial update into one passenger
    UpdatePassenger {
        /// Tier display name
        tier: String,
        /// Zero-based passenger slot
        index: usize,
        /// Fields to change
        patch: PassengerPatch,
    },
    /// Validate the cart and issue tickets
    Checkout,
}

/// Injected dependencies for the cart reducer
#[derive(Clone)]
pub struct CartEnvironment {
    /// Immutable tier table
    pub catalog: Catalog,
    /// Ticket-id source used at checkout
    pub ids: Arc<dyn TicketIdSource>,
    /// Clock stamping ticket issue times
    pub clock: Arc<dyn Clock>,
    /// Checkout behavior knobs
    pub checkout: CheckoutSettings,
}

impl CartEnvironment {
    /// Create an environment
    #[must_use]
    pub fn new(
        catalog: Catalog,
        ids: Arc<dyn TicketIdSource>,
        clock: Arc<dyn Clock>,
        checkout: CheckoutSettings,
    ) -> Self {
        Self {
            catalog,
            ids,
            clock,
            checkout,
        }
    }
}

/// Reducer for the cart/checkout state machine
#[derive(Clone, Copy, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Create a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn reject(state: &mut StorefrontState, error: CartError) {
        tracing::warn!(%error, "cart operation rejected");
        state.last_error = Some(error);
    }

    fn add_to_cart(state: &mut StorefrontState, env: &CartEnvironment, tier: String) {
        if !env.catalog.contains(&tier) {
            // Defensive: the UI only offers catalog tiers
            Self::reject(state, CartError::NotFound { tier, index: None });
            return;
        }

        match state.cart.iter().position(|item| item.tier == tier) {
            Some(pos) if state.cart[pos].at_capacity() => {
                Self::reject(
                    state,
                    CartError::LimitExceeded {
                        tier,
                        max: crate::types::MAX_TIER_QUANTITY,
                    },
                );
                return;
            },
            Some(pos) => {
                state.cart[pos]
                    .passengers
                    .push(crate::types::PassengerInfo::blank());
            },
            None => {
                state.cart.push(CartItem::new(tier));
            },
        }
        state.last_error = None;
    }

    fn update_passenger(
        state: &mut StorefrontState,
        tier: &str,
        index: usize,
        patch: &PassengerPatch,
    ) {
        let resolved = state
            .cart
            .iter()
            .position(|item| item.tier == tier)
            .filter(|&pos| index < state.cart[pos].passengers.len());

        let Some(pos) = resolved else {
            Self::reject(
                state,
                CartError::NotFound {
                    tier: tier.to_string(),
                    index: Some(index),
                },
            );
            return;
        };

        patch.apply(&mut state.cart[pos].passengers[index]);
        state.last_error = None;
    }

    fn checkout(state: &mut StorefrontState, env: &CartEnvironment) {
        let blank_passengers = state
            .cart
            .iter()
            .flat_map(|item| &item.passengers)
            .filter(|p| !p.has_name())
            .count();

        if blank_passengers > 0 {
            Self::reject(state, CartError::ValidationError { blank_passengers });
            return;
        }

        state.tickets = materializer::materialize(&state.cart, &*env.ids, env.clock.now());
        state.phase = Phase::Confirmed;
        if env.checkout.clear_cart_after_checkout {
            state.cart.clear();
        }
        state.last_error = None;
        tracing::debug!(tickets = state.tickets.len(), "checkout confirmed");
    }
}

impl Reducer for CartReducer {
    type State = StorefrontState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if state.phase == Phase::Confirmed {
            // Terminal phase: the session only reads issued tickets
            tracing::warn!(?action, "action ignored after checkout confirmation");
            return smallvec![Effect::None];
        }

        match action {
            CartAction::OpenCart => {
                state.phase = Phase::CartOpen;
            },
            CartAction::CloseCart => {
                state.phase = Phase::Browsing;
            },
            CartAction::AddToCart { tier } => {
                Self::add_to_cart(state, env, tier);
            },
            CartAction::UpdatePassenger { tier, index, patch } => {
                Self::update_passenger(state, &tier, index, &patch);
            },
            CartAction::Checkout => {
                Self::checkout(state, env);
            },
        }

        // Pure state machine: export and rendering are driven by the shell
        smallvec![Effect::None]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use crate::catalog::standard_catalog;
    use crate::materializer::SequencedTicketIds;
    use crate::types::{MAX_TIER_QUANTITY, MealPlanType, WifiDuration, WifiSpeed};
    use marsline_testing::{ReducerTest, assertions, test_clock};

    const PIONEER: &str = "Red Planet Pioneer";

    fn test_env() -> CartEnvironment {
        CartEnvironment::new(
            standard_catalog(),
            Arc::new(SequencedTicketIds::new()),
            Arc::new(test_clock()),
            CheckoutSettings::default(),
        )
    }

    fn clearing_env() -> CartEnvironment {
        CartEnvironment::new(
            standard_catalog(),
            Arc::new(SequencedTicketIds::new()),
            Arc::new(test_clock()),
            CheckoutSettings {
                clear_cart_after_checkout: true,
            },
        )
    }

    /// Drive several actions through the reducer directly
    fn run_actions(state: &mut StorefrontState, env: &CartEnvironment, actions: Vec<CartAction>) {
        let reducer = CartReducer::new();
        for action in actions {
            reducer.reduce(state, action, env);
        }
    }

    fn filled_cart_state(env: &CartEnvironment) -> StorefrontState {
        let mut state = StorefrontState::new();
        run_actions(
            &mut state,
            env,
            vec![
                CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                },
                CartAction::UpdatePassenger {
                    tier: PIONEER.to_string(),
                    index: 0,
                    patch: crate::types::PassengerPatch::rename("Ada Lovelace"),
                },
            ],
        );
        state
    }

    #[test]
    fn add_creates_item_with_one_blank_passenger() {
        ReducerTest::new(CartReducer::new())
            .with_env(test_env())
            .given_state(StorefrontState::new())
            .when_action(CartAction::AddToCart {
                tier: PIONEER.to_string(),
            })
            .then_state(|state| {
                let item = state.item(PIONEER).unwrap();
                assert_eq!(item.quantity(), 1);
                assert_eq!(item.passengers[0].name, "");
                assert!(item.passengers[0].meal_plan.is_none());
                assert!(state.last_error.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn adding_n_times_yields_quantity_n() {
        let env = test_env();
        let mut state = StorefrontState::new();
        for _ in 0..7 {
            run_actions(
                &mut state,
                &env,
                vec![CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                }],
            );
        }

        let item = state.item(PIONEER).unwrap();
        assert_eq!(item.quantity(), 7);
        assert_eq!(item.passengers.len(), 7);
    }

    #[test]
    fn eleventh_add_is_rejected_and_cart_unchanged() {
        let env = test_env();
        let mut state = StorefrontState::new();
        for _ in 0..MAX_TIER_QUANTITY {
            run_actions(
                &mut state,
                &env,
                vec![CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                }],
            );
        }
        let before = state.cart.clone();

        run_actions(
            &mut state,
            &env,
            vec![CartAction::AddToCart {
                tier: PIONEER.to_string(),
            }],
        );

        assert_eq!(state.cart, before);
        assert!(matches!(
            state.last_error,
            Some(CartError::LimitExceeded { max: 10, .. })
        ));
    }

    #[test]
    fn cap_applies_per_tier_not_per_cart() {
        let env = test_env();
        let mut state = StorefrontState::new();
        for _ in 0..MAX_TIER_QUANTITY {
            run_actions(
                &mut state,
                &env,
                vec![CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                }],
            );
        }

        run_actions(
            &mut state,
            &env,
            vec![CartAction::AddToCart {
                tier: "Martian Elite".to_string(),
            }],
        );

        assert_eq!(state.item("Martian Elite").unwrap().quantity(), 1);
        assert!(state.last_error.is_none());
        assert_eq!(state.total_quantity(), 11);
    }

    #[test]
    fn unknown_tier_add_records_not_found() {
        ReducerTest::new(CartReducer::new())
            .with_env(test_env())
            .given_state(StorefrontState::new())
            .when_action(CartAction::AddToCart {
                tier: "Lunar Shuttle".to_string(),
            })
            .then_state(|state| {
                assert!(state.cart.is_empty());
                assert!(matches!(
                    state.last_error,
                    Some(CartError::NotFound { index: None, .. })
                ));
            })
            .run();
    }

    #[test]
    fn update_merges_partial_patch() {
        let env = test_env();
        let mut state = StorefrontState::new();
        run_actions(
            &mut state,
            &env,
            vec![
                CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                },
                CartAction::UpdatePassenger {
                    tier: PIONEER.to_string(),
                    index: 0,
                    patch: crate::types::PassengerPatch::select_meal_plan(MealPlanType::Premium),
                },
                CartAction::UpdatePassenger {
                    tier: PIONEER.to_string(),
                    index: 0,
                    patch: crate::types::PassengerPatch::rename("Ada Lovelace"),
                },
            ],
        );

        let passenger = &state.item(PIONEER).unwrap().passengers[0];
        assert_eq!(passenger.name, "Ada Lovelace");
        // Rename did not clear the earlier meal plan selection
        assert_eq!(passenger.meal_plan.unwrap().price, 1000);
    }

    #[test]
    fn update_clear_sentinel_removes_only_that_field() {
        let env = test_env();
        let mut state = StorefrontState::new();
        run_actions(
            &mut state,
            &env,
            vec![
                CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                },
                CartAction::UpdatePassenger {
                    tier: PIONEER.to_string(),
                    index: 0,
                    patch: crate::types::PassengerPatch::select_wifi(
                        WifiSpeed::Ultra,
                        WifiDuration::ThreeMonths,
                    ),
                },
                CartAction::UpdatePassenger {
                    tier: PIONEER.to_string(),
                    index: 0,
                    patch: crate::types::PassengerPatch::select_meal_plan(MealPlanType::Standard),
                },
                CartAction::UpdatePassenger {
                    tier: PIONEER.to_string(),
                    index: 0,
                    patch: crate::types::PassengerPatch::clear_wifi(),
                },
            ],
        );

        let passenger = &state.item(PIONEER).unwrap().passengers[0];
        assert!(passenger.wifi_package.is_none());
        assert!(passenger.meal_plan.is_some());
    }

    #[test]
    fn update_unresolved_index_leaves_cart_untouched() {
        let env = test_env();
        let mut state = filled_cart_state(&env);
        let before = state.cart.clone();

        run_actions(
            &mut state,
            &env,
            vec![CartAction::UpdatePassenger {
                tier: PIONEER.to_string(),
                index: 5,
                patch: crate::types::PassengerPatch::rename("Nobody"),
            }],
        );

        assert_eq!(state.cart, before);
        assert!(matches!(
            state.last_error,
            Some(CartError::NotFound { index: Some(5), .. })
        ));
    }

    #[test]
    fn checkout_with_blank_name_fails_and_preserves_cart() {
        let env = test_env();
        let mut state = StorefrontState::new();
        run_actions(
            &mut state,
            &env,
            vec![
                CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                },
                CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                },
                CartAction::UpdatePassenger {
                    tier: PIONEER.to_string(),
                    index: 0,
                    patch: crate::types::PassengerPatch::rename("Ada Lovelace"),
                },
                // Whitespace-only names are still blank
                CartAction::UpdatePassenger {
                    tier: PIONEER.to_string(),
                    index: 1,
                    patch: crate::types::PassengerPatch::rename("   "),
                },
            ],
        );
        let before = state.cart.clone();

        run_actions(&mut state, &env, vec![CartAction::Checkout]);

        assert_eq!(state.cart, before);
        assert!(state.tickets.is_empty());
        assert_ne!(state.phase, Phase::Confirmed);
        assert_eq!(
            state.last_error,
            Some(CartError::ValidationError { blank_passengers: 1 })
        );
    }

    #[test]
    fn checkout_issues_tickets_and_confirms() {
        let env = test_env();
        let mut state = filled_cart_state(&env);

        run_actions(&mut state, &env, vec![CartAction::Checkout]);

        assert_eq!(state.phase, Phase::Confirmed);
        assert_eq!(state.tickets.len(), 1);
        let ticket = &state.tickets[0];
        assert_eq!(ticket.name, "Ada Lovelace");
        assert_eq!(ticket.tier, PIONEER);
        assert!(ticket.ticket_id.is_well_formed());
        assert!(ticket.meal_plan.is_none());
        assert!(ticket.wifi_package.is_none());
        // Default behavior matches the original UI: cart survives checkout
        assert_eq!(state.cart.len(), 1);
    }

    #[test]
    fn checkout_can_clear_cart_when_configured() {
        let env = clearing_env();
        let mut state = filled_cart_state(&env);

        run_actions(&mut state, &env, vec![CartAction::Checkout]);

        assert_eq!(state.phase, Phase::Confirmed);
        assert_eq!(state.tickets.len(), 1);
        assert!(state.cart.is_empty());
    }

    #[test]
    fn confirmed_phase_is_terminal() {
        let env = test_env();
        let mut state = filled_cart_state(&env);
        run_actions(&mut state, &env, vec![CartAction::Checkout]);
        let after_checkout = state.clone();

        run_actions(
            &mut state,
            &env,
            vec![
                CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                },
                CartAction::OpenCart,
                CartAction::Checkout,
            ],
        );

        assert_eq!(state.cart, after_checkout.cart);
        assert_eq!(state.tickets, after_checkout.tickets);
        assert_eq!(state.phase, Phase::Confirmed);
    }

    #[test]
    fn open_and_close_cart_toggle_phase() {
        let env = test_env();
        let mut state = StorefrontState::new();

        run_actions(&mut state, &env, vec![CartAction::OpenCart]);
        assert_eq!(state.phase, Phase::CartOpen);

        run_actions(&mut state, &env, vec![CartAction::CloseCart]);
        assert_eq!(state.phase, Phase::Browsing);
    }

    #[test]
    fn success_clears_previous_error() {
        let env = test_env();
        let mut state = StorefrontState::new();
        run_actions(
            &mut state,
            &env,
            vec![
                CartAction::AddToCart {
                    tier: "Lunar Shuttle".to_string(),
                },
                CartAction::AddToCart {
                    tier: PIONEER.to_string(),
                },
            ],
        );

        assert!(state.last_error.is_none());
    }
}
