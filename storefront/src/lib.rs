//! # Marsline Storefront
//!
//! Storefront-and-checkout core for Mars travel tickets: browse tiers,
//! add passengers to a cart, configure per-passenger add-ons (meal plan,
//! Wi-Fi package), checkout into finalized ticket records, and drive a
//! paginated ticket-document export.
//!
//! The domain is a single-session state machine built on the Marsline
//! reducer architecture:
//!
//! - [`catalog`] - the fixed, injected tier table
//! - [`types`] - cart items, passengers, add-on selections, ticket ids
//! - [`pricing`] - pure add-on price derivation
//! - [`cart`] - the cart/checkout reducer (the system's core)
//! - [`materializer`] - cart-to-ticket conversion at checkout
//! - [`export`] - ordered async composition of the printable document
//! - [`i18n`] - the translation collaborator boundary
//! - [`config`] - environment-variable configuration
//!
//! There is no server, no persistence, and no concurrent access: all
//! state belongs to one interactive session and every operation is a
//! synchronous transformation of small in-memory collections.

/// The tier catalog
pub mod catalog;
/// The cart/checkout state machine
pub mod cart;
/// Environment-variable configuration
pub mod config;
/// Paginated export composition
pub mod export;
/// Translation boundary
pub mod i18n;
/// Ticket materialization at checkout
pub mod materializer;
/// Add-on pricing
pub mod pricing;
/// Domain value objects
pub mod types;

pub use cart::{CartAction, CartEnvironment, CartError, CartReducer, Phase, StorefrontState};
pub use catalog::{Catalog, TicketTier, standard_catalog};
pub use config::{CheckoutSettings, StorefrontConfig};
pub use materializer::{RandomTicketIds, SequencedTicketIds, TicketIdSource};
pub use types::{
    CartItem, FieldPatch, FinalizedTicket, MAX_TIER_QUANTITY, MealPlanSelection, MealPlanType,
    PassengerInfo, PassengerPatch, TicketId, WifiDuration, WifiPackageSelection, WifiSpeed,
};
