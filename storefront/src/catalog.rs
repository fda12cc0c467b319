//! The tier catalog: the fixed list of purchasable ticket classes.
//!
//! The catalog is built once at startup and injected into the cart
//! environment as an immutable table. Tier identity is the display name;
//! uniqueness of names is assumed, not enforced.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A purchasable ticket class with fixed price and feature set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    /// Display name of the tier (natural key)
    pub tier: String,
    /// Price in whole currency units
    pub price: u64,
    /// Marketing description
    pub description: String,
    /// Ordered feature list
    pub features: Vec<String>,
    /// Display image URI
    pub image: String,
}

/// Immutable, process-initialized tier table.
///
/// Cheap to clone (shared slice) so it can live in the reducer environment
/// and in the rendering layer at the same time.
#[derive(Clone, Debug)]
pub struct Catalog {
    tiers: Arc<[TicketTier]>,
}

impl Catalog {
    /// Build a catalog from a list of tiers.
    #[must_use]
    pub fn new(tiers: Vec<TicketTier>) -> Self {
        Self {
            tiers: tiers.into(),
        }
    }

    /// All tiers, in display order.
    #[must_use]
    pub fn tiers(&self) -> &[TicketTier] {
        &self.tiers
    }

    /// Look up a tier by display name.
    #[must_use]
    pub fn find(&self, tier: &str) -> Option<&TicketTier> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    /// Whether a tier with this display name exists.
    #[must_use]
    pub fn contains(&self, tier: &str) -> bool {
        self.find(tier).is_some()
    }
}

/// The standard Mars voyage catalog.
#[must_use]
pub fn standard_catalog() -> Catalog {
    Catalog::new(vec![
        TicketTier {
            tier: "Red Planet Pioneer".to_string(),
            price: 250_000,
            description: "Experience the first wave of Mars colonization with our entry-level package.".to_string(),
            features: vec![
                "Basic life support systems".to_string(),
                "Shared living quarters".to_string(),
                "Basic Mars exploration gear".to_string(),
                "Emergency return insurance".to_string(),
            ],
            image: "https://images.unsplash.com/photo-1614728894747-a83421e2b9c9?auto=format&fit=crop&q=80".to_string(),
        },
        TicketTier {
            tier: "Martian Elite".to_string(),
            price: 500_000,
            description: "Premium comfort and exclusive access to advanced Mars facilities.".to_string(),
            features: vec![
                "Enhanced life support systems".to_string(),
                "Private living pod".to_string(),
                "Advanced exploration equipment".to_string(),
                "Priority medical care".to_string(),
                "Exclusive facility access".to_string(),
            ],
            image: "https://images.unsplash.com/photo-1614313913007-2b4ae8ce32d6?auto=format&fit=crop&q=80".to_string(),
        },
        TicketTier {
            tier: "Olympus Prime".to_string(),
            price: 1_000_000,
            description: "The ultimate luxury Mars experience with unparalleled amenities.".to_string(),
            features: vec![
                "State-of-the-art life support".to_string(),
                "Luxury habitat suite".to_string(),
                "Personal transport vehicle".to_string(),
                "24/7 concierge service".to_string(),
                "Private research lab access".to_string(),
                "First-class return journey".to_string(),
            ],
            image: "https://images.unsplash.com/photo-1614726365952-510103b1bbb4?auto=format&fit=crop&q=80".to_string(),
        },
    ])
}
