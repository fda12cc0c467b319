//! Domain types for the Mars ticket storefront.
//!
//! Value objects for cart items, passengers, add-on selections, and
//! finalized tickets. Prices are whole currency units; add-on prices are
//! denormalized into the selection at assignment time and recomputed on
//! every change (see [`crate::pricing`]).

use crate::pricing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Add-on selections
// ============================================================================

/// Meal plan variants available per passenger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealPlanType {
    /// Standard rations
    Standard,
    /// Vegetarian rations
    Vegetarian,
    /// Premium chef-prepared meals
    Premium,
}

impl MealPlanType {
    /// Stable key used in translation lookups and serialized data
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Vegetarian => "vegetarian",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for MealPlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// A meal plan attached to a passenger, price denormalized at assignment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanSelection {
    /// Which plan was chosen
    #[serde(rename = "type")]
    pub plan: MealPlanType,
    /// Price at assignment time, whole currency units
    pub price: u64,
}

impl MealPlanSelection {
    /// Select a meal plan, stamping the current catalog price onto it
    #[must_use]
    pub fn new(plan: MealPlanType) -> Self {
        Self {
            plan,
            price: pricing::meal_price(plan),
        }
    }
}

/// Wi-Fi speed classes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WifiSpeed {
    /// Basic connectivity
    Basic,
    /// High-speed link
    HighSpeed,
    /// Ultra low-latency link
    Ultra,
}

impl WifiSpeed {
    /// Stable key used in translation lookups and serialized data
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::HighSpeed => "high-speed",
            Self::Ultra => "ultra",
        }
    }
}

impl fmt::Display for WifiSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Wi-Fi subscription durations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WifiDuration {
    /// One month
    #[serde(rename = "1-month")]
    OneMonth,
    /// Three months
    #[serde(rename = "3-months")]
    ThreeMonths,
    /// Six months
    #[serde(rename = "6-months")]
    SixMonths,
}

impl WifiDuration {
    /// Stable key used in translation lookups and serialized data
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::OneMonth => "1-month",
            Self::ThreeMonths => "3-months",
            Self::SixMonths => "6-months",
        }
    }
}

impl fmt::Display for WifiDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// A Wi-Fi package attached to a passenger
///
/// The price is recomputed and re-stamped whenever speed or duration
/// changes; it is never edited directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiPackageSelection {
    /// Chosen speed class
    pub speed: WifiSpeed,
    /// Chosen subscription duration
    pub duration: WifiDuration,
    /// Derived price, whole currency units
    pub price: u64,
}

impl WifiPackageSelection {
    /// Select a Wi-Fi package, deriving its price from speed and duration
    #[must_use]
    pub fn new(speed: WifiSpeed, duration: WifiDuration) -> Self {
        Self {
            speed,
            duration,
            price: pricing::wifi_price(speed, duration),
        }
    }
}

// ============================================================================
// Passengers and cart items
// ============================================================================

/// A named occupant of one ticket slot, with optional add-ons
///
/// Passengers in the cart carry no ticket id; ids exist only on
/// [`FinalizedTicket`] records produced at checkout.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PassengerInfo {
    /// Passenger name (blank until the user fills it in)
    pub name: String,
    /// Optional meal plan add-on
    pub meal_plan: Option<MealPlanSelection>,
    /// Optional Wi-Fi package add-on
    pub wifi_package: Option<WifiPackageSelection>,
}

impl PassengerInfo {
    /// A fresh passenger slot: empty name, no add-ons
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Whether the name is non-empty after trimming
    #[must_use]
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Maximum tickets per tier in one cart
pub const MAX_TIER_QUANTITY: usize = 10;

/// All passengers purchasing under one tier in the current session
///
/// One `CartItem` exists per distinct tier; the tier display name is the
/// natural key. Quantity is the passenger count, so the
/// `passengers.len() == quantity` invariant holds by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Tier display name (references a catalog entry)
    pub tier: String,
    /// Passenger slots, one per ticket
    pub passengers: Vec<PassengerInfo>,
}

impl CartItem {
    /// Create a cart item for a tier with a single blank passenger
    #[must_use]
    pub fn new(tier: impl Into<String>) -> Self {
        Self {
            tier: tier.into(),
            passengers: vec![PassengerInfo::blank()],
        }
    }

    /// Number of tickets (always equals the passenger count)
    #[must_use]
    pub fn quantity(&self) -> usize {
        self.passengers.len()
    }

    /// Whether this tier is at the per-tier cap
    #[must_use]
    pub fn at_capacity(&self) -> bool {
        self.passengers.len() >= MAX_TIER_QUANTITY
    }
}

// ============================================================================
// Partial passenger updates
// ============================================================================

/// A three-way patch for an optional field
///
/// `Keep` leaves the field untouched, `Clear` removes it, `Set` replaces
/// it. This distinguishes "not mentioned in the update" from "explicitly
/// set back to none selected".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Leave the field as it is
    Keep,
    /// Remove the field
    Clear,
    /// Replace the field with this value
    Set(T),
}

// Manual impl: the derive would bound `T: Default`, which the add-on
// enums neither have nor need
impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

/// A partial update to one passenger
///
/// Fields left at their defaults are not touched; add-on fields use
/// [`FieldPatch`] so they can be explicitly cleared. Add-on patches carry
/// only the user's choice; prices are derived when the patch is applied.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PassengerPatch {
    /// New passenger name, if given
    pub name: Option<String>,
    /// Meal plan change, if any
    pub meal_plan: FieldPatch<MealPlanType>,
    /// Wi-Fi package change, if any
    pub wifi_package: FieldPatch<(WifiSpeed, WifiDuration)>,
}

impl PassengerPatch {
    /// Patch that only renames the passenger
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that selects a meal plan
    #[must_use]
    pub fn select_meal_plan(plan: MealPlanType) -> Self {
        Self {
            meal_plan: FieldPatch::Set(plan),
            ..Self::default()
        }
    }

    /// Patch that clears the meal plan back to none selected
    #[must_use]
    pub fn clear_meal_plan() -> Self {
        Self {
            meal_plan: FieldPatch::Clear,
            ..Self::default()
        }
    }

    /// Patch that selects a Wi-Fi package
    #[must_use]
    pub fn select_wifi(speed: WifiSpeed, duration: WifiDuration) -> Self {
        Self {
            wifi_package: FieldPatch::Set((speed, duration)),
            ..Self::default()
        }
    }

    /// Patch that clears the Wi-Fi package back to none selected
    #[must_use]
    pub fn clear_wifi() -> Self {
        Self {
            wifi_package: FieldPatch::Clear,
            ..Self::default()
        }
    }

    /// Apply this patch to a passenger, deriving add-on prices
    pub fn apply(&self, passenger: &mut PassengerInfo) {
        if let Some(name) = &self.name {
            passenger.name.clone_from(name);
        }
        match &self.meal_plan {
            FieldPatch::Keep => {},
            FieldPatch::Clear => passenger.meal_plan = None,
            FieldPatch::Set(plan) => {
                passenger.meal_plan = Some(MealPlanSelection::new(*plan));
            },
        }
        match &self.wifi_package {
            FieldPatch::Keep => {},
            FieldPatch::Clear => passenger.wifi_package = None,
            FieldPatch::Set((speed, duration)) => {
                passenger.wifi_package = Some(WifiPackageSelection::new(*speed, *duration));
            },
        }
    }
}

// ============================================================================
// Finalized tickets
// ============================================================================

/// Prefix shared by all generated ticket identifiers
pub const TICKET_ID_PREFIX: &str = "MARS-";

/// Number of random characters after the prefix
pub const TICKET_ID_SUFFIX_LEN: usize = 9;

/// A generated ticket identifier, `MARS-` followed by nine uppercase
/// alphanumeric characters
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(String);

impl TicketId {
    /// Build a ticket id from a generated suffix
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Self {
        Self(format!("{TICKET_ID_PREFIX}{suffix}"))
    }

    /// The full identifier string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id matches the `MARS-[A-Z0-9]{9}` shape
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.0.strip_prefix(TICKET_ID_PREFIX).is_some_and(|suffix| {
            suffix.len() == TICKET_ID_SUFFIX_LEN
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        })
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A passenger record stamped with a generated identifier at checkout
///
/// Immutable within the session once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedTicket {
    /// Generated ticket identifier
    pub ticket_id: TicketId,
    /// Tier the ticket was purchased under
    pub tier: String,
    /// Passenger name (validated non-blank at checkout)
    pub name: String,
    /// Meal plan carried through from the cart
    pub meal_plan: Option<MealPlanSelection>,
    /// Wi-Fi package carried through from the cart
    pub wifi_package: Option<WifiPackageSelection>,
    /// When the ticket was issued
    pub issued_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;

    #[test]
    fn meal_plan_selection_stamps_price() {
        assert_eq!(MealPlanSelection::new(MealPlanType::Standard).price, 500);
        assert_eq!(MealPlanSelection::new(MealPlanType::Vegetarian).price, 600);
        assert_eq!(MealPlanSelection::new(MealPlanType::Premium).price, 1000);
    }

    #[test]
    fn wifi_selection_derives_price() {
        let pkg = WifiPackageSelection::new(WifiSpeed::Ultra, WifiDuration::SixMonths);
        assert_eq!(pkg.price, 1000);
        let pkg = WifiPackageSelection::new(WifiSpeed::Basic, WifiDuration::ThreeMonths);
        assert_eq!(pkg.price, 125);
    }

    #[test]
    fn cart_item_starts_with_one_blank_passenger() {
        let item = CartItem::new("Martian Elite");
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.passengers[0], PassengerInfo::blank());
        assert!(!item.at_capacity());
    }

    #[test]
    fn patch_applies_only_named_fields() {
        let mut passenger = PassengerInfo::blank();
        passenger.meal_plan = Some(MealPlanSelection::new(MealPlanType::Premium));

        PassengerPatch::rename("Ada Lovelace").apply(&mut passenger);

        assert_eq!(passenger.name, "Ada Lovelace");
        // Untouched fields survive a partial update
        assert_eq!(
            passenger.meal_plan,
            Some(MealPlanSelection::new(MealPlanType::Premium))
        );
        assert_eq!(passenger.wifi_package, None);
    }

    #[test]
    fn patch_clear_removes_only_that_field() {
        let mut passenger = PassengerInfo {
            name: "Grace Hopper".to_string(),
            meal_plan: Some(MealPlanSelection::new(MealPlanType::Vegetarian)),
            wifi_package: Some(WifiPackageSelection::new(
                WifiSpeed::Basic,
                WifiDuration::OneMonth,
            )),
        };

        PassengerPatch::clear_meal_plan().apply(&mut passenger);

        assert_eq!(passenger.meal_plan, None);
        assert_eq!(passenger.name, "Grace Hopper");
        assert!(passenger.wifi_package.is_some());
    }

    #[test]
    fn patch_reprices_wifi_on_duration_change() {
        let mut passenger = PassengerInfo::blank();
        PassengerPatch::select_wifi(WifiSpeed::HighSpeed, WifiDuration::OneMonth)
            .apply(&mut passenger);
        assert_eq!(passenger.wifi_package.unwrap().price, 100);

        PassengerPatch::select_wifi(WifiSpeed::HighSpeed, WifiDuration::SixMonths)
            .apply(&mut passenger);
        assert_eq!(passenger.wifi_package.unwrap().price, 500);
    }

    #[test]
    fn ticket_id_shape() {
        let id = TicketId::from_suffix("A1B2C3D4E");
        assert_eq!(id.as_str(), "MARS-A1B2C3D4E");
        assert!(id.is_well_formed());

        assert!(!TicketId::from_suffix("short").is_well_formed());
        assert!(!TicketId::from_suffix("lowercase1").is_well_formed());
    }

    #[test]
    fn enum_keys_match_wire_format() {
        assert_eq!(WifiSpeed::HighSpeed.as_key(), "high-speed");
        assert_eq!(WifiDuration::ThreeMonths.as_key(), "3-months");
        assert_eq!(
            serde_json::to_value(WifiDuration::ThreeMonths).unwrap(),
            serde_json::json!("3-months")
        );
        assert_eq!(
            serde_json::to_value(MealPlanType::Vegetarian).unwrap(),
            serde_json::json!("vegetarian")
        );
    }
}
