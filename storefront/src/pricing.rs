//! Pricing calculator for per-passenger add-ons.
//!
//! Pure lookup tables, no state. Wi-Fi prices are
//! `base(speed) * multiplier(duration)` where the 3-month multiplier is
//! the rational 5/2; all bases are even, so integer arithmetic is exact.

use crate::types::{MealPlanType, WifiDuration, WifiSpeed};

/// Price of a meal plan in whole currency units
#[must_use]
pub const fn meal_price(plan: MealPlanType) -> u64 {
    match plan {
        MealPlanType::Standard => 500,
        MealPlanType::Vegetarian => 600,
        MealPlanType::Premium => 1000,
    }
}

/// Base monthly price of a Wi-Fi speed class
#[must_use]
pub const fn wifi_base_price(speed: WifiSpeed) -> u64 {
    match speed {
        WifiSpeed::Basic => 50,
        WifiSpeed::HighSpeed => 100,
        WifiSpeed::Ultra => 200,
    }
}

/// Duration multiplier as an exact rational (numerator, denominator)
const fn duration_multiplier(duration: WifiDuration) -> (u64, u64) {
    match duration {
        WifiDuration::OneMonth => (1, 1),
        WifiDuration::ThreeMonths => (5, 2),
        WifiDuration::SixMonths => (5, 1),
    }
}

/// Price of a Wi-Fi package in whole currency units
#[must_use]
pub const fn wifi_price(speed: WifiSpeed, duration: WifiDuration) -> u64 {
    let (num, den) = duration_multiplier(duration);
    wifi_base_price(speed) * num / den
}
