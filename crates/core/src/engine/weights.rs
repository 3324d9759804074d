//! Scoring weights, caps, tier tables and request limits.
//!
//! Three volume tier tables exist, one per use site. They differ on purpose and
//! must not be merged: the 0..=100 risk score, the compatibility bonus and the
//! 0..=2 category level each keep their own.

use crate::domain::client::RiskLevel;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tier table: `(inclusive lower bound, value)` pairs in ascending bound order.
pub type Tiers<T> = [(Decimal, T)];

/// Value of the highest tier whose lower bound is `<= amount`, or `below` when
/// the amount sits under every bound.
pub fn tier_value<T: Copy>(amount: Decimal, tiers: &Tiers<T>, below: T) -> T {
    tiers
        .iter()
        .take_while(|(bound, _)| amount >= *bound)
        .last()
        .map_or(below, |(_, value)| *value)
}

/// Highest level on the risk scale.
pub const MAX_RISK_LEVEL: i32 = RiskLevel::VeryHigh.level();

/// Products without a risk rating are treated as the riskiest kind.
pub const UNRATED_PRODUCT_RISK: RiskLevel = RiskLevel::VeryHigh;

/// Clients without a stated tolerance are treated as the most cautious kind.
pub const UNSTATED_CLIENT_TOLERANCE: RiskLevel = RiskLevel::VeryLow;

/// Points for the 0..=100 risk score.
pub mod risk_score {
    use super::*;

    pub const FREQUENCY_LOW: i32 = 10;
    pub const FREQUENCY_MEDIUM: i32 = 20;
    pub const FREQUENCY_HIGH: i32 = 30;

    pub const PREFERENCE_LIQUIDITY: i32 = 10;
    pub const PREFERENCE_BALANCE: i32 = 15;
    pub const PREFERENCE_PROFITABILITY: i32 = 25;

    pub const MAX_RISK_VERY_LOW: i32 = 0;
    pub const MAX_RISK_LOW: i32 = 15;
    pub const MAX_RISK_HIGH: i32 = 20;
    pub const MAX_RISK_VERY_HIGH: i32 = 25;

    pub const VOLUME_TIERS: [(Decimal, i32); 3] = [
        (dec!(0), 5),
        (dec!(100000), 10),
        (dec!(500000), 20),
    ];
}

/// 0..=2 level indicators summed into the profile category.
pub mod category_level {
    use super::*;

    pub const VOLUME_TIERS: [(Decimal, i32); 3] = [
        (dec!(0), 0),
        (dec!(100000), 1),
        (dec!(500000), 2),
    ];

    /// Level totals at or above this are at least moderate.
    pub const MODERATE_FROM: i32 = 2;
    /// Level totals at or above this are aggressive.
    pub const AGGRESSIVE_FROM: i32 = 5;
}

/// Client compatibility score.
pub mod compatibility {
    use super::*;

    pub const PROFITABILITY_PREFERENCE_WEIGHT: f64 = 0.3;
    pub const PROFITABILITY_PREFERENCE_CAP: f64 = 30.0;

    pub const BALANCE_RENT_WEIGHT: f64 = 0.15;
    pub const BALANCE_RENT_CAP: f64 = 15.0;
    pub const BALANCE_SAFETY_WEIGHT: f64 = 3.33;
    pub const BALANCE_CAP: f64 = 20.0;

    /// Liquidity preference is intentionally uncapped.
    pub const LIQUIDITY_SAFETY_WEIGHT: f64 = 5.0;

    pub const NO_PREFERENCE_POINTS: f64 = 15.0;

    pub const PROFITABILITY_WEIGHT: f64 = 0.4;
    pub const PROFITABILITY_CAP: f64 = 40.0;

    /// Joint cap on preference + profitability terms.
    pub const RETURN_TERMS_CAP: f64 = 70.0;

    pub const RISK_TERM_CAP: f64 = 20.0;
    pub const RISK_WITHIN_BASE: f64 = 20.0;
    pub const RISK_EXCESS_BASE: f64 = 5.0;
    pub const RISK_DISTANCE_PENALTY: f64 = 5.0;

    pub const FREQUENCY_BONUS_LOW: f64 = 1.0;
    pub const FREQUENCY_BONUS_MEDIUM: f64 = 3.0;
    pub const FREQUENCY_BONUS_HIGH: f64 = 5.0;

    pub const VOLUME_BONUS_TIERS: [(Decimal, f64); 4] = [
        (dec!(0), 0.0),
        (dec!(10000), 1.0),
        (dec!(100000), 2.5),
        (dec!(500000), 5.0),
    ];
}

/// Profile-only product score.
pub mod profile {
    pub const CONSERVATIVE_BASE: f64 = 20.0;
    pub const CONSERVATIVE_RISK_PENALTY: f64 = 5.0;
    pub const CONSERVATIVE_RENT_WEIGHT: f64 = 0.2;

    pub const MODERATE_BASE: f64 = 15.0;
    pub const MODERATE_TARGET_LEVEL: i32 = 1;
    pub const MODERATE_DISTANCE_PENALTY: f64 = 5.0;
    pub const MODERATE_RENT_WEIGHT: f64 = 0.4;

    pub const AGGRESSIVE_RENT_WEIGHT: f64 = 0.8;
    pub const AGGRESSIVE_RISK_WEIGHT: f64 = 2.0;
}

/// Simulation request bounds.
pub mod limits {
    use super::*;

    pub const MIN_PRINCIPAL: Decimal = dec!(100.00);
    pub const MAX_PRINCIPAL: Decimal = dec!(1000000.00);
    pub const MAX_TERM_MONTHS: i32 = 360;
}
