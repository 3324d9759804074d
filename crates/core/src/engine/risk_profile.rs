use crate::domain::client::{Client, MovementFrequency, Preference, RiskLevel};
use crate::domain::profile::{ProfileCategory, RiskProfile};
use crate::engine::weights::{category_level, risk_score, tier_value};

/// Classify a client into a 0..=100 risk score and a profile category.
///
/// The two outputs are computed on separate scales; a missing attribute adds
/// nothing to either.
pub fn classify_risk(client: &Client) -> RiskProfile {
    RiskProfile {
        score: score(client),
        category: category(client),
    }
}

fn score(client: &Client) -> i32 {
    let frequency = match client.movement_frequency {
        Some(MovementFrequency::Low) => risk_score::FREQUENCY_LOW,
        Some(MovementFrequency::Medium) => risk_score::FREQUENCY_MEDIUM,
        Some(MovementFrequency::High) => risk_score::FREQUENCY_HIGH,
        None => 0,
    };

    let preference = match client.preference {
        Some(Preference::Liquidity) => risk_score::PREFERENCE_LIQUIDITY,
        Some(Preference::Balance) => risk_score::PREFERENCE_BALANCE,
        Some(Preference::Profitability) => risk_score::PREFERENCE_PROFITABILITY,
        None => 0,
    };

    let volume = client
        .total_invested_volume
        .map_or(0, |v| tier_value(v, &risk_score::VOLUME_TIERS, 0));

    let tolerance = match client.max_acceptable_risk {
        Some(RiskLevel::VeryLow) => risk_score::MAX_RISK_VERY_LOW,
        Some(RiskLevel::Low) => risk_score::MAX_RISK_LOW,
        Some(RiskLevel::High) => risk_score::MAX_RISK_HIGH,
        Some(RiskLevel::VeryHigh) => risk_score::MAX_RISK_VERY_HIGH,
        None => 0,
    };

    frequency + preference + volume + tolerance
}

fn category(client: &Client) -> ProfileCategory {
    let frequency = match client.movement_frequency {
        Some(MovementFrequency::Low) | None => 0,
        Some(MovementFrequency::Medium) => 1,
        Some(MovementFrequency::High) => 2,
    };

    let preference = match client.preference {
        Some(Preference::Liquidity) | None => 0,
        Some(Preference::Balance) => 1,
        Some(Preference::Profitability) => 2,
    };

    let volume = client
        .total_invested_volume
        .map_or(0, |v| tier_value(v, &category_level::VOLUME_TIERS, 0));

    let tolerance = match client.max_acceptable_risk {
        Some(RiskLevel::VeryLow) | None => 0,
        Some(RiskLevel::Low) => 1,
        Some(RiskLevel::High) | Some(RiskLevel::VeryHigh) => 2,
    };

    let total = frequency + preference + volume + tolerance;
    if total >= category_level::AGGRESSIVE_FROM {
        ProfileCategory::Aggressive
    } else if total >= category_level::MODERATE_FROM {
        ProfileCategory::Moderate
    } else {
        ProfileCategory::Conservative
    }
}
