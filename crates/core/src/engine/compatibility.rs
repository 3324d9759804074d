use crate::domain::client::{Client, MovementFrequency, Preference};
use crate::domain::product::Product;
use crate::domain::profile::ProfileCategory;
use crate::engine::weights::{
    compatibility as w, profile as pw, tier_value, MAX_RISK_LEVEL, UNRATED_PRODUCT_RISK,
    UNSTATED_CLIENT_TOLERANCE,
};

/// Annual profitability in percent points; a missing rate scores as 0%.
pub(crate) fn rent(product: &Product) -> f64 {
    product.profitability.unwrap_or(0.0) * 100.0
}

pub(crate) fn product_risk_level(product: &Product) -> i32 {
    product.risk.unwrap_or(UNRATED_PRODUCT_RISK).level()
}

pub(crate) fn client_tolerance_level(client: &Client) -> i32 {
    client
        .max_acceptable_risk
        .unwrap_or(UNSTATED_CLIENT_TOLERANCE)
        .level()
}

/// Compatibility of a product with a specific client.
///
/// Preference and profitability terms are jointly capped; the risk term and
/// the volume/frequency bonuses are added on top, so the total can exceed 100.
pub fn score_client(product: &Product, client: &Client) -> f64 {
    let rent = rent(product);
    let risk_level = product_risk_level(product);

    let preference = preference_term(client.preference, rent, risk_level);
    let profitability = (rent * w::PROFITABILITY_WEIGHT).min(w::PROFITABILITY_CAP);
    let risk = risk_term(risk_level, client_tolerance_level(client));

    let volume_bonus = client
        .total_invested_volume
        .map_or(0.0, |v| tier_value(v, &w::VOLUME_BONUS_TIERS, 0.0));
    let frequency_bonus = match client.movement_frequency {
        Some(MovementFrequency::Low) => w::FREQUENCY_BONUS_LOW,
        Some(MovementFrequency::Medium) => w::FREQUENCY_BONUS_MEDIUM,
        Some(MovementFrequency::High) => w::FREQUENCY_BONUS_HIGH,
        None => 0.0,
    };

    (preference + profitability).min(w::RETURN_TERMS_CAP)
        + risk.min(w::RISK_TERM_CAP)
        + volume_bonus
        + frequency_bonus
}

fn preference_term(preference: Option<Preference>, rent: f64, risk_level: i32) -> f64 {
    let safety = f64::from(MAX_RISK_LEVEL - risk_level);
    match preference {
        Some(Preference::Profitability) => {
            (rent * w::PROFITABILITY_PREFERENCE_WEIGHT).min(w::PROFITABILITY_PREFERENCE_CAP)
        }
        Some(Preference::Balance) => ((rent * w::BALANCE_RENT_WEIGHT).min(w::BALANCE_RENT_CAP)
            + safety * w::BALANCE_SAFETY_WEIGHT)
            .min(w::BALANCE_CAP),
        Some(Preference::Liquidity) => safety * w::LIQUIDITY_SAFETY_WEIGHT,
        None => w::NO_PREFERENCE_POINTS,
    }
}

/// Staying under the tolerance costs little; exceeding it costs everything.
fn risk_term(risk_level: i32, tolerance: i32) -> f64 {
    let distance = f64::from((risk_level - tolerance).abs());
    if risk_level <= tolerance {
        w::RISK_WITHIN_BASE - distance * w::RISK_DISTANCE_PENALTY
    } else {
        (w::RISK_EXCESS_BASE - distance * w::RISK_DISTANCE_PENALTY).max(0.0)
    }
}

/// Compatibility of a product with a profile category alone.
pub fn score_profile(product: &Product, category: ProfileCategory) -> f64 {
    let rent = rent(product);
    let risk_level = product_risk_level(product);

    match category {
        ProfileCategory::Conservative => {
            (pw::CONSERVATIVE_BASE - f64::from(risk_level) * pw::CONSERVATIVE_RISK_PENALTY)
                .max(0.0)
                + rent * pw::CONSERVATIVE_RENT_WEIGHT
        }
        ProfileCategory::Moderate => {
            let distance = f64::from((risk_level - pw::MODERATE_TARGET_LEVEL).abs());
            (pw::MODERATE_BASE - distance * pw::MODERATE_DISTANCE_PENALTY)
                + rent * pw::MODERATE_RENT_WEIGHT
        }
        ProfileCategory::Aggressive => {
            rent * pw::AGGRESSIVE_RENT_WEIGHT + f64::from(risk_level) * pw::AGGRESSIVE_RISK_WEIGHT
        }
    }
}
