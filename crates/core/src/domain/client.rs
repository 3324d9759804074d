use super::{normalize_label, UnknownLabel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered risk scale shared by client tolerance and product risk.
///
/// Always compare through [`RiskLevel::level`]; the variant order is not part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    VeryLow,
    Low,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const fn level(self) -> i32 {
        match self {
            RiskLevel::VeryLow => 0,
            RiskLevel::Low => 1,
            RiskLevel::High => 2,
            RiskLevel::VeryHigh => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "VERY_LOW",
            RiskLevel::Low => "LOW",
            RiskLevel::High => "HIGH",
            RiskLevel::VeryHigh => "VERY_HIGH",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "VERY_LOW" => Ok(RiskLevel::VeryLow),
            "LOW" => Ok(RiskLevel::Low),
            "HIGH" => Ok(RiskLevel::High),
            "VERY_HIGH" => Ok(RiskLevel::VeryHigh),
            _ => Err(UnknownLabel::new("risk level", s)),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the client values most in an investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Preference {
    Liquidity,
    Balance,
    Profitability,
}

impl Preference {
    pub const fn as_str(self) -> &'static str {
        match self {
            Preference::Liquidity => "LIQUIDITY",
            Preference::Balance => "BALANCE",
            Preference::Profitability => "PROFITABILITY",
        }
    }
}

impl FromStr for Preference {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "LIQUIDITY" => Ok(Preference::Liquidity),
            "BALANCE" => Ok(Preference::Balance),
            "PROFITABILITY" => Ok(Preference::Profitability),
            _ => Err(UnknownLabel::new("preference", s)),
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementFrequency {
    Low,
    Medium,
    High,
}

impl MovementFrequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            MovementFrequency::Low => "LOW",
            MovementFrequency::Medium => "MEDIUM",
            MovementFrequency::High => "HIGH",
        }
    }
}

impl FromStr for MovementFrequency {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "LOW" => Ok(MovementFrequency::Low),
            "MEDIUM" => Ok(MovementFrequency::Medium),
            "HIGH" => Ok(MovementFrequency::High),
            _ => Err(UnknownLabel::new("movement frequency", s)),
        }
    }
}

impl fmt::Display for MovementFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client record as maintained by account management. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub preferred_term_months: i32,
    #[serde(default)]
    pub preference: Option<Preference>,
    #[serde(default)]
    pub max_acceptable_risk: Option<RiskLevel>,
    #[serde(default)]
    pub total_invested_volume: Option<Decimal>,
    #[serde(default)]
    pub movement_frequency: Option<MovementFrequency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_are_ordered_by_level() {
        let levels = [
            RiskLevel::VeryLow,
            RiskLevel::Low,
            RiskLevel::High,
            RiskLevel::VeryHigh,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0].level() < pair[1].level());
        }
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(" very_high ".parse::<RiskLevel>(), Ok(RiskLevel::VeryHigh));
        assert_eq!("Balance".parse::<Preference>(), Ok(Preference::Balance));
        assert_eq!("medium".parse::<MovementFrequency>(), Ok(MovementFrequency::Medium));
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let err = "RENT".parse::<Preference>().unwrap_err();
        assert_eq!(err.kind, "preference");
        assert_eq!(err.label, "RENT");
    }

    #[test]
    fn client_deserializes_with_missing_optional_fields() {
        let client: Client = serde_json::from_str(r#"{"id": 7, "name": "Ana"}"#).unwrap();
        assert_eq!(client.id, 7);
        assert_eq!(client.preference, None);
        assert_eq!(client.max_acceptable_risk, None);
        assert_eq!(client.total_invested_volume, None);
        assert_eq!(client.movement_frequency, None);
    }

    #[test]
    fn enums_serialize_as_screaming_snake_case() {
        let json = serde_json::to_string(&RiskLevel::VeryLow).unwrap();
        assert_eq!(json, "\"VERY_LOW\"");
    }
}
