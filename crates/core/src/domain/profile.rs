use super::{normalize_label, UnknownLabel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse risk-appetite classification of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileCategory {
    Conservative,
    Moderate,
    Aggressive,
}

impl ProfileCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProfileCategory::Conservative => "CONSERVATIVE",
            ProfileCategory::Moderate => "MODERATE",
            ProfileCategory::Aggressive => "AGGRESSIVE",
        }
    }
}

impl FromStr for ProfileCategory {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "CONSERVATIVE" => Ok(ProfileCategory::Conservative),
            "MODERATE" => Ok(ProfileCategory::Moderate),
            "AGGRESSIVE" => Ok(ProfileCategory::Aggressive),
            _ => Err(UnknownLabel::new("profile category", s)),
        }
    }
}

impl fmt::Display for ProfileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived on demand from a client; never stored.
///
/// `score` and `category` come from two independent scales and are not derived from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub score: i32,
    pub category: ProfileCategory,
}
