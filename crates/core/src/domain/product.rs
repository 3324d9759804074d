use super::client::RiskLevel;
use serde::{Deserialize, Serialize};

/// Investment product offered to clients. Seeded externally; immutable to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    /// Annual rate as a decimal fraction (0.12 = 12%/year).
    #[serde(default)]
    pub profitability: Option<f64>,
    #[serde(default)]
    pub risk: Option<RiskLevel>,
}

impl Product {
    pub fn is_of_type(&self, product_type: &str) -> bool {
        self.product_type
            .trim()
            .eq_ignore_ascii_case(product_type.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_match_ignores_case_and_padding() {
        let product = Product {
            id: 1,
            name: "CDB Liquidez".to_string(),
            product_type: "CDB".to_string(),
            profitability: Some(0.1),
            risk: Some(RiskLevel::Low),
        };
        assert!(product.is_of_type(" cdb "));
        assert!(!product.is_of_type("FUND"));
    }

    #[test]
    fn wire_format_uses_type_key() {
        let product: Product =
            serde_json::from_str(r#"{"id": 3, "name": "Fundo X", "type": "FUND"}"#).unwrap();
        assert_eq!(product.product_type, "FUND");
        assert_eq!(product.profitability, None);
        assert_eq!(product.risk, None);
    }
}
