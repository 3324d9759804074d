use super::product::Product;
use serde::{Deserialize, Serialize};

/// A product paired with the compatibility score it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product: Product,
    pub score: f64,
}
