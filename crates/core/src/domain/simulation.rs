use super::product::Product;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inbound simulation request. Fields are optional on the wire so that missing
/// values surface as validation failures rather than decode errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub client_id: i64,
    #[serde(default)]
    pub principal: Option<Decimal>,
    #[serde(default)]
    pub term_months: Option<i32>,
    #[serde(default)]
    pub product_type: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub client_id: i64,
    pub principal: Decimal,
    pub term_months: i32,
    pub product_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub final_value: Decimal,
    /// Annual rate the projection used; 0 when the product carries no profitability.
    pub effective_rate: f64,
    pub term_months: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub product: Product,
    pub simulation: Simulation,
    pub simulated_at: DateTime<Utc>,
}

/// Row written to the simulation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: Uuid,
    pub client_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub principal: Decimal,
    pub final_value: Decimal,
    pub term_months: i32,
    pub simulated_at: DateTime<Utc>,
}

/// Per product, per UTC day roll-up of recorded simulations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProductSummary {
    pub day: NaiveDate,
    pub product_id: i64,
    pub product_name: String,
    pub simulations: i64,
    pub average_final_value: Decimal,
    pub total_principal: Decimal,
}
