//! Decision engine: risk classification, compatibility scoring, product
//! selection, projection and the orchestration around them.
//!
//! Everything here except [`recommend`] and [`orchestrator`] is pure and synchronous.

pub mod compatibility;
pub mod orchestrator;
pub mod projection;
pub mod recommendation;
pub mod risk_profile;
pub mod validation;
pub mod weights;

pub use compatibility::{score_client, score_profile};
pub use orchestrator::SimulationOrchestrator;
pub use projection::project;
pub use recommendation::{rank_for_profile, recommend, select_product};
pub use risk_profile::classify_risk;
pub use validation::validate;
