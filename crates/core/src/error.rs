use crate::domain::simulation::SimulationResult;
use thiserror::Error;

/// Error kinds raised by the decision engine. Each propagates unchanged so the
/// boundary (HTTP, CLI) can map it to its own response.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("client {0} not found")]
    ClientNotFound(i64),

    #[error("no product found for type {0:?}")]
    ProductNotFound(String),

    #[error("repository lookup failed: {0:#}")]
    Repository(#[source] anyhow::Error),

    /// The simulation was computed but the write was not confirmed. The result
    /// may be shown, but must not be reported as recorded.
    #[error("simulation computed but not recorded: {source:#}")]
    PersistenceFailure {
        result: Box<SimulationResult>,
        #[source]
        source: anyhow::Error,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
