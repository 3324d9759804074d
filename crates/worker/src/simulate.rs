use serde::Serialize;
use simvest_core::domain::simulation::{SimulationRequest, SimulationResult};
use simvest_core::{EngineError, SimulationOrchestrator};

#[derive(Debug, Serialize)]
pub struct SimulationOutput {
    pub recorded: bool,
    #[serde(flatten)]
    pub result: SimulationResult,
}

/// Run one simulation. A failed write is downgraded to `recorded: false`;
/// every other engine error is returned.
pub async fn run(
    orchestrator: &SimulationOrchestrator,
    request: &SimulationRequest,
) -> anyhow::Result<SimulationOutput> {
    match orchestrator.simulate(request).await {
        Ok(result) => Ok(SimulationOutput {
            recorded: true,
            result,
        }),
        Err(EngineError::PersistenceFailure { result, source }) => {
            sentry_anyhow::capture_anyhow(&source);
            tracing::warn!(error = ?source, "simulation computed but not recorded");
            Ok(SimulationOutput {
                recorded: false,
                result: *result,
            })
        }
        Err(err) => Err(err.into()),
    }
}
