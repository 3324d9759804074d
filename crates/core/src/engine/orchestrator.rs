use crate::domain::simulation::{
    Simulation, SimulationRecord, SimulationRequest, SimulationResult,
};
use crate::engine::{projection::project, recommendation::recommend, validation::validate};
use crate::error::{EngineError, EngineResult};
use crate::storage::{ClientDirectory, ProductCatalog, SimulationStore};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Runs a simulation end to end: validate, resolve the client, recommend a
/// product, project the outcome and record it.
#[derive(Clone)]
pub struct SimulationOrchestrator {
    clients: Arc<dyn ClientDirectory>,
    products: Arc<dyn ProductCatalog>,
    store: Arc<dyn SimulationStore>,
}

impl SimulationOrchestrator {
    pub fn new(
        clients: Arc<dyn ClientDirectory>,
        products: Arc<dyn ProductCatalog>,
        store: Arc<dyn SimulationStore>,
    ) -> Self {
        Self {
            clients,
            products,
            store,
        }
    }

    /// Use one backend for all three collaborators.
    pub fn with_backend<B>(backend: Arc<B>) -> Self
    where
        B: ClientDirectory + ProductCatalog + SimulationStore + 'static,
    {
        Self {
            clients: backend.clone(),
            products: backend.clone(),
            store: backend,
        }
    }

    /// Errors before projection abort without writing anything. A failed write
    /// still hands back the computed result inside
    /// [`EngineError::PersistenceFailure`].
    pub async fn simulate(&self, request: &SimulationRequest) -> EngineResult<SimulationResult> {
        let request = validate(request)?;

        let client = self
            .clients
            .find_client(request.client_id)
            .await
            .map_err(EngineError::Repository)?
            .ok_or(EngineError::ClientNotFound(request.client_id))?;

        let product = recommend(
            self.products.as_ref(),
            &client,
            &request.product_type,
            request.term_months,
        )
        .await?;

        let final_value = project(request.principal, product.profitability, request.term_months)?;

        let simulated_at = Utc::now();
        let record = SimulationRecord {
            id: Uuid::new_v4(),
            client_id: client.id,
            product_id: product.id,
            product_name: product.name.clone(),
            principal: request.principal,
            final_value,
            term_months: request.term_months,
            simulated_at,
        };
        let result = SimulationResult {
            simulation: Simulation {
                final_value,
                effective_rate: product.profitability.unwrap_or(0.0),
                term_months: request.term_months,
            },
            product,
            simulated_at,
        };

        if let Err(source) = self.store.save(&record).await {
            tracing::error!(
                simulation_id = %record.id,
                client_id = record.client_id,
                error = ?source,
                "simulation computed but not recorded"
            );
            return Err(EngineError::PersistenceFailure {
                result: Box::new(result),
                source,
            });
        }

        tracing::info!(
            simulation_id = %record.id,
            client_id = record.client_id,
            product_id = record.product_id,
            principal = %record.principal,
            final_value = %record.final_value,
            term_months = record.term_months,
            "simulation recorded"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::{Client, MovementFrequency, Preference, RiskLevel};
    use crate::domain::product::Product;
    use crate::storage::memory::InMemoryStore;
    use rust_decimal_macros::dec;

    fn catalog() -> (Vec<Client>, Vec<Product>) {
        let clients = vec![Client {
            id: 1,
            name: "Ana".to_string(),
            preferred_term_months: 12,
            preference: Some(Preference::Liquidity),
            max_acceptable_risk: Some(RiskLevel::Low),
            total_invested_volume: Some(dec!(5000)),
            movement_frequency: Some(MovementFrequency::Low),
        }];
        let products = vec![
            Product {
                id: 101,
                name: "CDB Liquidez Diária".to_string(),
                product_type: "CDB".to_string(),
                profitability: Some(0.12),
                risk: Some(RiskLevel::Low),
            },
            Product {
                id: 102,
                name: "CDB Pré 5 anos".to_string(),
                product_type: "CDB".to_string(),
                profitability: Some(0.16),
                risk: Some(RiskLevel::High),
            },
            Product {
                id: 201,
                name: "Poupança".to_string(),
                product_type: "SAVINGS".to_string(),
                profitability: None,
                risk: Some(RiskLevel::VeryLow),
            },
        ];
        (clients, products)
    }

    fn store() -> Arc<InMemoryStore> {
        let (clients, products) = catalog();
        Arc::new(InMemoryStore::new(clients, products))
    }

    fn request(client_id: i64, principal: rust_decimal::Decimal, term: i32, product_type: &str) -> SimulationRequest {
        SimulationRequest {
            client_id,
            principal: Some(principal),
            term_months: Some(term),
            product_type: Some(product_type.to_string()),
        }
    }

    #[tokio::test]
    async fn simulates_and_records() {
        let store = store();
        let orchestrator = SimulationOrchestrator::with_backend(store.clone());

        let result = orchestrator
            .simulate(&request(1, dec!(1000), 12, "CDB"))
            .await
            .unwrap();

        assert_eq!(result.product.id, 101);
        assert_eq!(result.simulation.final_value, dec!(1120.00));
        assert_eq!(result.simulation.effective_rate, 0.12);
        assert_eq!(result.simulation.term_months, 12);

        let saved = store.saved_records();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].client_id, 1);
        assert_eq!(saved[0].product_id, 101);
        assert_eq!(saved[0].product_name, "CDB Liquidez Diária");
        assert_eq!(saved[0].principal, dec!(1000));
        assert_eq!(saved[0].final_value, dec!(1120.00));
        assert_eq!(saved[0].simulated_at, result.simulated_at);
    }

    #[tokio::test]
    async fn product_without_profitability_preserves_principal() {
        let orchestrator = SimulationOrchestrator::with_backend(store());
        let result = orchestrator
            .simulate(&request(1, dec!(2500.50), 36, "savings"))
            .await
            .unwrap();
        assert_eq!(result.product.id, 201);
        assert_eq!(result.simulation.final_value, dec!(2500.50));
        assert_eq!(result.simulation.effective_rate, 0.0);
    }

    #[tokio::test]
    async fn invalid_request_is_rejected_before_lookup() {
        let store = store();
        let orchestrator = SimulationOrchestrator::with_backend(store.clone());
        let err = orchestrator
            .simulate(&request(999, dec!(50), 12, "CDB"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter(_)));
        assert!(store.saved_records().is_empty());
    }

    #[tokio::test]
    async fn unknown_client_is_not_found() {
        let store = store();
        let orchestrator = SimulationOrchestrator::with_backend(store.clone());
        let err = orchestrator
            .simulate(&request(999, dec!(1000), 12, "CDB"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ClientNotFound(999)));
        assert!(store.saved_records().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_type_is_not_found() {
        let store = store();
        let orchestrator = SimulationOrchestrator::with_backend(store.clone());
        let err = orchestrator
            .simulate(&request(1, dec!(1000), 12, "LCA"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ProductNotFound(_)));
        assert!(store.saved_records().is_empty());
    }

    #[tokio::test]
    async fn failed_write_still_returns_result() {
        let (clients, products) = catalog();
        let store = Arc::new(InMemoryStore::new(clients, products).rejecting_saves());
        let orchestrator = SimulationOrchestrator::with_backend(store.clone());

        let err = orchestrator
            .simulate(&request(1, dec!(1000), 24, "CDB"))
            .await
            .unwrap_err();

        match err {
            EngineError::PersistenceFailure { result, .. } => {
                assert_eq!(result.product.id, 101);
                assert_eq!(result.simulation.final_value, dec!(1254.40));
            }
            other => panic!("expected PersistenceFailure, got {other:?}"),
        }
        assert!(store.saved_records().is_empty());
    }
}
