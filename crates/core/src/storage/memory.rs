use crate::domain::client::Client;
use crate::domain::contract::SeedCatalog;
use crate::domain::product::Product;
use crate::domain::simulation::SimulationRecord;
use crate::storage::{ClientDirectory, ProductCatalog, SimulationStore};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Process-local store backed by a seed catalog. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    clients: BTreeMap<i64, Client>,
    products: Vec<Product>,
    saved: Mutex<Vec<SimulationRecord>>,
    reject_saves: bool,
}

impl InMemoryStore {
    pub fn new(clients: Vec<Client>, mut products: Vec<Product>) -> Self {
        products.sort_by_key(|p| p.id);
        Self {
            clients: clients.into_iter().map(|c| (c.id, c)).collect(),
            products,
            saved: Mutex::new(Vec::new()),
            reject_saves: false,
        }
    }

    pub fn from_catalog(catalog: SeedCatalog) -> Self {
        Self::new(catalog.clients, catalog.products)
    }

    /// Every `save` fails; lets callers exercise the unconfirmed-write path.
    pub fn rejecting_saves(mut self) -> Self {
        self.reject_saves = true;
        self
    }

    pub fn saved_records(&self) -> Vec<SimulationRecord> {
        self.saved
            .lock()
            .map(|saved| saved.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ClientDirectory for InMemoryStore {
    async fn find_client(&self, id: i64) -> anyhow::Result<Option<Client>> {
        Ok(self.clients.get(&id).cloned())
    }
}

#[async_trait::async_trait]
impl ProductCatalog for InMemoryStore {
    async fn find_products_by_type(&self, product_type: &str) -> anyhow::Result<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.is_of_type(product_type))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl SimulationStore for InMemoryStore {
    async fn save(&self, record: &SimulationRecord) -> anyhow::Result<()> {
        anyhow::ensure!(!self.reject_saves, "in-memory store is rejecting writes");
        self.saved
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory simulation log poisoned"))?
            .push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::RiskLevel;

    fn product(id: i64, product_type: &str) -> Product {
        Product {
            id,
            name: format!("P{id}"),
            product_type: product_type.to_string(),
            profitability: Some(0.1),
            risk: Some(RiskLevel::Low),
        }
    }

    #[tokio::test]
    async fn products_are_filtered_by_type_in_id_order() {
        let store = InMemoryStore::new(
            vec![],
            vec![product(3, "CDB"), product(1, "CDB"), product(2, "FUND")],
        );
        let cdbs = store.find_products_by_type("cdb").await.unwrap();
        let ids: Vec<i64> = cdbs.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(store.find_products_by_type("LCI").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_client_is_none() {
        let store = InMemoryStore::default();
        assert!(store.find_client(42).await.unwrap().is_none());
    }
}
