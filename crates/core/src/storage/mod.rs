//! Collaborator seams used by the engine, plus their Postgres and in-memory
//! implementations.

pub mod clients;
pub mod lock;
pub mod memory;
pub mod products;
pub mod seed;
pub mod simulations;

use crate::domain::client::Client;
use crate::domain::product::Product;
use crate::domain::simulation::SimulationRecord;
use anyhow::Context;

pub async fn migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("sqlx migrations failed")?;
    Ok(())
}

#[async_trait::async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn find_client(&self, id: i64) -> anyhow::Result<Option<Client>>;
}

/// Product lookup. Implementations return products in ascending id order.
#[async_trait::async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_products_by_type(&self, product_type: &str) -> anyhow::Result<Vec<Product>>;
}

#[async_trait::async_trait]
pub trait SimulationStore: Send + Sync {
    async fn save(&self, record: &SimulationRecord) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: sqlx::PgPool,
}

impl PgStore {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl ClientDirectory for PgStore {
    async fn find_client(&self, id: i64) -> anyhow::Result<Option<Client>> {
        clients::find_client(&self.pool, id).await
    }
}

#[async_trait::async_trait]
impl ProductCatalog for PgStore {
    async fn find_products_by_type(&self, product_type: &str) -> anyhow::Result<Vec<Product>> {
        products::find_products_by_type(&self.pool, product_type).await
    }
}

#[async_trait::async_trait]
impl SimulationStore for PgStore {
    async fn save(&self, record: &SimulationRecord) -> anyhow::Result<()> {
        simulations::insert_simulation(&self.pool, record).await
    }
}
