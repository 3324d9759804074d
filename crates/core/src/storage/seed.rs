use crate::domain::contract::SeedCatalog;
use crate::storage::{clients, products};
use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub clients: u64,
    pub products: u64,
}

/// Upsert a validated catalog in a single transaction.
pub async fn persist_catalog(pool: &sqlx::PgPool, catalog: &SeedCatalog) -> anyhow::Result<SeedCounts> {
    let mut tx = pool.begin().await.context("begin transaction failed")?;

    let clients = clients::upsert_clients(&mut tx, &catalog.clients).await?;
    let products = products::upsert_products(&mut tx, &catalog.products).await?;

    tx.commit().await.context("commit transaction failed")?;

    tracing::debug!(clients, products, "seed catalog upserted");
    Ok(SeedCounts { clients, products })
}
