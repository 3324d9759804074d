use crate::domain::client::Client;
use crate::domain::product::Product;
use anyhow::{bail, ensure, Context};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Seed file layout as written by hand or exported from account management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Seed data that passed validation. Products are ordered by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedCatalog {
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
}

impl SeedDocument {
    pub fn parse(text: &str) -> anyhow::Result<SeedCatalog> {
        let parsed = serde_json::from_str::<SeedDocument>(text)
            .context("seed document is not valid JSON for the seed schema")?;
        parsed.validate_and_into_catalog()
    }

    pub fn validate_and_into_catalog(self) -> anyhow::Result<SeedCatalog> {
        ensure!(
            !self.clients.is_empty() || !self.products.is_empty(),
            "seed document must contain at least one client or product"
        );

        let mut seen_clients = BTreeSet::<i64>::new();
        let mut clients = Vec::with_capacity(self.clients.len());
        for client in self.clients {
            clients.push(validate_client(client, &mut seen_clients)?);
        }

        let mut seen_products = BTreeSet::<i64>::new();
        let mut products = Vec::with_capacity(self.products.len());
        for product in self.products {
            products.push(validate_product(product, &mut seen_products)?);
        }
        products.sort_by_key(|p| p.id);

        Ok(SeedCatalog { clients, products })
    }
}

fn validate_client(mut client: Client, seen: &mut BTreeSet<i64>) -> anyhow::Result<Client> {
    ensure!(seen.insert(client.id), "duplicate client id: {}", client.id);

    client.name = client.name.trim().to_string();
    ensure!(
        !client.name.is_empty(),
        "client {} name must be non-empty",
        client.id
    );

    ensure!(
        client.preferred_term_months >= 0,
        "client {} preferred_term_months must be >= 0 (got {})",
        client.id,
        client.preferred_term_months
    );

    if let Some(volume) = client.total_invested_volume {
        ensure!(
            volume >= Decimal::ZERO,
            "client {} total_invested_volume must be >= 0 (got {volume})",
            client.id
        );
    }

    Ok(client)
}

fn validate_product(mut product: Product, seen: &mut BTreeSet<i64>) -> anyhow::Result<Product> {
    ensure!(seen.insert(product.id), "duplicate product id: {}", product.id);

    product.name = product.name.trim().to_string();
    ensure!(
        !product.name.is_empty(),
        "product {} name must be non-empty",
        product.id
    );

    product.product_type = product.product_type.trim().to_ascii_uppercase();
    ensure!(
        !product.product_type.is_empty(),
        "product {} type must be non-empty",
        product.id
    );

    if let Some(rate) = product.profitability {
        if !rate.is_finite() || rate < 0.0 {
            bail!(
                "product {} profitability must be a finite, non-negative rate (got {rate})",
                product.id
            );
        }
    }

    Ok(product)
}
