use crate::domain::client::Client;
use crate::domain::product::Product;
use crate::domain::profile::ProfileCategory;
use crate::domain::recommendation::ScoredProduct;
use crate::engine::compatibility::{
    client_tolerance_level, product_risk_level, score_client, score_profile,
};
use crate::error::{EngineError, EngineResult};
use crate::storage::ProductCatalog;

/// Pick the best product of `product_type` for `client`.
///
/// Products above the client's tolerance are dropped unless that would leave
/// nothing, in which case the full set is scored. `term_months` does not
/// influence the choice.
pub async fn recommend(
    catalog: &dyn ProductCatalog,
    client: &Client,
    product_type: &str,
    term_months: i32,
) -> EngineResult<Product> {
    let products = catalog
        .find_products_by_type(product_type)
        .await
        .map_err(EngineError::Repository)?;

    let product = select_product(client, &products)
        .cloned()
        .ok_or_else(|| EngineError::ProductNotFound(product_type.to_string()))?;

    tracing::debug!(
        client_id = client.id,
        product_type,
        term_months,
        candidates = products.len(),
        product_id = product.id,
        "product recommended"
    );
    Ok(product)
}

/// Highest `score_client` among eligible products; the first one wins a tie.
///
/// Returns `None` only when `products` is empty.
pub fn select_product<'a>(client: &Client, products: &'a [Product]) -> Option<&'a Product> {
    let tolerance = client_tolerance_level(client);
    let within: Vec<&Product> = products
        .iter()
        .filter(|p| product_risk_level(p) <= tolerance)
        .collect();

    let candidates = if within.is_empty() {
        tracing::debug!(
            client_id = client.id,
            tolerance,
            "no product within tolerance; scoring all candidates"
        );
        products.iter().collect()
    } else {
        within
    };

    let mut best: Option<(f64, &Product)> = None;
    for product in candidates {
        let score = score_client(product, client);
        match best {
            Some((top, _)) if score <= top => {}
            _ => best = Some((score, product)),
        }
    }
    best.map(|(_, product)| product)
}

/// Rank products for a profile category, best first. Ties keep catalog order.
pub fn rank_for_profile(products: &[Product], category: ProfileCategory) -> Vec<ScoredProduct> {
    let mut scored: Vec<ScoredProduct> = products
        .iter()
        .map(|product| ScoredProduct {
            score: score_profile(product, category),
            product: product.clone(),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}
