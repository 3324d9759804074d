use crate::domain::client::RiskLevel;
use crate::domain::product::Product;
use anyhow::Context;

type ProductRow = (i64, String, String, Option<f64>, Option<String>);

pub async fn find_products_by_type(
    pool: &sqlx::PgPool,
    product_type: &str,
) -> anyhow::Result<Vec<Product>> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, product_type, profitability, risk \
         FROM products \
         WHERE upper(product_type) = upper($1) \
         ORDER BY id ASC",
    )
    .bind(product_type.trim())
    .fetch_all(pool)
    .await
    .with_context(|| format!("select products failed (type={product_type})"))?;

    rows.into_iter().map(product_from_row).collect()
}

pub async fn list_products(pool: &sqlx::PgPool) -> anyhow::Result<Vec<Product>> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, product_type, profitability, risk \
         FROM products \
         ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
    .context("select products failed")?;

    rows.into_iter().map(product_from_row).collect()
}

fn product_from_row(row: ProductRow) -> anyhow::Result<Product> {
    let (id, name, product_type, profitability, risk) = row;
    Ok(Product {
        id,
        name,
        product_type,
        profitability,
        risk: risk
            .as_deref()
            .map(str::parse::<RiskLevel>)
            .transpose()
            .with_context(|| format!("invalid risk for product {id}"))?,
    })
}

pub async fn upsert_products(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    products: &[Product],
) -> anyhow::Result<u64> {
    let mut affected: u64 = 0;
    for product in products {
        let res = sqlx::query(
            "INSERT INTO products (id, name, product_type, profitability, risk) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE \
               SET name = EXCLUDED.name, \
                   product_type = EXCLUDED.product_type, \
                   profitability = EXCLUDED.profitability, \
                   risk = EXCLUDED.risk",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.product_type)
        .bind(product.profitability)
        .bind(product.risk.map(|r| r.as_str()))
        .execute(&mut **tx)
        .await
        .with_context(|| format!("upsert product failed (id={})", product.id))?;
        affected += res.rows_affected();
    }
    Ok(affected)
}
