use crate::domain::simulation::{DailyProductSummary, SimulationRecord};
use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

pub async fn insert_simulation(pool: &sqlx::PgPool, record: &SimulationRecord) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO simulations (id, client_id, product_id, product_name, principal, final_value, \
                                  term_months, simulated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(record.id)
    .bind(record.client_id)
    .bind(record.product_id)
    .bind(&record.product_name)
    .bind(record.principal)
    .bind(record.final_value)
    .bind(record.term_months)
    .bind(record.simulated_at)
    .execute(pool)
    .await
    .with_context(|| format!("insert simulations failed (id={})", record.id))?;
    Ok(())
}

pub async fn list_recent(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<Vec<SimulationRecord>> {
    let rows = sqlx::query_as::<_, (Uuid, i64, i64, String, Decimal, Decimal, i32, DateTime<Utc>)>(
        "SELECT id, client_id, product_id, product_name, principal, final_value, term_months, simulated_at \
         FROM simulations \
         ORDER BY simulated_at DESC, id ASC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("select simulations failed")?;

    Ok(rows
        .into_iter()
        .map(
            |(id, client_id, product_id, product_name, principal, final_value, term_months, simulated_at)| {
                SimulationRecord {
                    id,
                    client_id,
                    product_id,
                    product_name,
                    principal,
                    final_value,
                    term_months,
                    simulated_at,
                }
            },
        )
        .collect())
}

pub async fn daily_summaries(pool: &sqlx::PgPool) -> anyhow::Result<Vec<DailyProductSummary>> {
    let rows = sqlx::query_as::<_, (NaiveDate, i64, String, i64, Decimal, Decimal)>(
        "SELECT (simulated_at AT TIME ZONE 'UTC')::date AS day, \
                product_id, \
                product_name, \
                COUNT(*) AS simulations, \
                ROUND(AVG(final_value), 2) AS average_final_value, \
                SUM(principal) AS total_principal \
         FROM simulations \
         GROUP BY day, product_id, product_name \
         ORDER BY day DESC, product_id ASC",
    )
    .fetch_all(pool)
    .await
    .context("aggregate simulations failed")?;

    Ok(rows
        .into_iter()
        .map(
            |(day, product_id, product_name, simulations, average_final_value, total_principal)| {
                DailyProductSummary {
                    day,
                    product_id,
                    product_name,
                    simulations,
                    average_final_value,
                    total_principal,
                }
            },
        )
        .collect())
}
