use crate::domain::client::{Client, MovementFrequency, Preference, RiskLevel};
use anyhow::Context;
use rust_decimal::Decimal;

type ClientRow = (
    i64,
    String,
    i32,
    Option<String>,
    Option<String>,
    Option<Decimal>,
    Option<String>,
);

pub async fn find_client(pool: &sqlx::PgPool, id: i64) -> anyhow::Result<Option<Client>> {
    let row = sqlx::query_as::<_, ClientRow>(
        "SELECT id, name, preferred_term_months, preference, max_acceptable_risk, \
                total_invested_volume, movement_frequency \
         FROM clients \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("select client failed (id={id})"))?;

    row.map(client_from_row).transpose()
}

fn client_from_row(row: ClientRow) -> anyhow::Result<Client> {
    let (id, name, preferred_term_months, preference, max_risk, volume, frequency) = row;
    Ok(Client {
        id,
        name,
        preferred_term_months,
        preference: preference
            .as_deref()
            .map(str::parse::<Preference>)
            .transpose()
            .with_context(|| format!("invalid preference for client {id}"))?,
        max_acceptable_risk: max_risk
            .as_deref()
            .map(str::parse::<RiskLevel>)
            .transpose()
            .with_context(|| format!("invalid max_acceptable_risk for client {id}"))?,
        total_invested_volume: volume,
        movement_frequency: frequency
            .as_deref()
            .map(str::parse::<MovementFrequency>)
            .transpose()
            .with_context(|| format!("invalid movement_frequency for client {id}"))?,
    })
}

pub async fn upsert_clients(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    clients: &[Client],
) -> anyhow::Result<u64> {
    let mut affected: u64 = 0;
    for client in clients {
        let res = sqlx::query(
            "INSERT INTO clients (id, name, preferred_term_months, preference, max_acceptable_risk, \
                                  total_invested_volume, movement_frequency) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE \
               SET name = EXCLUDED.name, \
                   preferred_term_months = EXCLUDED.preferred_term_months, \
                   preference = EXCLUDED.preference, \
                   max_acceptable_risk = EXCLUDED.max_acceptable_risk, \
                   total_invested_volume = EXCLUDED.total_invested_volume, \
                   movement_frequency = EXCLUDED.movement_frequency",
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(client.preferred_term_months)
        .bind(client.preference.map(|p| p.as_str()))
        .bind(client.max_acceptable_risk.map(|r| r.as_str()))
        .bind(client.total_invested_volume)
        .bind(client.movement_frequency.map(|f| f.as_str()))
        .execute(&mut **tx)
        .await
        .with_context(|| format!("upsert client failed (id={})", client.id))?;
        affected += res.rows_affected();
    }
    Ok(affected)
}
