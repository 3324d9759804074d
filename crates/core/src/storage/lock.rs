use anyhow::Context;

// Advisory locks are scoped to the Postgres session. This is used as a best-effort guard against
// concurrent seed runs rewriting the same catalog.
const SEED_LOCK_KEY: i64 = 0x5349_4D56_5345; // "SIMVSE"

pub async fn try_acquire_seed_lock(pool: &sqlx::PgPool) -> anyhow::Result<bool> {
    let acquired: (bool,) = sqlx::query_as("SELECT pg_try_advisory_lock($1)")
        .persistent(false)
        .bind(SEED_LOCK_KEY)
        .fetch_one(pool)
        .await
        .with_context(|| format!("failed to acquire advisory lock (key={SEED_LOCK_KEY})"))?;
    Ok(acquired.0)
}

pub async fn release_seed_lock(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::query("SELECT pg_advisory_unlock($1)")
        .persistent(false)
        .bind(SEED_LOCK_KEY)
        .execute(pool)
        .await
        .with_context(|| format!("failed to release advisory lock (key={SEED_LOCK_KEY})"))?;
    Ok(())
}
