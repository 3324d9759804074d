use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use simvest_core::domain::simulation::SimulationRequest;
use simvest_core::storage::memory::InMemoryStore;
use simvest_core::storage::PgStore;
use simvest_core::SimulationOrchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod seed;
mod simulate;

#[derive(Debug, Parser)]
#[command(name = "simvest_worker")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a seed file and upsert its clients and products.
    Seed {
        /// Seed JSON file. Defaults to SEED_FILE.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Validate only; do not touch the database.
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a single simulation and print the result as JSON.
    Simulate {
        #[arg(long)]
        client_id: i64,

        #[arg(long)]
        principal: Decimal,

        #[arg(long)]
        term_months: i32,

        #[arg(long)]
        product_type: String,

        /// Simulate against this seed file in memory instead of the database.
        #[arg(long)]
        seed_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = simvest_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let outcome = match args.command {
        Command::Seed { file, dry_run } => run_seed(&settings, file, dry_run).await,
        Command::Simulate {
            client_id,
            principal,
            term_months,
            product_type,
            seed_file,
        } => {
            let request = SimulationRequest {
                client_id,
                principal: Some(principal),
                term_months: Some(term_months),
                product_type: Some(product_type),
            };
            run_simulate(&settings, request, seed_file).await
        }
    };

    if let Err(err) = &outcome {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = ?err, "worker command failed");
    }
    outcome
}

async fn run_seed(
    settings: &simvest_core::config::Settings,
    file: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let path = seed::resolve_seed_path(file.as_deref(), settings)?;
    let catalog = seed::load_seed_file(&path)?;

    if dry_run {
        tracing::info!(
            path = %path.display(),
            dry_run = true,
            clients_len = catalog.clients.len(),
            products_len = catalog.products.len(),
            "seed file validated"
        );
        return Ok(());
    }

    let pool = connect(settings).await?;

    let acquired = simvest_core::storage::lock::try_acquire_seed_lock(&pool).await?;
    if !acquired {
        tracing::warn!("seed lock not acquired; another seed run in progress");
        return Ok(());
    }

    let persisted = simvest_core::storage::seed::persist_catalog(&pool, &catalog).await;
    let _ = simvest_core::storage::lock::release_seed_lock(&pool).await;
    let counts = persisted?;

    tracing::info!(
        path = %path.display(),
        clients = counts.clients,
        products = counts.products,
        "seed catalog persisted"
    );
    Ok(())
}

async fn run_simulate(
    settings: &simvest_core::config::Settings,
    request: SimulationRequest,
    seed_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let orchestrator = match seed_file {
        Some(path) => {
            let catalog = seed::load_seed_file(&path)?;
            SimulationOrchestrator::with_backend(Arc::new(InMemoryStore::from_catalog(catalog)))
        }
        None => {
            let pool = connect(settings).await?;
            SimulationOrchestrator::with_backend(Arc::new(PgStore::new(pool)))
        }
    };

    let output = simulate::run(&orchestrator, &request).await?;
    let json = serde_json::to_string_pretty(&output).context("serialize simulation failed")?;
    println!("{json}");
    Ok(())
}

async fn connect(settings: &simvest_core::config::Settings) -> anyhow::Result<sqlx::PgPool> {
    let db_url = settings.require_database_url()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await
        .context("connect DATABASE_URL failed")?;

    simvest_core::storage::migrate(&pool).await?;
    Ok(pool)
}

fn init_sentry(settings: &simvest_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
