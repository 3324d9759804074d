use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simvest_core::domain::profile::{ProfileCategory, RiskProfile};
use simvest_core::domain::recommendation::ScoredProduct;
use simvest_core::domain::simulation::{
    DailyProductSummary, SimulationRecord, SimulationRequest, SimulationResult,
};
use simvest_core::storage::{self, PgStore};
use simvest_core::{EngineError, SimulationOrchestrator};

mod error;

use error::ApiError;

const DEFAULT_HISTORY_LIMIT: i64 = 100;
const MAX_HISTORY_LIMIT: i64 = 1000;

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
    let pool: Option<PgPool> = match settings.require_database_url() {
        Ok(db_url) => match sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
        {
            Ok(pool) => match storage::migrate(&pool).await {
                Ok(()) => Some(pool),
                Err(e) => {
                    sentry_anyhow::capture_anyhow(&e);
                    tracing::error!(error = %e, "db migrations failed; starting API in degraded mode");
                    None
                }
            },
            Err(e) => {
                let err = anyhow::Error::new(e);
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "db connect failed; starting API in degraded mode");
                None
            }
        },
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "DATABASE_URL missing; starting API in degraded mode");
            None
        }
    };

    let state = AppState::new(pool);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/simulations", post(create_simulation).get(list_simulations))
        .route("/simulations/daily", get(daily_simulations))
        .route("/clients/:client_id/risk-profile", get(get_risk_profile))
        .route("/products/recommended/:profile", get(get_recommended_products))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    pool: Option<PgPool>,
    orchestrator: Option<SimulationOrchestrator>,
}

impl AppState {
    fn new(pool: Option<PgPool>) -> Self {
        let orchestrator = pool
            .clone()
            .map(|pool| SimulationOrchestrator::with_backend(Arc::new(PgStore::new(pool))));
        Self { pool, orchestrator }
    }

    fn pool(&self) -> Result<&PgPool, ApiError> {
        self.pool.as_ref().ok_or(ApiError::Unavailable)
    }
}

#[derive(Debug, Serialize)]
struct ApiSimulation {
    /// False when the result was computed but the write was not confirmed.
    recorded: bool,
    #[serde(flatten)]
    result: SimulationResult,
}

async fn create_simulation(
    State(state): State<AppState>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<ApiSimulation>, ApiError> {
    let orchestrator = state.orchestrator.as_ref().ok_or(ApiError::Unavailable)?;

    match orchestrator.simulate(&request).await {
        Ok(result) => Ok(Json(ApiSimulation {
            recorded: true,
            result,
        })),
        Err(EngineError::PersistenceFailure { result, source }) => {
            sentry_anyhow::capture_anyhow(&source);
            tracing::warn!(
                client_id = request.client_id,
                error = ?source,
                "returning unrecorded simulation"
            );
            Ok(Json(ApiSimulation {
                recorded: false,
                result: *result,
            }))
        }
        Err(err) => Err(err.into()),
    }
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    limit: Option<i64>,
}

async fn list_simulations(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<SimulationRecord>>, ApiError> {
    let pool = state.pool()?;
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be 1..={MAX_HISTORY_LIMIT} (got {limit})"
        )));
    }

    let records = storage::simulations::list_recent(pool, limit).await?;
    Ok(Json(records))
}

async fn daily_simulations(
    State(state): State<AppState>,
) -> Result<Json<Vec<DailyProductSummary>>, ApiError> {
    let pool = state.pool()?;
    let summaries = storage::simulations::daily_summaries(pool).await?;
    Ok(Json(summaries))
}

#[derive(Debug, Serialize)]
struct ApiRiskProfile {
    client_id: i64,
    #[serde(flatten)]
    profile: RiskProfile,
}

async fn get_risk_profile(
    State(state): State<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<ApiRiskProfile>, ApiError> {
    let pool = state.pool()?;
    let client = storage::clients::find_client(pool, client_id)
        .await?
        .ok_or(EngineError::ClientNotFound(client_id))?;

    Ok(Json(ApiRiskProfile {
        client_id,
        profile: simvest_core::classify_risk(&client),
    }))
}

async fn get_recommended_products(
    State(state): State<AppState>,
    Path(profile): Path<String>,
) -> Result<Json<Vec<ScoredProduct>>, ApiError> {
    let pool = state.pool()?;
    let category = profile
        .parse::<ProfileCategory>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let products = storage::products::list_products(pool).await?;
    Ok(Json(simvest_core::rank_for_profile(&products, category)))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
