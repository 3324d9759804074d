pub mod domain;
pub mod engine;
pub mod error;
pub mod storage;

pub use engine::{
    classify_risk, project, rank_for_profile, recommend, score_client, score_profile,
    validate, SimulationOrchestrator,
};
pub use error::{EngineError, EngineResult};

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub database_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub seed_file: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                database_url: non_blank_var("DATABASE_URL"),
                sentry_dsn: non_blank_var("SENTRY_DSN"),
                seed_file: non_blank_var("SEED_FILE"),
            })
        }

        pub fn require_database_url(&self) -> anyhow::Result<&str> {
            self.database_url
                .as_deref()
                .context("DATABASE_URL is required")
        }

        pub fn require_seed_file(&self) -> anyhow::Result<&str> {
            self.seed_file
                .as_deref()
                .context("SEED_FILE (or --file) is required")
        }
    }

    fn non_blank_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }
}
