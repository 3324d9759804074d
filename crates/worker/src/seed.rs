use anyhow::Context;
use simvest_core::config::Settings;
use simvest_core::domain::contract::{SeedCatalog, SeedDocument};
use std::path::{Path, PathBuf};

/// `--file` wins over `SEED_FILE`.
pub fn resolve_seed_path(arg: Option<&Path>, settings: &Settings) -> anyhow::Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path.to_path_buf());
    }
    Ok(PathBuf::from(settings.require_seed_file()?))
}

pub fn load_seed_file(path: &Path) -> anyhow::Result<SeedCatalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    SeedDocument::parse(&text).with_context(|| format!("invalid seed file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(seed_file: Option<&str>) -> Settings {
        Settings {
            database_url: None,
            sentry_dsn: None,
            seed_file: seed_file.map(str::to_string),
        }
    }

    #[test]
    fn cli_path_overrides_env() {
        let path = resolve_seed_path(Some(Path::new("cli.json")), &settings(Some("env.json"))).unwrap();
        assert_eq!(path, PathBuf::from("cli.json"));
    }

    #[test]
    fn env_path_is_used_without_cli_path() {
        let path = resolve_seed_path(None, &settings(Some("env.json"))).unwrap();
        assert_eq!(path, PathBuf::from("env.json"));
    }

    #[test]
    fn missing_path_is_an_error() {
        assert!(resolve_seed_path(None, &settings(None)).is_err());
    }

    #[test]
    fn loads_bundled_seed_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("seed/default.json");
        let catalog = load_seed_file(&path).unwrap();
        assert!(!catalog.clients.is_empty());
        assert!(!catalog.products.is_empty());
    }

    #[test]
    fn unreadable_file_is_an_error() {
        assert!(load_seed_file(Path::new("/nonexistent/seed.json")).is_err());
    }
}
