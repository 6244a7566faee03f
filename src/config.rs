// src/config.rs
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::feed::sources::{apod, epic, neo};

const ENV_API_KEY: &str = "NASA_API_KEY";
const ENV_CONFIG_PATH: &str = "FEED_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/feed.toml";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Everything the service needs: the shared NASA API key plus the three
/// endpoint bases. Endpoints only change for tests or self-hosted mirrors,
/// so they default to api.nasa.gov and can be overridden from a TOML file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub apod_endpoint: String,
    pub epic_endpoint: String,
    pub epic_archive: String,
    pub neo_endpoint: String,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            apod_endpoint: apod::DEFAULT_ENDPOINT.to_string(),
            epic_endpoint: epic::DEFAULT_ENDPOINT.to_string(),
            epic_archive: epic::DEFAULT_ARCHIVE.to_string(),
            neo_endpoint: neo::DEFAULT_ENDPOINT.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct Overrides {
    apod_endpoint: Option<String>,
    epic_endpoint: Option<String>,
    epic_archive: Option<String>,
    neo_endpoint: Option<String>,
    bind_addr: Option<String>,
}

impl AppConfig {
    /// Load configuration using env var + fallbacks:
    /// 1) $FEED_CONFIG_PATH (must exist when set)
    /// 2) config/feed.toml
    /// 3) built-in defaults
    /// The API key always comes from $NASA_API_KEY, never from the file.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("FEED_CONFIG_PATH points to non-existent path"));
            }
            Self::from_file(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::from_file(&default_p)?
            } else {
                Self::default()
            }
        };

        cfg.api_key = env::var(ENV_API_KEY)
            .context("NASA_API_KEY is not set; put it in .env or the environment")?;
        Ok(cfg)
    }

    /// Defaults with any overrides present in the TOML file applied on top.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading feed config from {}", path.display()))?;
        let ov: Overrides = toml::from_str(&content)
            .with_context(|| format!("parsing feed config {}", path.display()))?;

        let mut cfg = Self::default();
        if let Some(v) = ov.apod_endpoint {
            cfg.apod_endpoint = v;
        }
        if let Some(v) = ov.epic_endpoint {
            cfg.epic_endpoint = v;
        }
        if let Some(v) = ov.epic_archive {
            cfg.epic_archive = v;
        }
        if let Some(v) = ov.neo_endpoint {
            cfg.neo_endpoint = v;
        }
        if let Some(v) = ov.bind_addr {
            cfg.bind_addr = v;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("feed.toml");
        fs::write(&p, r#"neo_endpoint = "http://localhost:9/neo""#).unwrap();

        let cfg = AppConfig::from_file(&p).unwrap();
        assert_eq!(cfg.neo_endpoint, "http://localhost:9/neo");
        assert_eq!(cfg.apod_endpoint, apod::DEFAULT_ENDPOINT);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("feed.toml");
        fs::write(&p, "not valid toml [[[").unwrap();
        assert!(AppConfig::from_file(&p).is_err());
    }
}
