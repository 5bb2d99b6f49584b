use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// 16 MiB; article `content` has no size cap of its own.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SeithiConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Origins allowed by the CORS layer. A `:*` suffix matches any port
    /// (`http://localhost:*`). Empty means no cross-origin access.
    pub cors_origins: Vec<String>,
    /// Largest accepted request body. Bigger bodies get 413.
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct IngestConfig {
    /// Shared bearer secret for `POST /api/ingest`. There is deliberately no
    /// fallback value; with no secret configured every ingest is rejected.
    pub secret: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            log_level: "info".into(),
            cors_origins: vec!["http://localhost:*".into(), "http://127.0.0.1:*".into()],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_seithi_dir()
            .join("seithi.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

/// Returns `~/.seithi/`
pub fn default_seithi_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".seithi")
}

/// Returns the default config file path: `~/.seithi/config.toml`
pub fn default_config_path() -> PathBuf {
    default_seithi_dir().join("config.toml")
}

impl SeithiConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            SeithiConfig::default()
        };

        config.apply_env_overrides()?;
        // `secret = ""` in TOML means the same as no secret at all
        config.ingest.secret = config.ingest.secret.filter(|s| !s.is_empty());
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (SEITHI_DB, SEITHI_HOST, SEITHI_PORT, SEITHI_LOG_LEVEL, INGEST_SECRET).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("SEITHI_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("SEITHI_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SEITHI_PORT") {
            self.server.port = val
                .parse()
                .with_context(|| format!("SEITHI_PORT is not a valid port: {val}"))?;
        }
        if let Ok(val) = std::env::var("SEITHI_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("INGEST_SECRET") {
            if !val.is_empty() {
                self.ingest.secret = Some(val);
            }
        }
        Ok(())
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
