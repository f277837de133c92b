use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{DbConfig, RuntimeConfig};

pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub database_path: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            api_token: None,
            database_path: "./happyrow.db".to_string(),
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads from `HAPPYROW_CONFIG`, falling back to `./config.toml`.
    pub async fn load() -> Result<Self> {
        let path = env::var("HAPPYROW_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &str) -> Result<Self> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str(&content)
                .map_err(|err| anyhow!("failed to parse {}: {}", file_path.display(), err))?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        self.database_path = self.database_path.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.database_path = resolve_path(base, &self.database_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.database_path.is_empty() {
            return Err(anyhow!("database_path must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            database_path: self.database_path.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("HAPPYROW_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("HAPPYROW_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("HAPPYROW_DATABASE_PATH") {
            self.database_path = value;
        }
        if let Ok(value) = env::var("HAPPYROW_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("HAPPYROW_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("HAPPYROW_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.to_db_config().database_path, "./happyrow.db");
    }

    #[test]
    fn blank_token_and_log_dir_are_dropped() {
        let mut config = AppConfig {
            api_token: Some("   ".to_string()),
            log_dir: Some(String::new()),
            ..AppConfig::default()
        };
        config.normalize();
        assert!(config.api_token.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let config = AppConfig {
            bind_addr: "not an address".to_string(),
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bind_addr"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("database_path = \"data/events.db\"").unwrap();
        assert_eq!(config.database_path, "data/events.db");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.request_timeout_seconds, 15);
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let mut config = AppConfig {
            database_path: "happyrow.db".to_string(),
            log_dir: Some("/var/log/happyrow".to_string()),
            ..AppConfig::default()
        };
        config.resolve_paths(Some(Path::new("/etc/happyrow")));
        assert_eq!(config.database_path, "/etc/happyrow/happyrow.db");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/happyrow"));
    }
}
