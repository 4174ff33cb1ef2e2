//! # Server configuration persistence
//!
//! The [`ServerConfig`] edited from the admin form lives in a JSON file
//! next to the server (`server_config.json`, overridable through
//! `USERHUB_CONFIG_PATH`). A missing or unreadable file means the
//! default configuration; a corrupt file is logged and also falls back
//! to defaults rather than taking the settings page down.

use std::path::PathBuf;

use crate::models::ServerConfig;

/// Failure to persist the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigStoreError {
    #[error("failed to write config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn config_path() -> PathBuf {
    std::env::var("USERHUB_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("server_config.json"))
}

/// Load the current configuration, falling back to defaults.
pub async fn load() -> ServerConfig {
    let path = config_path();
    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("corrupt config file {}: {e}", path.display());
            ServerConfig::default()
        }),
        Err(_) => ServerConfig::default(),
    }
}

/// Persist the configuration wholesale.
pub async fn save(config: &ServerConfig) -> Result<(), ConfigStoreError> {
    let contents = serde_json::to_string_pretty(config)?;
    tokio::fs::write(config_path(), contents).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server_config.json");
        std::env::set_var("USERHUB_CONFIG_PATH", &path);

        let mut config = ServerConfig::default();
        config.server_name = "Round Trip".to_string();
        config.max_users = 7;
        save(&config).await.unwrap();

        assert_eq!(load().await, config);

        // Corrupt file falls back to defaults instead of erroring.
        tokio::fs::write(&path, "{not json").await.unwrap();
        assert_eq!(load().await, ServerConfig::default());

        std::env::remove_var("USERHUB_CONFIG_PATH");
    }
}
