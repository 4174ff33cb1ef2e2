//! # Server configuration — `server_config.json`
//!
//! The mutable server-wide settings an administrator edits from the
//! settings page. The whole record is constructed fresh from the form on
//! every save and persisted wholesale as JSON next to the server binary.
//!
//! All fields carry serde defaults so that a missing or partial config
//! file is equivalent to the default configuration. Booleans serialize
//! as JSON booleans and the numeric limits as JSON numbers; the admin
//! form is responsible for parsing its text inputs before the payload is
//! built.

use serde::{Deserialize, Serialize};

/// Top-level server configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub server_name: String,
    #[serde(default = "default_true")]
    pub allow_registration: bool,
    #[serde(default = "default_max_users")]
    pub max_users: u32,
    #[serde(default = "default_session_timeout")]
    pub session_timeout_secs: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default = "default_maintenance_message")]
    pub maintenance_message: String,
    #[serde(default)]
    pub smtp_settings: SmtpSettings,
}

/// Outbound mail settings, nested under `smtp_settings`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmtpSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub server: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_true")]
    pub use_tls: bool,
    #[serde(default)]
    pub from_email: String,
}

fn default_server_name() -> String {
    "Userhub".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_users() -> u32 {
    1000
}

fn default_session_timeout() -> u32 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_maintenance_message() -> String {
    "The system is under maintenance, please try again later".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: default_server_name(),
            allow_registration: true,
            max_users: default_max_users(),
            session_timeout_secs: default_session_timeout(),
            log_level: default_log_level(),
            maintenance_mode: false,
            maintenance_message: default_maintenance_message(),
            smtp_settings: SmtpSettings::default(),
        }
    }
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            server: String::new(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            use_tls: true,
            from_email: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_and_numbers_keep_their_json_types() {
        let config = ServerConfig {
            allow_registration: false,
            max_users: 50,
            ..ServerConfig::default()
        };

        let json: serde_json::Value = serde_json::to_value(&config).unwrap();
        assert_eq!(json["allow_registration"], serde_json::Value::Bool(false));
        assert_eq!(json["max_users"], serde_json::json!(50));
        assert!(json["max_users"].is_u64());
        assert!(json["smtp_settings"]["port"].is_u64());
        assert!(json["smtp_settings"]["use_tls"].is_boolean());
    }

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let config: ServerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let config: ServerConfig = serde_json::from_str(
            r#"{"server_name": "Staging", "smtp_settings": {"enabled": true}}"#,
        )
        .unwrap();
        assert_eq!(config.server_name, "Staging");
        assert!(config.allow_registration);
        assert_eq!(config.max_users, 1000);
        assert!(config.smtp_settings.enabled);
        assert_eq!(config.smtp_settings.port, 587);
        assert!(config.smtp_settings.use_tls);
    }
}
