//! # OAuth client registrations
//!
//! [`OAuthClient`] (server only) is the full `oauth_clients` row,
//! secret included. Two projections cross to the client:
//!
//! - [`OAuthClientInfo`] — what the list and the edit form see. Never
//!   carries the secret.
//! - [`OAuthClientCredentials`] — id, secret, and the display fields,
//!   returned exactly once by the create operation. After that response
//!   the secret is not retrievable again.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;

/// Full client record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct OAuthClient {
    pub id: i64,
    pub client_id: String,
    pub client_secret: String,
    pub name: String,
    pub redirect_uri: String,
    pub created_by: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl OAuthClient {
    pub fn to_info(&self) -> OAuthClientInfo {
        OAuthClientInfo {
            client_id: self.client_id.clone(),
            name: self.name.clone(),
            redirect_uri: self.redirect_uri.clone(),
        }
    }

    /// Projection carrying the secret. Only used by the create path.
    pub fn to_credentials(&self) -> OAuthClientCredentials {
        OAuthClientCredentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            name: self.name.clone(),
            redirect_uri: self.redirect_uri.clone(),
        }
    }
}

/// Client record without the secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OAuthClientInfo {
    pub client_id: String,
    pub name: String,
    pub redirect_uri: String,
}

/// One-time credentials returned when a client is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OAuthClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub name: String,
    pub redirect_uri: String,
}

/// Response of the create/update operations. `client` is populated only
/// on creation, so the UI can show the credential reveal exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientSaveResponse {
    pub message: String,
    pub client: Option<OAuthClientCredentials>,
}

impl ClientSaveResponse {
    pub fn created(message: impl Into<String>, client: OAuthClientCredentials) -> Self {
        Self {
            message: message.into(),
            client: Some(client),
        }
    }

    pub fn updated(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            client: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_response_never_carries_credentials() {
        let response = ClientSaveResponse::updated("OAuth client updated");
        assert!(response.client.is_none());

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("client_secret"));
    }

    #[test]
    fn create_response_carries_credentials_inline() {
        let response = ClientSaveResponse::created(
            "OAuth client created",
            OAuthClientCredentials {
                client_id: "abc".into(),
                client_secret: "shh".into(),
                name: "demo".into(),
                redirect_uri: "https://example.com/callback".into(),
            },
        );
        let client = response.client.expect("credentials on create");
        assert_eq!(client.client_secret, "shh");
    }
}
