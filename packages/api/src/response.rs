//! # Mutation responses and their interpretation
//!
//! Every mutating server function answers with an [`ApiResponse`]: a
//! `message` on success, an `error` with the human-readable reason on a
//! business failure. [`SubmitOutcome::from_result`] is the single place
//! that turns a completed call into what the UI shows, covering the
//! three failure classes:
//!
//! 1. server-reported error — the `error` text surfaced verbatim,
//! 2. a response carrying neither field — generic unknown-error fallback,
//! 3. transport failure — a connectivity message.

use dioxus::prelude::ServerFnError;
use serde::{Deserialize, Serialize};

/// Wire shape of every mutating endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
        }
    }
}

/// What a completed submission means for the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Success(String),
    Failure(String),
}

impl SubmitOutcome {
    /// Interpret a server call. `context` names the failed action, e.g.
    /// "Failed to update data".
    pub fn from_result(result: Result<ApiResponse, ServerFnError>, context: &str) -> Self {
        match result {
            Ok(response) => match (response.message, response.error) {
                (Some(message), _) => Self::Success(message),
                (None, Some(error)) => Self::Failure(format!("{context}: {error}")),
                (None, None) => Self::Failure(format!("{context}: unknown error")),
            },
            Err(error) => Self::from_failure(&error, context),
        }
    }

    /// Classify a failed call. Errors raised by the server function keep
    /// their text; request-level failures that never reached the server
    /// collapse to the connectivity message.
    pub fn from_failure(error: &ServerFnError, context: &str) -> Self {
        match error {
            ServerFnError::Request(_) => {
                Self::Failure(format!("{context}: please check your network connection"))
            }
            ServerFnError::ServerError { message, .. } => {
                Self::Failure(format!("{context}: {message}"))
            }
            other => Self::Failure(format!("{context}: {other}")),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_wins() {
        let outcome = SubmitOutcome::from_result(
            Ok(ApiResponse::success("Data saved")),
            "Failed to add data",
        );
        assert_eq!(outcome, SubmitOutcome::Success("Data saved".to_string()));
    }

    #[test]
    fn server_error_is_surfaced_verbatim() {
        let outcome = SubmitOutcome::from_result(
            Ok(ApiResponse::error("key already exists")),
            "Failed to add data",
        );
        assert_eq!(
            outcome,
            SubmitOutcome::Failure("Failed to add data: key already exists".to_string())
        );
    }

    #[test]
    fn empty_body_takes_the_unknown_error_fallback() {
        let outcome = SubmitOutcome::from_result(Ok(ApiResponse::default()), "Failed to update data");
        assert_eq!(
            outcome,
            SubmitOutcome::Failure("Failed to update data: unknown error".to_string())
        );
    }

    #[test]
    fn transport_failure_maps_to_connectivity_message() {
        let outcome = SubmitOutcome::from_result(
            Err(ServerFnError::Request(
                dioxus::fullstack::RequestError::Request("connection reset".to_string()),
            )),
            "Failed to delete data",
        );
        assert_eq!(
            outcome,
            SubmitOutcome::Failure(
                "Failed to delete data: please check your network connection".to_string()
            )
        );
    }

    #[test]
    fn server_raised_error_keeps_its_text() {
        // Server functions raise business errors with ServerFnError::new,
        // which must reach the user verbatim, not as a network complaint.
        let outcome = SubmitOutcome::from_failure(
            &ServerFnError::new("OAuth client not found"),
            "Failed to save OAuth client",
        );
        assert_eq!(
            outcome,
            SubmitOutcome::Failure(
                "Failed to save OAuth client: OAuth client not found".to_string()
            )
        );

        let transport = SubmitOutcome::from_failure(
            &ServerFnError::Request(dioxus::fullstack::RequestError::Timeout(
                "timed out".to_string(),
            )),
            "Failed to save OAuth client",
        );
        assert_eq!(
            transport,
            SubmitOutcome::Failure(
                "Failed to save OAuth client: please check your network connection".to_string()
            )
        );
    }
}
