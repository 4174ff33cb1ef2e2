//! Session and password authentication.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod secrets;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use secrets::{generate_client_id, generate_client_secret};

/// Session key holding the signed-in username.
pub const SESSION_USERNAME_KEY: &str = "userhub.username";
