//! OAuth client credential generation.
//!
//! Credentials come from OS randomness, hex-encoded. The secret is
//! shown to the user exactly once after creation and stored server-side
//! for client authentication.

use rand::rngs::OsRng;
use rand::RngCore;

/// 32 hex characters.
pub fn generate_client_id() -> String {
    token(16)
}

/// 64 hex characters.
pub fn generate_client_secret() -> String {
    token(32)
}

fn token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_have_the_expected_shape() {
        let id = generate_client_id();
        let secret = generate_client_secret();
        assert_eq!(id.len(), 32);
        assert_eq!(secret.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(generate_client_secret(), secret);
    }
}
