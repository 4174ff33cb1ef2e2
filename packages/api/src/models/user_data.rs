//! Per-user key/value entries edited from the user-data page.
//!
//! Keys are unique per user and immutable once created: the upsert only
//! ever rewrites the value, and the edit form locks the key field.

use serde::{Deserialize, Serialize};

/// A key/value pair owned by `username`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDataEntry {
    pub key: String,
    pub value: String,
    pub username: String,
}

/// Decide whether a submitted username is an explicit override.
///
/// A normal user implicitly acts on their own data; an administrator may
/// type another username into the form. Only a value that differs from
/// the session default travels in the payload.
pub fn username_override(entered: &str, default: &str) -> Option<String> {
    let entered = entered.trim();
    if entered.is_empty() || entered == default {
        None
    } else {
        Some(entered.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_username_is_not_an_override() {
        assert_eq!(username_override("alice", "alice"), None);
        assert_eq!(username_override("", "alice"), None);
        assert_eq!(username_override("  alice ", "alice"), None);
    }

    #[test]
    fn another_username_is_an_override() {
        assert_eq!(
            username_override("bob", "alice"),
            Some("bob".to_string())
        );
    }
}
