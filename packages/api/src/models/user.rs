//! # User model
//!
//! Two representations of a userhub account:
//!
//! - [`User`] (server only) is the full `users` row, loaded via
//!   [`sqlx::FromRow`]. It carries the Argon2 password hash, the admin
//!   flag, and every profile column. [`User::to_info`] projects it into
//!   the client-safe form.
//! - [`UserInfo`] crosses the server/client boundary through server
//!   functions. It drops the hash and the audit timestamps.
//!
//! [`ProfileUpdate`] is the payload of the profile save: every field is
//! optional, and only the fields that are present get written. The
//! optional [`AvatarUpload`] carries the picked image inline.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub admin: bool,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub real_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            username: self.username.clone(),
            admin: self.admin,
            email: self.email.clone(),
            phone: self.phone.clone(),
            real_name: self.real_name.clone(),
            bio: self.bio.clone(),
            location: self.location.clone(),
            website: self.website.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub username: String,
    pub admin: bool,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub real_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
}

/// Profile fields submitted from the settings page. Absent fields are
/// left untouched on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub real_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar: Option<AvatarUpload>,
}

/// An avatar image picked in the profile form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvatarUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}
