//! This crate contains all shared UI for the workspace.

pub mod views;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod notice;
pub use notice::{Notice, NoticeBanner};

mod clipboard;
pub use clipboard::copy_to_clipboard;
