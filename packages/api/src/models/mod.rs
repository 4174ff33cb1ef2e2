pub mod oauth_client;
pub mod server_config;
pub mod user;
pub mod user_data;

pub use oauth_client::{ClientSaveResponse, OAuthClientCredentials, OAuthClientInfo};
pub use server_config::{ServerConfig, SmtpSettings};
pub use user::{AvatarUpload, ProfileUpdate, UserInfo};
pub use user_data::{username_override, UserDataEntry};

#[cfg(feature = "server")]
pub use oauth_client::OAuthClient;
#[cfg(feature = "server")]
pub use user::User;
