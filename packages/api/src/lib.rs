//! # API crate — shared fullstack server functions for userhub
//!
//! Every server function the web frontend calls lives here, along with
//! the modules backing them.
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Session key, Argon2 password hashing, OAuth credential generation |
//! | [`config_store`] | `server` | JSON persistence of the admin-editable [`models::ServerConfig`] |
//! | [`db`] | `server` | Lazy Postgres pool |
//! | [`models`] | — | Database rows and their client-safe projections |
//! | [`response`] | — | [`ApiResponse`] wire shape and [`SubmitOutcome`] interpretation |
//!
//! Each public `async fn` below is a Dioxus server function compiled
//! twice: the real implementation behind `#[cfg(feature = "server")]`
//! and a thin client stub otherwise.
//!
//! - **Authentication**: `get_current_user`, `register`, `login_password`, `logout`
//! - **Settings**: `update_profile`, `get_server_config`, `save_server_config`
//! - **OAuth clients**: `list_oauth_clients`, `get_oauth_client`,
//!   `create_oauth_client`, `update_oauth_client`, `delete_oauth_client`
//! - **User data**: `list_user_data`, `save_user_data`, `delete_user_data`
//! - **User administration**: `list_users`, `create_user`, `set_user_admin`,
//!   `delete_user`

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod config_store;
pub mod db;
pub mod models;
pub mod response;

pub use models::{
    username_override, AvatarUpload, ClientSaveResponse, OAuthClientCredentials, OAuthClientInfo,
    ProfileUpdate, ServerConfig, SmtpSettings, UserDataEntry, UserInfo,
};
pub use response::{ApiResponse, SubmitOutcome};

/// Load the session user, or fail with a uniform "Not signed in".
#[cfg(feature = "server")]
async fn session_user(
    session: &tower_sessions::Session,
) -> Result<models::User, ServerFnError> {
    use crate::db::get_pool;

    let username: Option<String> = session
        .get(auth::SESSION_USERNAME_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(username) = username else {
        return Err(ServerFnError::new("Not signed in"));
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(&username)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    user.ok_or_else(|| ServerFnError::new("Not signed in"))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    match session_user(&session).await {
        Ok(user) => Ok(Some(user.to_info())),
        Err(_) => Ok(None),
    }
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Register a new account. Honors the server configuration: refused
/// while registration is disabled or the user limit has been reached.
/// The very first account becomes the administrator.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(username: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(ServerFnError::new("Username is required"));
    }
    if password.len() < 8 {
        return Err(ServerFnError::new("Password must be at least 8 characters"));
    }

    let config = config_store::load().await;
    if !config.allow_registration {
        return Err(ServerFnError::new("Registration is disabled"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if count >= i64::from(config.max_users) {
        return Err(ServerFnError::new("Registration is closed: user limit reached"));
    }

    let existing: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE username = $1")
        .bind(&username)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if existing.is_some() {
        return Err(ServerFnError::new("An account with this username already exists"));
    }

    let password_hash = auth::hash_password(&password).map_err(ServerFnError::new)?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (username, password_hash, admin) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&username)
    .bind(&password_hash)
    .bind(count == 0)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    session
        .insert(auth::SESSION_USERNAME_KEY, user.username.clone())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(username: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with username and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login_password(username: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let username = username.trim().to_string();

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(&username)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Invalid username or password"));
    };

    let valid =
        auth::verify_password(&password, &user.password_hash).map_err(ServerFnError::new)?;
    if !valid {
        return Err(ServerFnError::new("Invalid username or password"));
    }

    sqlx::query("UPDATE users SET last_login = NOW() WHERE username = $1")
        .bind(&user.username)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    session
        .insert(auth::SESSION_USERNAME_KEY, user.username.clone())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login_password(username: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Update the session user's profile. Only the allow-listed profile
/// columns are touched; absent fields stay as they are.
#[cfg(feature = "server")]
#[post("/api/settings/profile", session: tower_sessions::Session)]
pub async fn update_profile(profile: ProfileUpdate) -> Result<ApiResponse, ServerFnError> {
    use crate::db::get_pool;

    let user = match session_user(&session).await {
        Ok(user) => user,
        Err(_) => return Ok(ApiResponse::error("Not signed in")),
    };

    let mut avatar_url: Option<String> = None;
    if let Some(avatar) = &profile.avatar {
        let safe: String = avatar
            .filename
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            .collect();
        if safe.is_empty() {
            return Ok(ApiResponse::error("Invalid avatar filename"));
        }
        let dir = std::path::Path::new("static/uploads");
        let stored = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(dir.join(&safe), &avatar.bytes).await
        }
        .await;
        if let Err(e) = stored {
            return Ok(ApiResponse::error(format!("Failed to store avatar: {e}")));
        }
        avatar_url = Some(format!("/static/uploads/{safe}"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let updated = sqlx::query(
        "UPDATE users SET
            email = COALESCE($2, email),
            phone = COALESCE($3, phone),
            real_name = COALESCE($4, real_name),
            bio = COALESCE($5, bio),
            location = COALESCE($6, location),
            website = COALESCE($7, website),
            avatar_url = COALESCE($8, avatar_url)
         WHERE username = $1",
    )
    .bind(&user.username)
    .bind(&profile.email)
    .bind(&profile.phone)
    .bind(&profile.real_name)
    .bind(&profile.bio)
    .bind(&profile.location)
    .bind(&profile.website)
    .bind(&avatar_url)
    .execute(pool)
    .await;

    Ok(match updated {
        Ok(_) => ApiResponse::success("Profile updated"),
        Err(e) => ApiResponse::error(format!("Failed to update profile: {e}")),
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/profile")]
pub async fn update_profile(profile: ProfileUpdate) -> Result<ApiResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Current server configuration. Administrators only.
#[cfg(feature = "server")]
#[get("/api/settings/server", session: tower_sessions::Session)]
pub async fn get_server_config() -> Result<ServerConfig, ServerFnError> {
    let user = session_user(&session).await?;
    if !user.admin {
        return Err(ServerFnError::new("Not allowed"));
    }
    Ok(config_store::load().await)
}

#[cfg(not(feature = "server"))]
#[get("/api/settings/server")]
pub async fn get_server_config() -> Result<ServerConfig, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Persist the server configuration wholesale. Administrators only.
#[cfg(feature = "server")]
#[post("/api/settings/server", session: tower_sessions::Session)]
pub async fn save_server_config(config: ServerConfig) -> Result<ApiResponse, ServerFnError> {
    let user = match session_user(&session).await {
        Ok(user) => user,
        Err(_) => return Ok(ApiResponse::error("Not signed in")),
    };
    if !user.admin {
        return Ok(ApiResponse::error("Not allowed"));
    }

    Ok(match config_store::save(&config).await {
        Ok(()) => ApiResponse::success("Server configuration updated"),
        Err(e) => {
            tracing::error!("failed to save server config: {e}");
            ApiResponse::error("Failed to save server configuration")
        }
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/server")]
pub async fn save_server_config(config: ServerConfig) -> Result<ApiResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// OAuth clients created by the session user.
#[cfg(feature = "server")]
#[get("/api/oauth/clients/list", session: tower_sessions::Session)]
pub async fn list_oauth_clients() -> Result<Vec<OAuthClientInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = session_user(&session).await?;
    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let clients: Vec<models::OAuthClient> = sqlx::query_as(
        "SELECT * FROM oauth_clients WHERE created_by = $1 AND is_active ORDER BY created_at",
    )
    .bind(&user.username)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(clients.iter().map(|c| c.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/oauth/clients/list")]
pub async fn list_oauth_clients() -> Result<Vec<OAuthClientInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Look up one OAuth client for the edit form.
#[cfg(feature = "server")]
#[get("/api/oauth/clients", session: tower_sessions::Session)]
pub async fn get_oauth_client(client_id: String) -> Result<OAuthClientInfo, ServerFnError> {
    use crate::db::get_pool;

    let user = session_user(&session).await?;
    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let client: Option<models::OAuthClient> = sqlx::query_as(
        "SELECT * FROM oauth_clients WHERE client_id = $1 AND created_by = $2 AND is_active",
    )
    .bind(&client_id)
    .bind(&user.username)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    client
        .map(|c| c.to_info())
        .ok_or_else(|| ServerFnError::new("OAuth client not found"))
}

#[cfg(not(feature = "server"))]
#[get("/api/oauth/clients")]
pub async fn get_oauth_client(client_id: String) -> Result<OAuthClientInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create an OAuth client. The response is the only place the generated
/// secret ever appears.
#[cfg(feature = "server")]
#[post("/api/oauth/clients", session: tower_sessions::Session)]
pub async fn create_oauth_client(
    name: String,
    redirect_uri: String,
) -> Result<ClientSaveResponse, ServerFnError> {
    use crate::db::get_pool;

    let user = session_user(&session).await?;

    let name = name.trim().to_string();
    let redirect_uri = redirect_uri.trim().to_string();
    if name.is_empty() || redirect_uri.is_empty() {
        return Err(ServerFnError::new("Name and redirect URI are required"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let client: models::OAuthClient = sqlx::query_as(
        "INSERT INTO oauth_clients (client_id, client_secret, name, redirect_uri, created_by)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(auth::generate_client_id())
    .bind(auth::generate_client_secret())
    .bind(&name)
    .bind(&redirect_uri)
    .bind(&user.username)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(ClientSaveResponse::created(
        "OAuth client created",
        client.to_credentials(),
    ))
}

#[cfg(not(feature = "server"))]
#[post("/api/oauth/clients")]
pub async fn create_oauth_client(
    name: String,
    redirect_uri: String,
) -> Result<ClientSaveResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update an OAuth client's display name and redirect URI. The secret
/// is never returned here.
#[cfg(feature = "server")]
#[put("/api/oauth/clients", session: tower_sessions::Session)]
pub async fn update_oauth_client(
    client_id: String,
    name: String,
    redirect_uri: String,
) -> Result<ClientSaveResponse, ServerFnError> {
    use crate::db::get_pool;

    let user = session_user(&session).await?;

    let name = name.trim().to_string();
    let redirect_uri = redirect_uri.trim().to_string();
    if name.is_empty() || redirect_uri.is_empty() {
        return Err(ServerFnError::new("Name and redirect URI are required"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let updated: Option<models::OAuthClient> = sqlx::query_as(
        "UPDATE oauth_clients SET name = $3, redirect_uri = $4, updated_at = NOW()
         WHERE client_id = $1 AND created_by = $2 RETURNING *",
    )
    .bind(&client_id)
    .bind(&user.username)
    .bind(&name)
    .bind(&redirect_uri)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if updated.is_none() {
        return Err(ServerFnError::new("OAuth client not found"));
    }

    Ok(ClientSaveResponse::updated("OAuth client updated"))
}

#[cfg(not(feature = "server"))]
#[put("/api/oauth/clients")]
pub async fn update_oauth_client(
    client_id: String,
    name: String,
    redirect_uri: String,
) -> Result<ClientSaveResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete an OAuth client by identifier.
#[cfg(feature = "server")]
#[delete("/api/oauth/clients", session: tower_sessions::Session)]
pub async fn delete_oauth_client(client_id: String) -> Result<ApiResponse, ServerFnError> {
    use crate::db::get_pool;

    let user = match session_user(&session).await {
        Ok(user) => user,
        Err(_) => return Ok(ApiResponse::error("Not signed in")),
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM oauth_clients WHERE client_id = $1 AND created_by = $2")
        .bind(&client_id)
        .bind(&user.username)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(if result.rows_affected() == 0 {
        ApiResponse::error("OAuth client not found")
    } else {
        ApiResponse::success("OAuth client deleted")
    })
}

#[cfg(not(feature = "server"))]
#[delete("/api/oauth/clients")]
pub async fn delete_oauth_client(client_id: String) -> Result<ApiResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Resolve which username a user-data operation targets. A plain user
/// always acts on their own data; only administrators may name someone
/// else.
#[cfg(feature = "server")]
fn resolve_target(user: &models::User, username: Option<String>) -> Result<String, ApiResponse> {
    match username {
        Some(target) if target != user.username => {
            if user.admin {
                Ok(target)
            } else {
                Err(ApiResponse::error("Not allowed"))
            }
        }
        _ => Ok(user.username.clone()),
    }
}

/// User-data entries for the session user, or for `username` when an
/// administrator asks for someone else's.
#[cfg(feature = "server")]
#[get("/api/user_data/list", session: tower_sessions::Session)]
pub async fn list_user_data(username: Option<String>) -> Result<Vec<UserDataEntry>, ServerFnError> {
    use crate::db::get_pool;

    let user = session_user(&session).await?;
    let target = match resolve_target(&user, username) {
        Ok(target) => target,
        Err(_) => return Err(ServerFnError::new("Not allowed")),
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let rows: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT key, value, username FROM user_data WHERE username = $1 ORDER BY key",
    )
    .bind(&target)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|(key, value, username)| UserDataEntry {
            key,
            value,
            username,
        })
        .collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/user_data/list")]
pub async fn list_user_data(username: Option<String>) -> Result<Vec<UserDataEntry>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Upsert a user-data entry. Creation and update share this endpoint;
/// the key never changes on conflict, only the value is rewritten.
#[cfg(feature = "server")]
#[post("/api/user_data", session: tower_sessions::Session)]
pub async fn save_user_data(
    key: String,
    value: String,
    username: Option<String>,
) -> Result<ApiResponse, ServerFnError> {
    use crate::db::get_pool;

    let user = match session_user(&session).await {
        Ok(user) => user,
        Err(_) => return Ok(ApiResponse::error("Not signed in")),
    };

    let key = key.trim().to_string();
    if key.is_empty() || value.is_empty() {
        return Ok(ApiResponse::error("Key and value are required"));
    }

    let target = match resolve_target(&user, username) {
        Ok(target) => target,
        Err(denied) => return Ok(denied),
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let saved = sqlx::query(
        "INSERT INTO user_data (username, key, value) VALUES ($1, $2, $3)
         ON CONFLICT (username, key) DO UPDATE SET value = $3, updated_at = NOW()",
    )
    .bind(&target)
    .bind(&key)
    .bind(&value)
    .execute(pool)
    .await;

    Ok(match saved {
        Ok(_) => ApiResponse::success("Data saved"),
        Err(e) => ApiResponse::error(format!("Failed to save data: {e}")),
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/user_data")]
pub async fn save_user_data(
    key: String,
    value: String,
    username: Option<String>,
) -> Result<ApiResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a user-data entry by key. `username` is present only for
/// admin-initiated cross-user deletes.
#[cfg(feature = "server")]
#[delete("/api/user_data", session: tower_sessions::Session)]
pub async fn delete_user_data(
    key: String,
    username: Option<String>,
) -> Result<ApiResponse, ServerFnError> {
    use crate::db::get_pool;

    let user = match session_user(&session).await {
        Ok(user) => user,
        Err(_) => return Ok(ApiResponse::error("Not signed in")),
    };

    let target = match resolve_target(&user, username) {
        Ok(target) => target,
        Err(denied) => return Ok(denied),
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM user_data WHERE username = $1 AND key = $2")
        .bind(&target)
        .bind(&key)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(if result.rows_affected() == 0 {
        ApiResponse::error("No such key")
    } else {
        ApiResponse::success("Data deleted")
    })
}

#[cfg(not(feature = "server"))]
#[delete("/api/user_data")]
pub async fn delete_user_data(
    key: String,
    username: Option<String>,
) -> Result<ApiResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Every account, for the user-management page. Administrators only.
#[cfg(feature = "server")]
#[get("/api/admin/users", session: tower_sessions::Session)]
pub async fn list_users() -> Result<Vec<UserInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = session_user(&session).await?;
    if !user.admin {
        return Err(ServerFnError::new("Not allowed"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let users: Vec<models::User> = sqlx::query_as("SELECT * FROM users ORDER BY created_at")
        .fetch_all(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(users.iter().map(|u| u.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/admin/users")]
pub async fn list_users() -> Result<Vec<UserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create an account on a user's behalf. Administrators only; the user
/// limit still applies, but `allow_registration` does not.
#[cfg(feature = "server")]
#[post("/api/admin/users", session: tower_sessions::Session)]
pub async fn create_user(username: String, password: String) -> Result<ApiResponse, ServerFnError> {
    use crate::db::get_pool;

    let user = match session_user(&session).await {
        Ok(user) => user,
        Err(_) => return Ok(ApiResponse::error("Not signed in")),
    };
    if !user.admin {
        return Ok(ApiResponse::error("Not allowed"));
    }

    let username = username.trim().to_string();
    if username.is_empty() {
        return Ok(ApiResponse::error("Username is required"));
    }
    if password.len() < 8 {
        return Ok(ApiResponse::error("Password must be at least 8 characters"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let config = config_store::load().await;
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    if count >= i64::from(config.max_users) {
        return Ok(ApiResponse::error("User limit reached"));
    }

    let existing: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE username = $1")
        .bind(&username)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    if existing.is_some() {
        return Ok(ApiResponse::error(
            "An account with this username already exists",
        ));
    }

    let password_hash = auth::hash_password(&password).map_err(ServerFnError::new)?;

    let created = sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
        .bind(&username)
        .bind(&password_hash)
        .execute(pool)
        .await;

    Ok(match created {
        Ok(_) => ApiResponse::success("User created"),
        Err(e) => ApiResponse::error(format!("Failed to create user: {e}")),
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/admin/users")]
pub async fn create_user(username: String, password: String) -> Result<ApiResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Grant or revoke the admin flag. Administrators only, and never on the
/// session user's own account.
#[cfg(feature = "server")]
#[post("/api/admin/users/role", session: tower_sessions::Session)]
pub async fn set_user_admin(username: String, admin: bool) -> Result<ApiResponse, ServerFnError> {
    use crate::db::get_pool;

    let user = match session_user(&session).await {
        Ok(user) => user,
        Err(_) => return Ok(ApiResponse::error("Not signed in")),
    };
    if !user.admin {
        return Ok(ApiResponse::error("Not allowed"));
    }
    if username == user.username {
        return Ok(ApiResponse::error("Cannot change your own role"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("UPDATE users SET admin = $2 WHERE username = $1")
        .bind(&username)
        .bind(admin)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(if result.rows_affected() == 0 {
        ApiResponse::error("No such user")
    } else {
        ApiResponse::success("User role updated")
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/admin/users/role")]
pub async fn set_user_admin(username: String, admin: bool) -> Result<ApiResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete an account. The user's OAuth clients and data entries go with
/// it (cascading foreign keys). Administrators only, never the session
/// user's own account.
#[cfg(feature = "server")]
#[delete("/api/admin/users", session: tower_sessions::Session)]
pub async fn delete_user(username: String) -> Result<ApiResponse, ServerFnError> {
    use crate::db::get_pool;

    let user = match session_user(&session).await {
        Ok(user) => user,
        Err(_) => return Ok(ApiResponse::error("Not signed in")),
    };
    if !user.admin {
        return Ok(ApiResponse::error("Not allowed"));
    }
    if username == user.username {
        return Ok(ApiResponse::error("Cannot delete your own account"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(&username)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(if result.rows_affected() == 0 {
        ApiResponse::error("No such user")
    } else {
        ApiResponse::success("User deleted")
    })
}

#[cfg(not(feature = "server"))]
#[delete("/api/admin/users")]
pub async fn delete_user(username: String) -> Result<ApiResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
