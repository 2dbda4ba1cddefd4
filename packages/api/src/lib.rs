//! # API crate — shared fullstack server functions for OpsDeck
//!
//! This crate is the backbone of the OpsDeck fullstack architecture. It defines every
//! Dioxus server function the web frontend calls, along with the supporting modules
//! they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Password authentication (Argon2), session keys, role gates, impersonation |
//! | [`db`] | — | PostgreSQL connection pool (lazy `OnceCell` singleton) and migrations |
//! | [`error`] | `server` | Typed server-side error taxonomy |
//! | [`models`] | — | Database rows and their client-safe `*Info` projections |
//! | [`chat`], [`customers`], [`hr`], [`invoices`], [`it`], [`journals`], [`leaves`], [`manuscripts`], [`recruitment`], [`users`] | — | Domain server functions |
//!
//! ## Server functions
//!
//! Every public `async fn` annotated with `#[get(...)]` or `#[post(...)]` is a Dioxus
//! server function, compiled twice: once with full server logic (behind
//! `#[cfg(feature = "server")]`) and once as a thin client stub that forwards the
//! call over HTTP. Authentication functions live in this file; the rest are grouped
//! by domain in their modules.

use dioxus::prelude::*;

pub mod auth;
pub mod chat;
pub mod customers;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
pub mod hr;
pub mod invoices;
pub mod it;
pub mod journals;
pub mod leaves;
pub mod manuscripts;
pub mod models;
pub mod recruitment;
pub mod users;

pub use models::{Paginated, Role, UserInfo};

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    let user = auth::current_user(&session).await?;

    let impersonator: Option<String> = session
        .get(auth::SESSION_IMPERSONATOR_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| {
        let mut info = u.to_info();
        info.impersonated = impersonator.is_some();
        info
    }))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Register a new user with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    email: String,
    password: String,
    name: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();
    let name = name.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(ServerFnError::new("Invalid email address"));
    }
    if password.len() < 8 {
        return Err(ServerFnError::new(
            "Password must be at least 8 characters",
        ));
    }
    if name.is_empty() {
        return Err(ServerFnError::new("Name is required"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let existing: Option<(i64,)> =
        sqlx::query_as("SELECT 1 as n FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    if existing.is_some() {
        return Err(ServerFnError::new("An account with this email already exists"));
    }

    let password_hash = auth::hash_password(&password)
        .map_err(|e| ServerFnError::new(e))?;

    // Self-registration creates author accounts; staff roles are set by admins.
    let user: models::User = sqlx::query_as(
        "INSERT INTO users (email, name, role, password_hash) VALUES ($1, $2, 'author', $3) RETURNING *",
    )
    .bind(&email)
    .bind(&name)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    email: String,
    password: String,
    name: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Invalid email or password"));
    };

    let Some(ref hash) = user.password_hash else {
        return Err(ServerFnError::new("Invalid email or password"));
    };

    let valid = auth::verify_password(&password, hash)
        .map_err(|e| ServerFnError::new(e))?;

    if !valid {
        return Err(ServerFnError::new("Invalid email or password"));
    }

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
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

/// Act as another user. Super admin only; the admin's own id is parked in the
/// session so [`stop_impersonation`] can restore it.
#[cfg(feature = "server")]
#[post("/api/auth/impersonate", session: tower_sessions::Session)]
pub async fn impersonate_user(user_id: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let admin = auth::require_role(&session, &[Role::SuperAdmin]).await?;

    if admin.id.to_string() == user_id {
        return Err(ServerFnError::new("Already signed in as this user"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let target_uuid = uuid::Uuid::parse_str(&user_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let target: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(target_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(target) = target else {
        return Err(ServerFnError::new("User not found"));
    };

    session
        .insert(auth::SESSION_IMPERSONATOR_KEY, admin.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    session
        .insert(auth::SESSION_USER_ID_KEY, target.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut info = target.to_info();
    info.impersonated = true;
    Ok(info)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/impersonate")]
pub async fn impersonate_user(user_id: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// End impersonation and restore the admin's own session.
#[cfg(feature = "server")]
#[post("/api/auth/stop-impersonation", session: tower_sessions::Session)]
pub async fn stop_impersonation() -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let impersonator: Option<String> = session
        .get(auth::SESSION_IMPERSONATOR_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(admin_id) = impersonator else {
        return Err(ServerFnError::new("Not impersonating"));
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let admin_uuid = uuid::Uuid::parse_str(&admin_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let admin: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(admin_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(admin) = admin else {
        // The admin account vanished mid-impersonation; drop the session.
        session
            .flush()
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
        return Err(ServerFnError::new("Admin account no longer exists"));
    };

    session
        .remove::<String>(auth::SESSION_IMPERSONATOR_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    session
        .insert(auth::SESSION_USER_ID_KEY, admin.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(admin.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/stop-impersonation")]
pub async fn stop_impersonation() -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
