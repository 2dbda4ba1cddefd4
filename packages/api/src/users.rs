//! User administration server functions (admin/manager gated).

use dioxus::prelude::*;

use crate::models::{Role, UserInfo};

#[cfg(feature = "server")]
const ADMIN_ROLES: &[Role] = &[Role::SuperAdmin, Role::Manager];

/// List user accounts, newest first.
#[cfg(feature = "server")]
#[get("/api/users", session: tower_sessions::Session)]
pub async fn list_users(limit: u32) -> Result<Vec<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    crate::auth::require_role(&session, ADMIN_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let limit = limit.clamp(1, 500);
    let users: Vec<User> =
        sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC LIMIT $1")
            .bind(limit as i64)
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(users.iter().map(|u| u.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/users")]
pub async fn list_users(limit: u32) -> Result<Vec<UserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a user account with a role and initial password.
#[cfg(feature = "server")]
#[post("/api/users", session: tower_sessions::Session)]
pub async fn create_user(
    email: String,
    name: String,
    role: String,
    password: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    crate::auth::require_role(&session, ADMIN_ROLES).await?;

    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ServerFnError::new("Invalid email address"));
    }
    if password.len() < 8 {
        return Err(ServerFnError::new("Password must be at least 8 characters"));
    }
    let role: Role = role.parse().map_err(|e: String| ServerFnError::new(e))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let password_hash =
        crate::auth::hash_password(&password).map_err(|e| ServerFnError::new(e))?;

    let user: User = sqlx::query_as(
        "INSERT INTO users (email, name, role, password_hash) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(&email)
    .bind(name.trim())
    .bind(role.as_str())
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/users")]
pub async fn create_user(
    email: String,
    name: String,
    role: String,
    password: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update a user's name and role.
#[cfg(feature = "server")]
#[post("/api/users/update", session: tower_sessions::Session)]
pub async fn update_user(id: String, name: String, role: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, ADMIN_ROLES).await?;

    let role: Role = role.parse().map_err(|e: String| ServerFnError::new(e))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query(
        "UPDATE users SET name = $1, role = $2, updated_at = NOW() WHERE id = $3",
    )
    .bind(name.trim())
    .bind(role.as_str())
    .bind(uuid)
    .execute(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("User not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/users/update")]
pub async fn update_user(id: String, name: String, role: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a user account. Deleting yourself is refused.
#[cfg(feature = "server")]
#[post("/api/users/delete", session: tower_sessions::Session)]
pub async fn delete_user(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let me = crate::auth::require_role(&session, ADMIN_ROLES).await?;

    if me.id.to_string() == id {
        return Err(ServerFnError::new("You cannot delete your own account"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(uuid)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("User not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/users/delete")]
pub async fn delete_user(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
