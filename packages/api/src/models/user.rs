//! # User model and roles
//!
//! [`User`] (server only) is the full `users` row, including the Argon2
//! password hash. [`User::to_info`] projects it into the client-safe
//! [`UserInfo`], which omits the hash and timestamps and converts the `Uuid`
//! to a `String`.
//!
//! Roles are stored as text in the database; [`User::role`] parses the column,
//! falling back to the least-privileged role if the value is unknown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Access role for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Manager,
    TeamLeader,
    Executive,
    FinanceAdmin,
    Author,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Manager => "manager",
            Role::TeamLeader => "team_leader",
            Role::Executive => "executive",
            Role::FinanceAdmin => "finance_admin",
            Role::Author => "author",
            Role::Customer => "customer",
        }
    }

    /// Human-readable label for tables and badges.
    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Manager => "Manager",
            Role::TeamLeader => "Team Leader",
            Role::Executive => "Executive",
            Role::FinanceAdmin => "Finance Admin",
            Role::Author => "Author",
            Role::Customer => "Customer",
        }
    }

    pub fn all() -> &'static [Role] {
        &[
            Role::SuperAdmin,
            Role::Manager,
            Role::TeamLeader,
            Role::Executive,
            Role::FinanceAdmin,
            Role::Author,
            Role::Customer,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "manager" => Ok(Role::Manager),
            "team_leader" => Ok(Role::TeamLeader),
            "executive" => Ok(Role::Executive),
            "finance_admin" => Ok(Role::FinanceAdmin),
            "author" => Ok(Role::Author),
            "customer" => Ok(Role::Customer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Parse the role column. Unknown values degrade to the least privilege.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Customer)
    }

    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
            role: self.role(),
            impersonated: false,
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    /// True when this session is a super admin acting as this user.
    #[serde(default)]
    pub impersonated: bool,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in Role::all() {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
    }

    #[test]
    fn test_unknown_role_is_error() {
        assert!("root".parse::<Role>().is_err());
    }
}
