//! Typed server-side error taxonomy.
//!
//! Server functions ultimately surface `ServerFnError`, but the session and
//! role-gate helpers produce [`ApiError`] first so server-side callers can
//! distinguish "not signed in" from "forbidden" from plumbing failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("insufficient permissions")]
    Forbidden,

    #[error("session error: {0}")]
    Session(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ApiError> for dioxus::prelude::ServerFnError {
    fn from(e: ApiError) -> Self {
        dioxus::prelude::ServerFnError::new(e.to_string())
    }
}
