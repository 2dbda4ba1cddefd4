//! Journal catalogue server functions.

use dioxus::prelude::*;

use crate::models::JournalInfo;

/// List journals currently accepting submissions.
#[cfg(feature = "server")]
#[get("/api/journals", session: tower_sessions::Session)]
pub async fn list_journals() -> Result<Vec<JournalInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Journal;

    crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let journals: Vec<Journal> =
        sqlx::query_as("SELECT * FROM journals WHERE active = TRUE ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(journals.iter().map(|j| j.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/journals")]
pub async fn list_journals() -> Result<Vec<JournalInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
