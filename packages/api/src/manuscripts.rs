//! Manuscript draft and submission server functions.
//!
//! Drafts belong to the signed-in author and hold the wizard's state between
//! autosaves. Submission re-validates the same predicates the wizard gates on,
//! then moves the draft into the `manuscripts` table atomically.

use dioxus::prelude::*;

use crate::models::{AuthorEntry, DraftInfo, ManuscriptInfo};

/// Validate a completed submission. Returns the first failing rule.
#[cfg(feature = "server")]
fn validate_submission(
    journal_id: &Option<String>,
    title: &str,
    abstract_text: &str,
    authors: &[AuthorEntry],
    file_url: &Option<String>,
) -> Result<(), String> {
    if journal_id.as_deref().unwrap_or("").is_empty() {
        return Err("Select a journal".to_string());
    }
    if title.trim().is_empty() {
        return Err("Title is required".to_string());
    }
    if abstract_text.trim().is_empty() {
        return Err("Abstract is required".to_string());
    }
    if authors.is_empty() {
        return Err("At least one author is required".to_string());
    }
    if authors
        .iter()
        .any(|a| a.name.trim().is_empty() || a.email.trim().is_empty())
    {
        return Err("Every author needs a name and email".to_string());
    }
    if authors.iter().filter(|a| a.corresponding).count() != 1 {
        return Err("Exactly one corresponding author is required".to_string());
    }
    if file_url.as_deref().unwrap_or("").is_empty() {
        return Err("Upload the manuscript file".to_string());
    }
    Ok(())
}

/// Fetch the signed-in author's in-progress draft, if any.
#[cfg(feature = "server")]
#[get("/api/manuscripts/draft", session: tower_sessions::Session)]
pub async fn get_draft() -> Result<Option<DraftInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ManuscriptDraft;

    let user = crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let draft: Option<ManuscriptDraft> = sqlx::query_as(
        "SELECT * FROM manuscript_drafts WHERE author_id = $1 ORDER BY updated_at DESC LIMIT 1",
    )
    .bind(user.id)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(draft.map(|d| d.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/manuscripts/draft")]
pub async fn get_draft() -> Result<Option<DraftInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a new draft from the wizard's current state. Returns the draft id;
/// subsequent saves go through [`update_draft`].
#[cfg(feature = "server")]
#[post("/api/manuscripts/draft", session: tower_sessions::Session)]
pub async fn create_draft(
    journal_id: Option<String>,
    title: String,
    abstract_text: String,
    keywords: String,
    authors: Vec<AuthorEntry>,
    file_url: Option<String>,
    step: i32,
) -> Result<String, ServerFnError> {
    use crate::db::get_pool;

    let user = crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let journal_uuid = parse_optional_uuid(&journal_id)?;
    let authors_json =
        serde_json::to_value(&authors).map_err(|e| ServerFnError::new(e.to_string()))?;

    let (id,): (uuid::Uuid,) = sqlx::query_as(
        "INSERT INTO manuscript_drafts (author_id, journal_id, title, abstract_text, keywords, authors, file_url, step)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
    )
    .bind(user.id)
    .bind(journal_uuid)
    .bind(&title)
    .bind(&abstract_text)
    .bind(&keywords)
    .bind(&authors_json)
    .bind(&file_url)
    .bind(step)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(id.to_string())
}

#[cfg(not(feature = "server"))]
#[post("/api/manuscripts/draft")]
pub async fn create_draft(
    journal_id: Option<String>,
    title: String,
    abstract_text: String,
    keywords: String,
    authors: Vec<AuthorEntry>,
    file_url: Option<String>,
    step: i32,
) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Overwrite an existing draft. Only the owning author may update it.
#[cfg(feature = "server")]
#[post("/api/manuscripts/draft/update", session: tower_sessions::Session)]
pub async fn update_draft(
    draft_id: String,
    journal_id: Option<String>,
    title: String,
    abstract_text: String,
    keywords: String,
    authors: Vec<AuthorEntry>,
    file_url: Option<String>,
    step: i32,
) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user = crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let draft_uuid = uuid::Uuid::parse_str(&draft_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let journal_uuid = parse_optional_uuid(&journal_id)?;
    let authors_json =
        serde_json::to_value(&authors).map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query(
        "UPDATE manuscript_drafts
         SET journal_id = $1, title = $2, abstract_text = $3, keywords = $4,
             authors = $5, file_url = $6, step = $7, updated_at = NOW()
         WHERE id = $8 AND author_id = $9",
    )
    .bind(journal_uuid)
    .bind(&title)
    .bind(&abstract_text)
    .bind(&keywords)
    .bind(&authors_json)
    .bind(&file_url)
    .bind(step)
    .bind(draft_uuid)
    .bind(user.id)
    .execute(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Draft not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/manuscripts/draft/update")]
pub async fn update_draft(
    draft_id: String,
    journal_id: Option<String>,
    title: String,
    abstract_text: String,
    keywords: String,
    authors: Vec<AuthorEntry>,
    file_url: Option<String>,
    step: i32,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Submit the completed draft: validate, create the manuscript, delete the
/// draft. Returns the new manuscript id.
#[cfg(feature = "server")]
#[post("/api/manuscripts/submit", session: tower_sessions::Session)]
pub async fn submit_manuscript(draft_id: String) -> Result<String, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ManuscriptDraft;

    let user = crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let draft_uuid = uuid::Uuid::parse_str(&draft_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let draft: Option<ManuscriptDraft> =
        sqlx::query_as("SELECT * FROM manuscript_drafts WHERE id = $1 AND author_id = $2")
            .bind(draft_uuid)
            .bind(user.id)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(draft) = draft else {
        return Err(ServerFnError::new("Draft not found"));
    };

    let info = draft.to_info();
    validate_submission(
        &info.journal_id,
        &info.title,
        &info.abstract_text,
        &info.authors,
        &info.file_url,
    )
    .map_err(|e| ServerFnError::new(e))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let (manuscript_id,): (uuid::Uuid,) = sqlx::query_as(
        "INSERT INTO manuscripts (journal_id, author_id, title, abstract_text, keywords, authors, file_url)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(draft.journal_id)
    .bind(draft.author_id)
    .bind(&draft.title)
    .bind(&draft.abstract_text)
    .bind(&draft.keywords)
    .bind(&draft.authors)
    .bind(draft.file_url.as_deref().unwrap_or(""))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    sqlx::query("DELETE FROM manuscript_drafts WHERE id = $1")
        .bind(draft.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tx.commit()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(manuscript_id = %manuscript_id, "manuscript submitted");

    Ok(manuscript_id.to_string())
}

#[cfg(not(feature = "server"))]
#[post("/api/manuscripts/submit")]
pub async fn submit_manuscript(draft_id: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Store an uploaded manuscript file and return its public URL.
///
/// Files land in `OPSDECK_UPLOAD_DIR` (default `./uploads`) under a random
/// name; the original extension is kept. The web server exposes the directory
/// read-only under `/uploads/`.
#[cfg(feature = "server")]
#[post("/api/manuscripts/upload", session: tower_sessions::Session)]
pub async fn upload_manuscript(file_name: String, data: Vec<u8>) -> Result<String, ServerFnError> {
    crate::auth::require_user(&session).await?;

    if data.is_empty() {
        return Err(ServerFnError::new("The file is empty"));
    }
    const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(ServerFnError::new("The file exceeds the 25 MB limit"));
    }

    let extension: String = std::path::Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(8)
        .collect();

    let stored_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
    let dir = std::env::var("OPSDECK_UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    tokio::fs::write(std::path::Path::new(&dir).join(&stored_name), data)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(format!("/uploads/{}", stored_name))
}

#[cfg(not(feature = "server"))]
#[post("/api/manuscripts/upload")]
pub async fn upload_manuscript(file_name: String, data: Vec<u8>) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List the signed-in user's submitted manuscripts, newest first.
#[cfg(feature = "server")]
#[get("/api/manuscripts", session: tower_sessions::Session)]
pub async fn list_my_manuscripts() -> Result<Vec<ManuscriptInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Manuscript;

    let user = crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    #[derive(sqlx::FromRow)]
    struct ManuscriptRow {
        #[sqlx(flatten)]
        manuscript: Manuscript,
        journal_name: String,
    }

    let rows: Vec<ManuscriptRow> = sqlx::query_as(
        "SELECT m.*, j.name AS journal_name
         FROM manuscripts m JOIN journals j ON j.id = m.journal_id
         WHERE m.author_id = $1 ORDER BY m.submitted_at DESC",
    )
    .bind(user.id)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows
        .iter()
        .map(|row| row.manuscript.to_info(row.journal_name.clone()))
        .collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/manuscripts")]
pub async fn list_my_manuscripts() -> Result<Vec<ManuscriptInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
fn parse_optional_uuid(id: &Option<String>) -> Result<Option<uuid::Uuid>, ServerFnError> {
    match id.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => uuid::Uuid::parse_str(s)
            .map(Some)
            .map_err(|e| ServerFnError::new(e.to_string())),
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    fn author(corresponding: bool) -> AuthorEntry {
        AuthorEntry {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            affiliation: "Lab".to_string(),
            corresponding,
        }
    }

    fn valid_args() -> (Option<String>, String, String, Vec<AuthorEntry>, Option<String>) {
        (
            Some("j-1".to_string()),
            "Title".to_string(),
            "An abstract.".to_string(),
            vec![author(true)],
            Some("/uploads/m.pdf".to_string()),
        )
    }

    #[test]
    fn test_valid_submission_passes() {
        let (j, t, a, au, f) = valid_args();
        assert!(validate_submission(&j, &t, &a, &au, &f).is_ok());
    }

    #[test]
    fn test_missing_pieces_fail() {
        let (j, t, a, au, f) = valid_args();
        assert!(validate_submission(&None, &t, &a, &au, &f).is_err());
        assert!(validate_submission(&j, "", &a, &au, &f).is_err());
        assert!(validate_submission(&j, &t, " ", &au, &f).is_err());
        assert!(validate_submission(&j, &t, &a, &[], &f).is_err());
        assert!(validate_submission(&j, &t, &a, &au, &None).is_err());
    }

    #[test]
    fn test_corresponding_author_must_be_unique() {
        let (j, t, a, _, f) = valid_args();
        let none = vec![author(false)];
        let two = vec![author(true), author(true)];
        assert!(validate_submission(&j, &t, &a, &none, &f).is_err());
        assert!(validate_submission(&j, &t, &a, &two, &f).is_err());
    }
}
