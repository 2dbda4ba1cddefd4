//! Journals, manuscript drafts, and submitted manuscripts.
//!
//! [`AuthorEntry`] is shared with the submission wizard on the client: the
//! same struct is edited in the author step, serialized into the draft's
//! `authors` JSON column, and copied onto the manuscript at submission.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// One author row on a manuscript.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthorEntry {
    pub name: String,
    pub email: String,
    pub affiliation: String,
    /// At most one author on a manuscript is the corresponding author.
    #[serde(default)]
    pub corresponding: bool,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Journal {
    pub id: Uuid,
    pub name: String,
    pub issn: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Journal {
    pub fn to_info(&self) -> JournalInfo {
        JournalInfo {
            id: self.id.to_string(),
            name: self.name.clone(),
            issn: self.issn.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalInfo {
    pub id: String,
    pub name: String,
    pub issn: Option<String>,
}

/// In-progress submission, one per author per unfinished wizard run.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct ManuscriptDraft {
    pub id: Uuid,
    pub author_id: Uuid,
    pub journal_id: Option<Uuid>,
    pub title: String,
    pub abstract_text: String,
    pub keywords: String,
    /// JSON array of [`AuthorEntry`].
    pub authors: serde_json::Value,
    pub file_url: Option<String>,
    pub step: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl ManuscriptDraft {
    pub fn to_info(&self) -> DraftInfo {
        DraftInfo {
            id: self.id.to_string(),
            journal_id: self.journal_id.map(|u| u.to_string()),
            title: self.title.clone(),
            abstract_text: self.abstract_text.clone(),
            keywords: self.keywords.clone(),
            authors: serde_json::from_value(self.authors.clone()).unwrap_or_default(),
            file_url: self.file_url.clone(),
            step: self.step,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftInfo {
    pub id: String,
    pub journal_id: Option<String>,
    pub title: String,
    pub abstract_text: String,
    pub keywords: String,
    pub authors: Vec<AuthorEntry>,
    pub file_url: Option<String>,
    pub step: i32,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Manuscript {
    pub id: Uuid,
    pub journal_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub abstract_text: String,
    pub keywords: String,
    pub authors: serde_json::Value,
    pub file_url: String,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Manuscript {
    pub fn to_info(&self, journal_name: String) -> ManuscriptInfo {
        ManuscriptInfo {
            id: self.id.to_string(),
            journal_id: self.journal_id.to_string(),
            journal_name,
            title: self.title.clone(),
            status: self.status.clone(),
            submitted_at: self.submitted_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManuscriptInfo {
    pub id: String,
    pub journal_id: String,
    pub journal_name: String,
    pub title: String,
    pub status: String,
    pub submitted_at: String,
}
