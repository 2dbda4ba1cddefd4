//! # Submission wizard core
//!
//! [`SubmissionDraft`] is the wizard's whole state: one struct with setters
//! that keep its invariants, instead of loose per-field signals. The view
//! holds it in a single `Signal<SubmissionDraft>` and renders from it; every
//! mutation goes through a method here so the invariants (step gates, single
//! corresponding author, minimum one author row) hold no matter which control
//! fired.

use api::models::{AuthorEntry, DraftInfo};
use serde::{Deserialize, Serialize};

/// Wizard steps, in order: details (journal, title, abstract, keywords),
/// authors, file upload, review.
pub const STEP_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDraft {
    /// Set after the first successful server save; switches subsequent saves
    /// from create to update.
    pub draft_id: Option<String>,
    pub journal_id: Option<String>,
    pub title: String,
    pub abstract_text: String,
    pub keywords: String,
    pub authors: Vec<AuthorEntry>,
    pub file_url: Option<String>,
    pub step: usize,
}

impl Default for SubmissionDraft {
    fn default() -> Self {
        Self {
            draft_id: None,
            journal_id: None,
            title: String::new(),
            abstract_text: String::new(),
            keywords: String::new(),
            authors: vec![AuthorEntry::default()],
            file_url: None,
            step: 0,
        }
    }
}

/// Serializable view of the draft, used for the local snapshot fingerprint.
#[derive(Serialize)]
struct DraftPayload<'a> {
    journal_id: &'a Option<String>,
    title: &'a str,
    abstract_text: &'a str,
    keywords: &'a str,
    authors: &'a [AuthorEntry],
    file_url: &'a Option<String>,
    step: usize,
}

/// Owned counterpart of [`DraftPayload`], parsed back out of the local cache.
#[derive(Deserialize)]
struct DraftSnapshot {
    journal_id: Option<String>,
    title: String,
    abstract_text: String,
    keywords: String,
    authors: Vec<AuthorEntry>,
    file_url: Option<String>,
    step: usize,
}

impl SubmissionDraft {
    /// Rehydrate the wizard from a server-side draft.
    pub fn from_info(info: DraftInfo) -> Self {
        let authors = if info.authors.is_empty() {
            vec![AuthorEntry::default()]
        } else {
            info.authors
        };
        Self {
            draft_id: Some(info.id),
            journal_id: info.journal_id,
            title: info.title,
            abstract_text: info.abstract_text,
            keywords: info.keywords,
            authors,
            file_url: info.file_url,
            step: (info.step.max(0) as usize).min(STEP_COUNT - 1),
        }
    }

    /// Restore the wizard from a locally cached payload. The snapshot never
    /// carries a draft id; only the server hands those out.
    pub fn from_payload(payload: &str) -> Option<Self> {
        let snap: DraftSnapshot = serde_json::from_str(payload).ok()?;
        let authors = if snap.authors.is_empty() {
            vec![AuthorEntry::default()]
        } else {
            snap.authors
        };
        Some(Self {
            draft_id: None,
            journal_id: snap.journal_id,
            title: snap.title,
            abstract_text: snap.abstract_text,
            keywords: snap.keywords,
            authors,
            file_url: snap.file_url,
            step: snap.step.min(STEP_COUNT - 1),
        })
    }

    pub fn set_journal(&mut self, journal_id: &str) {
        self.journal_id = if journal_id.is_empty() {
            None
        } else {
            Some(journal_id.to_string())
        };
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_abstract(&mut self, text: &str) {
        self.abstract_text = text.to_string();
    }

    pub fn set_keywords(&mut self, keywords: &str) {
        self.keywords = keywords.to_string();
    }

    pub fn set_file_url(&mut self, url: &str) {
        self.file_url = if url.is_empty() {
            None
        } else {
            Some(url.to_string())
        };
    }

    pub fn abstract_word_count(&self) -> usize {
        self.abstract_text.split_whitespace().count()
    }

    pub fn add_author(&mut self) {
        self.authors.push(AuthorEntry::default());
    }

    /// Remove an author row. The last remaining row cannot be removed.
    pub fn remove_author(&mut self, index: usize) -> bool {
        if self.authors.len() <= 1 || index >= self.authors.len() {
            return false;
        }
        self.authors.remove(index);
        true
    }

    pub fn update_author(&mut self, index: usize, entry: AuthorEntry) {
        if let Some(slot) = self.authors.get_mut(index) {
            let corresponding = slot.corresponding;
            *slot = entry;
            // The corresponding flag only moves through set_corresponding.
            slot.corresponding = corresponding;
        }
    }

    /// Mark one author as corresponding, clearing the flag everywhere else.
    pub fn set_corresponding(&mut self, index: usize) {
        for (i, author) in self.authors.iter_mut().enumerate() {
            author.corresponding = i == index;
        }
    }

    pub fn corresponding_count(&self) -> usize {
        self.authors.iter().filter(|a| a.corresponding).count()
    }

    /// Whether the given step's required fields are filled.
    pub fn can_proceed(&self, step: usize) -> bool {
        match step {
            0 => {
                self.journal_id.is_some()
                    && !self.title.trim().is_empty()
                    && !self.abstract_text.trim().is_empty()
            }
            1 => {
                !self.authors.is_empty()
                    && self
                        .authors
                        .iter()
                        .all(|a| !a.name.trim().is_empty() && !a.email.trim().is_empty())
                    && self.corresponding_count() == 1
            }
            2 => self.file_url.is_some(),
            3 => true,
            _ => false,
        }
    }

    /// Advance if the current step's gate passes.
    pub fn next_step(&mut self) -> bool {
        if self.step + 1 < STEP_COUNT && self.can_proceed(self.step) {
            self.step += 1;
            return true;
        }
        false
    }

    pub fn prev_step(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    /// The whole wizard is ready for submission.
    pub fn ready_to_submit(&self) -> bool {
        (0..STEP_COUNT).all(|s| self.can_proceed(s))
    }

    /// Autosave only fires once the draft has an identity worth keeping.
    pub fn autosave_ready(&self) -> bool {
        self.journal_id.is_some() && !self.title.trim().is_empty()
    }

    /// Canonical JSON payload, fingerprinted by the local draft cache.
    pub fn payload(&self) -> String {
        serde_json::to_string(&DraftPayload {
            journal_id: &self.journal_id,
            title: &self.title,
            abstract_text: &self.abstract_text,
            keywords: &self.keywords,
            authors: &self.authors,
            file_url: &self.file_url,
            step: self.step,
        })
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_author() -> AuthorEntry {
        AuthorEntry {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            affiliation: "Lab".to_string(),
            corresponding: false,
        }
    }

    fn complete_draft() -> SubmissionDraft {
        let mut draft = SubmissionDraft::default();
        draft.set_journal("j-1");
        draft.set_title("A Title");
        draft.set_abstract("Some abstract text.");
        draft.set_keywords("a, b");
        draft.update_author(0, filled_author());
        draft.set_corresponding(0);
        draft.set_file_url("/uploads/m.pdf");
        draft
    }

    #[test]
    fn test_step_gates() {
        let mut draft = SubmissionDraft::default();
        assert!(!draft.can_proceed(0));

        draft.set_journal("j-1");
        assert!(!draft.can_proceed(0));
        draft.set_title("A Title");
        assert!(!draft.can_proceed(0));
        draft.set_abstract("Words here.");
        assert!(draft.can_proceed(0));

        assert!(!draft.can_proceed(1));
        draft.update_author(0, filled_author());
        assert!(!draft.can_proceed(1));
        draft.set_corresponding(0);
        assert!(draft.can_proceed(1));

        assert!(!draft.can_proceed(2));
        draft.set_file_url("/uploads/m.pdf");
        assert!(draft.can_proceed(2));

        assert!(draft.can_proceed(3));
    }

    #[test]
    fn test_first_gate_requires_abstract() {
        let mut draft = SubmissionDraft::default();
        draft.set_journal("j-1");
        draft.set_title("A Title");

        assert!(!draft.can_proceed(0));
        assert!(!draft.next_step());
        assert_eq!(draft.step, 0);

        draft.set_abstract("   ");
        assert!(!draft.can_proceed(0));

        draft.set_abstract("An actual abstract.");
        assert!(draft.next_step());
        assert_eq!(draft.step, 1);
    }

    #[test]
    fn test_next_step_blocked_until_gate_passes() {
        let mut draft = SubmissionDraft::default();
        assert!(!draft.next_step());
        assert_eq!(draft.step, 0);

        draft.set_journal("j-1");
        draft.set_title("T");
        draft.set_abstract("A");
        assert!(draft.next_step());
        assert_eq!(draft.step, 1);
    }

    #[test]
    fn test_single_corresponding_author() {
        let mut draft = SubmissionDraft::default();
        draft.add_author();
        draft.add_author();

        draft.set_corresponding(0);
        assert_eq!(draft.corresponding_count(), 1);

        // Moving the flag clears the previous holder.
        draft.set_corresponding(2);
        assert_eq!(draft.corresponding_count(), 1);
        assert!(draft.authors[2].corresponding);
        assert!(!draft.authors[0].corresponding);
    }

    #[test]
    fn test_update_author_cannot_smuggle_corresponding_flag() {
        let mut draft = SubmissionDraft::default();
        draft.add_author();
        draft.set_corresponding(0);

        let mut entry = filled_author();
        entry.corresponding = true;
        draft.update_author(1, entry);

        assert_eq!(draft.corresponding_count(), 1);
        assert!(draft.authors[0].corresponding);
    }

    #[test]
    fn test_last_author_row_cannot_be_removed() {
        let mut draft = SubmissionDraft::default();
        assert!(!draft.remove_author(0));
        draft.add_author();
        assert!(draft.remove_author(1));
        assert!(!draft.remove_author(0));
    }

    #[test]
    fn test_ready_to_submit() {
        let draft = complete_draft();
        assert!(draft.ready_to_submit());

        let mut missing_file = draft.clone();
        missing_file.set_file_url("");
        assert!(!missing_file.ready_to_submit());
    }

    #[test]
    fn test_abstract_word_count() {
        let mut draft = SubmissionDraft::default();
        assert_eq!(draft.abstract_word_count(), 0);
        draft.set_abstract("three  little words");
        assert_eq!(draft.abstract_word_count(), 3);
    }

    #[test]
    fn test_payload_restores_without_draft_id() {
        let mut draft = complete_draft();
        draft.draft_id = Some("d-1".to_string());

        let restored = SubmissionDraft::from_payload(&draft.payload()).unwrap();
        assert!(restored.draft_id.is_none());
        assert_eq!(restored.title, draft.title);
        assert_eq!(restored.abstract_text, draft.abstract_text);
        assert_eq!(restored.authors, draft.authors);
        assert_eq!(restored.step, draft.step);

        assert!(SubmissionDraft::from_payload("not json").is_none());
    }

    #[test]
    fn test_payload_changes_with_content() {
        let mut draft = complete_draft();
        let before = draft.payload();
        assert_eq!(before, draft.payload());
        draft.set_title("Another Title");
        assert_ne!(before, draft.payload());
    }
}
