//! Four-step manuscript submission wizard.
//!
//! Steps: details (journal, title, abstract, keywords), authors, file upload,
//! review. Each step gates the Next button through
//! [`SubmissionDraft::can_proceed`]. The draft autosaves on a timer once it
//! has a journal and title, and always saves before a step transition. A
//! `saving` flag keeps the timer from firing while a save is already in
//! flight, so timer and transition saves never overlap. The local snapshot is
//! recorded only after the server accepts a save, so a failed save is retried
//! on the next tick.

use api::models::{AuthorEntry, JournalInfo};
use dioxus::prelude::*;
use store::DraftCache;

use crate::client_store::make_store;
use crate::components::{Button, ButtonVariant, Input, Label, StatusKind, StatusMessage, Textarea};
use crate::poll::sleep_secs;
use crate::wizard::{SubmissionDraft, STEP_COUNT};

const STEP_TITLES: [&str; STEP_COUNT] = ["Details", "Authors", "File", "Review"];

/// Push the wizard state to the server, creating the draft on first save.
/// Returns `Ok(false)` when the save was skipped (already in flight, or the
/// content is unchanged since the last save).
async fn persist_draft(
    mut draft: Signal<SubmissionDraft>,
    mut saving: Signal<bool>,
    force: bool,
) -> Result<bool, String> {
    if saving() {
        return Ok(false);
    }
    saving.set(true);
    let result = persist_inner(draft, force).await;
    saving.set(false);

    match result {
        Ok(Some(new_id)) => {
            if draft().draft_id.is_none() {
                draft.with_mut(|d| d.draft_id = Some(new_id));
            }
            Ok(true)
        }
        Ok(None) => Ok(false),
        Err(e) => Err(e),
    }
}

async fn persist_inner(
    draft: Signal<SubmissionDraft>,
    force: bool,
) -> Result<Option<String>, String> {
    let snapshot = draft();
    let payload = snapshot.payload();
    let cache_key = snapshot.draft_id.clone().unwrap_or_else(|| "new".to_string());

    let cache = DraftCache::new(make_store());
    let changed = cache.is_changed(&cache_key, &payload).await;
    if !changed && !force && snapshot.draft_id.is_some() {
        return Ok(None);
    }

    let id = match snapshot.draft_id.clone() {
        Some(id) => {
            api::manuscripts::update_draft(
                id.clone(),
                snapshot.journal_id.clone(),
                snapshot.title.clone(),
                snapshot.abstract_text.clone(),
                snapshot.keywords.clone(),
                snapshot.authors.clone(),
                snapshot.file_url.clone(),
                snapshot.step as i32,
            )
            .await
            .map_err(|e| e.to_string())?;
            id
        }
        None => api::manuscripts::create_draft(
            snapshot.journal_id.clone(),
            snapshot.title.clone(),
            snapshot.abstract_text.clone(),
            snapshot.keywords.clone(),
            snapshot.authors.clone(),
            snapshot.file_url.clone(),
            snapshot.step as i32,
        )
        .await
        .map_err(|e| e.to_string())?,
    };

    // Record the snapshot only once the server accepted it; a failed save
    // stays "changed" and is re-sent on the next tick.
    cache.save(&cache_key, &payload).await;
    Ok(Some(id))
}

#[component]
pub fn SubmitWizardView(
    #[props(default = 30)] autosave_interval_secs: u32,
    on_submitted: EventHandler<String>,
) -> Element {
    let mut draft = use_signal(SubmissionDraft::default);
    let saving = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let journals = use_resource(move || async move { api::journals::list_journals().await });

    // Resume the latest server draft, or the local snapshot of a draft that
    // never reached the server.
    let _ = use_resource(move || async move {
        match api::manuscripts::get_draft().await {
            Ok(Some(info)) => draft.set(SubmissionDraft::from_info(info)),
            Ok(None) => {
                let cache = DraftCache::new(make_store());
                if let Some(payload) = cache.load("new").await {
                    if let Some(restored) = SubmissionDraft::from_payload(&payload) {
                        draft.set(restored);
                    }
                }
            }
            Err(e) => tracing::warn!("draft fetch failed: {}", e),
        }
    });

    // Autosave timer. Skips while a save is in flight or before the draft has
    // a journal and title.
    use_effect(move || {
        let interval = autosave_interval_secs;
        if interval == 0 {
            return;
        }
        spawn(async move {
            loop {
                sleep_secs(interval).await;
                if !draft().autosave_ready() || saving() {
                    continue;
                }
                if let Err(e) = persist_draft(draft, saving, false).await {
                    tracing::warn!("draft autosave failed: {}", e);
                }
            }
        });
    });

    let next = move |_| async move {
        status.set(None);
        if !draft().can_proceed(draft().step) {
            return;
        }
        // Save before advancing so a reload resumes at the new step.
        if draft().autosave_ready() {
            if let Err(e) = persist_draft(draft, saving, true).await {
                status.set(Some((StatusKind::Error, e)));
                return;
            }
        }
        draft.with_mut(|d| {
            d.next_step();
        });
    };

    let back = move |_| {
        status.set(None);
        draft.with_mut(|d| d.prev_step());
    };

    let submit = move |_| async move {
        if submitting() {
            return;
        }
        status.set(None);
        submitting.set(true);

        let result = async {
            persist_draft(draft, saving, true).await?;
            let Some(id) = draft().draft_id.clone() else {
                return Err("Draft was never saved".to_string());
            };
            api::manuscripts::submit_manuscript(id.clone())
                .await
                .map_err(|e| e.to_string())?;
            Ok::<String, String>(id)
        }
        .await;

        submitting.set(false);
        match result {
            Ok(draft_id) => {
                let cache = DraftCache::new(make_store());
                cache.clear(&draft_id).await;
                cache.clear("new").await;
                on_submitted.call(draft_id);
            }
            Err(e) => status.set(Some((StatusKind::Error, e))),
        }
    };

    let current = draft();
    let step = current.step;

    rsx! {
        div { class: "view wizard",
            h1 { "Submit a manuscript" }

            div { class: "wizard-steps",
                for (i, title) in STEP_TITLES.iter().enumerate() {
                    div {
                        class: if i == step { "wizard-step active" } else if i < step { "wizard-step done" } else { "wizard-step" },
                        span { class: "wizard-step-number", "{i + 1}" }
                        span { "{title}" }
                    }
                }
            }

            if let Some((kind, text)) = status() {
                StatusMessage { kind, text }
            }
            if saving() {
                span { class: "wizard-saving", "Saving…" }
            }

            match step {
                0 => rsx! { DetailsStep { draft, journals: journals().and_then(|r| r.ok()).unwrap_or_default() } },
                1 => rsx! { AuthorsStep { draft } },
                2 => rsx! { FileStep { draft, status } },
                _ => rsx! { ReviewStep { draft } },
            }

            div { class: "wizard-nav",
                if step > 0 {
                    Button { variant: ButtonVariant::Secondary, onclick: back, "Back" }
                }
                if step + 1 < STEP_COUNT {
                    Button {
                        disabled: !current.can_proceed(step),
                        onclick: next,
                        "Next"
                    }
                } else {
                    Button {
                        disabled: !current.ready_to_submit() || submitting(),
                        onclick: submit,
                        if submitting() { "Submitting…" } else { "Submit manuscript" }
                    }
                }
            }
        }
    }
}

#[component]
fn DetailsStep(draft: Signal<SubmissionDraft>, journals: Vec<JournalInfo>) -> Element {
    let selected = draft().journal_id.clone().unwrap_or_default();
    let words = draft().abstract_word_count();
    rsx! {
        div { class: "wizard-body",
            Label { text: "Journal" }
            select {
                class: "input",
                value: "{selected}",
                onchange: move |evt| draft.with_mut(|d| d.set_journal(&evt.value())),
                option { value: "", "Select a journal…" }
                for journal in journals {
                    option { value: "{journal.id}", "{journal.name}" }
                }
            }

            Label { text: "Title" }
            Input {
                placeholder: "Manuscript title",
                value: draft().title.clone(),
                oninput: move |evt: FormEvent| draft.with_mut(|d| d.set_title(&evt.value())),
            }

            Label { text: "Abstract" }
            Textarea {
                rows: 10,
                placeholder: "Paste or write the abstract",
                value: draft().abstract_text.clone(),
                oninput: move |evt: FormEvent| draft.with_mut(|d| d.set_abstract(&evt.value())),
            }
            span { class: "wizard-word-count", "{words} words" }

            Label { text: "Keywords (comma separated)" }
            Input {
                placeholder: "e.g. genomics, sequencing",
                value: draft().keywords.clone(),
                oninput: move |evt: FormEvent| draft.with_mut(|d| d.set_keywords(&evt.value())),
            }
        }
    }
}

#[component]
fn AuthorsStep(draft: Signal<SubmissionDraft>) -> Element {
    let authors = draft().authors.clone();
    let count = authors.len();
    rsx! {
        div { class: "wizard-body",
            for (i, author) in authors.into_iter().enumerate() {
                div { class: "author-row", key: "{i}",
                    Input {
                        placeholder: "Name",
                        value: author.name.clone(),
                        oninput: move |evt: FormEvent| draft.with_mut(|d| {
                            let mut entry = d.authors[i].clone();
                            entry.name = evt.value();
                            d.update_author(i, entry);
                        }),
                    }
                    Input {
                        r#type: "email",
                        placeholder: "Email",
                        value: author.email.clone(),
                        oninput: move |evt: FormEvent| draft.with_mut(|d| {
                            let mut entry = d.authors[i].clone();
                            entry.email = evt.value();
                            d.update_author(i, entry);
                        }),
                    }
                    Input {
                        placeholder: "Affiliation",
                        value: author.affiliation.clone(),
                        oninput: move |evt: FormEvent| draft.with_mut(|d| {
                            let mut entry = d.authors[i].clone();
                            entry.affiliation = evt.value();
                            d.update_author(i, entry);
                        }),
                    }
                    label { class: "author-corresponding",
                        input {
                            r#type: "radio",
                            name: "corresponding",
                            checked: author.corresponding,
                            onchange: move |_| draft.with_mut(|d| d.set_corresponding(i)),
                        }
                        "Corresponding"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        disabled: count <= 1,
                        title: "Remove author",
                        onclick: move |_| draft.with_mut(|d| {
                            d.remove_author(i);
                        }),
                        "✕"
                    }
                }
            }
            Button {
                variant: ButtonVariant::Secondary,
                onclick: move |_| draft.with_mut(|d| d.add_author()),
                "Add author"
            }
            if draft().corresponding_count() != 1 {
                p { class: "wizard-hint", "Mark exactly one author as corresponding." }
            }
        }
    }
}

#[component]
fn FileStep(
    draft: Signal<SubmissionDraft>,
    status: Signal<Option<(StatusKind, String)>>,
) -> Element {
    let mut uploading = use_signal(|| false);

    let on_file = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let name = file.name();
        let bytes = match file.read_bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(_) => {
                status.set(Some((StatusKind::Error, "Could not read the file".to_string())));
                return;
            }
        };

        uploading.set(true);
        match api::manuscripts::upload_manuscript(name, bytes).await {
            Ok(url) => {
                draft.with_mut(|d| d.set_file_url(&url));
                status.set(None);
            }
            Err(e) => status.set(Some((StatusKind::Error, e.to_string()))),
        }
        uploading.set(false);
    };

    let current = draft();
    rsx! {
        div { class: "wizard-body",
            Label { text: "Manuscript file" }
            input {
                r#type: "file",
                accept: ".pdf,.doc,.docx",
                onchange: on_file,
            }
            if uploading() {
                span { class: "wizard-saving", "Uploading…" }
            }
            if let Some(url) = current.file_url.clone() {
                p { class: "wizard-file-url", "Uploaded: {url}" }
            }
        }
    }
}

#[component]
fn ReviewStep(draft: Signal<SubmissionDraft>) -> Element {
    let current = draft();
    rsx! {
        div { class: "wizard-body",
            h2 { "Review" }
            dl { class: "wizard-review",
                dt { "Title" }
                dd { "{current.title}" }
                dt { "Abstract" }
                dd { "{current.abstract_word_count()} words" }
                dt { "Authors" }
                dd { "{current.authors.len()}" }
                dt { "Keywords" }
                dd { "{current.keywords}" }
                dt { "File" }
                dd { "{current.file_url.clone().unwrap_or_default()}" }
            }
        }
    }
}
