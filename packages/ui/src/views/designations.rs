//! Designation catalog: card grid of positions with a level filter and a
//! create/edit dialog for the career-ladder metadata.

use api::models::DesignationInfo;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label, Spinner, StatusKind, StatusMessage, Textarea};
use crate::views::ModalOverlay;

#[component]
pub fn DesignationsView() -> Element {
    let mut level_filter = use_signal(|| None::<i32>);
    let mut editing = use_signal(|| None::<DesignationInfo>);
    let mut show_form = use_signal(|| false);
    let mut confirm_delete = use_signal(|| None::<DesignationInfo>);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let mut designations =
        use_resource(move || async move { api::hr::list_designations().await });

    let current = designations();
    let levels: Vec<i32> = match &current {
        Some(Ok(list)) => {
            let mut levels: Vec<i32> = list.iter().map(|d| d.level).collect();
            levels.sort_unstable();
            levels.dedup();
            levels
        }
        _ => Vec::new(),
    };

    rsx! {
        div { class: "view designations",
            div { class: "view-header",
                h1 { "Designations" }
                Button {
                    onclick: move |_| {
                        editing.set(None);
                        show_form.set(true);
                    },
                    "New designation"
                }
            }

            div { class: "filter-bar",
                select {
                    class: "input",
                    onchange: move |evt| {
                        level_filter.set(evt.value().parse::<i32>().ok());
                    },
                    option { value: "", "All levels" }
                    for level in levels {
                        option { value: "{level}", "Level {level}" }
                    }
                }
            }

            if let Some((kind, text)) = status() {
                StatusMessage { kind, text }
            }

            match current {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(list)) => {
                    let visible: Vec<DesignationInfo> = list
                        .into_iter()
                        .filter(|d| level_filter().is_none_or(|l| d.level == l))
                        .collect();
                    rsx! {
                        div { class: "card-grid",
                            for designation in visible {
                                div { class: "card", key: "{designation.id}",
                                    div { class: "card-header",
                                        h3 { "{designation.name}" }
                                        span { class: "badge", "{designation.code}" }
                                    }
                                    p { class: "card-meta", "Level {designation.level}" }
                                    p { class: "card-meta",
                                        "{designation.expected_experience_years} yrs experience, "
                                        "{designation.promotion_wait_months} mo to promotion"
                                    }
                                    if let Some(desc) = designation.job_description.clone() {
                                        p { class: "card-body", "{desc}" }
                                    }
                                    div { class: "card-actions",
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            onclick: {
                                                let d = designation.clone();
                                                move |_| {
                                                    editing.set(Some(d.clone()));
                                                    show_form.set(true);
                                                }
                                            },
                                            "Edit"
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            onclick: {
                                                let d = designation.clone();
                                                move |_| confirm_delete.set(Some(d.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if show_form() {
                DesignationForm {
                    existing: editing(),
                    on_close: move |_| show_form.set(false),
                    on_saved: move |_| {
                        show_form.set(false);
                        designations.restart();
                    },
                }
            }

            if let Some(target) = confirm_delete() {
                ModalOverlay { on_close: move |_| confirm_delete.set(None),
                    div { class: "modal-body",
                        h2 { "Delete designation" }
                        p { "Remove \"{target.name}\"? Employees holding it keep their records but lose the link." }
                        div { class: "modal-actions",
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: move |_| confirm_delete.set(None),
                                "Cancel"
                            }
                            Button {
                                variant: ButtonVariant::Danger,
                                onclick: {
                                    let id = target.id.clone();
                                    move |_| {
                                        let id = id.clone();
                                        async move {
                                            match api::hr::delete_designation(id).await {
                                                Ok(()) => {
                                                    confirm_delete.set(None);
                                                    designations.restart();
                                                }
                                                Err(e) => {
                                                    status.set(Some((StatusKind::Error, e.to_string())));
                                                    confirm_delete.set(None);
                                                }
                                            }
                                        }
                                    }
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DesignationForm(
    existing: Option<DesignationInfo>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let base = existing.clone().unwrap_or(DesignationInfo {
        id: String::new(),
        name: String::new(),
        code: String::new(),
        job_description: None,
        kra: None,
        expected_experience_years: 0,
        promotion_wait_months: 12,
        increment_guidelines: None,
        level: 1,
    });

    let mut name = use_signal(|| base.name.clone());
    let mut code = use_signal(|| base.code.clone());
    let mut job_description = use_signal(|| base.job_description.clone().unwrap_or_default());
    let mut kra = use_signal(|| base.kra.clone().unwrap_or_default());
    let mut experience = use_signal(|| base.expected_experience_years.to_string());
    let mut promotion_wait = use_signal(|| base.promotion_wait_months.to_string());
    let mut increments = use_signal(|| base.increment_guidelines.clone().unwrap_or_default());
    let mut level = use_signal(|| base.level.to_string());
    let mut error = use_signal(|| None::<String>);

    let existing_id = existing.as_ref().map(|d| d.id.clone());
    let is_edit = existing_id.is_some();

    let save = move |_| {
        let existing_id = existing_id.clone();
        async move {
            let experience: i32 = match experience().parse() {
                Ok(v) => v,
                Err(_) => {
                    error.set(Some("Experience must be a whole number of years".to_string()));
                    return;
                }
            };
            let promotion_wait: i32 = match promotion_wait().parse() {
                Ok(v) => v,
                Err(_) => {
                    error.set(Some("Promotion wait must be a whole number of months".to_string()));
                    return;
                }
            };
            let level: i32 = match level().parse() {
                Ok(v) => v,
                Err(_) => {
                    error.set(Some("Level must be a number".to_string()));
                    return;
                }
            };

            let opt = |s: String| if s.trim().is_empty() { None } else { Some(s) };
            let result = match existing_id {
                Some(id) => api::hr::update_designation(
                    id,
                    name(),
                    code(),
                    opt(job_description()),
                    opt(kra()),
                    experience,
                    promotion_wait,
                    opt(increments()),
                    level,
                )
                .await
                .map(|_| ()),
                None => api::hr::create_designation(
                    name(),
                    code(),
                    opt(job_description()),
                    opt(kra()),
                    experience,
                    promotion_wait,
                    opt(increments()),
                    level,
                )
                .await
                .map(|_| ()),
            };

            match result {
                Ok(()) => on_saved.call(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        }
    };

    rsx! {
        ModalOverlay { on_close: move |_| on_close.call(()),
            div { class: "modal-body",
                h2 { if is_edit { "Edit designation" } else { "New designation" } }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }

                Label { text: "Name" }
                Input {
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                Label { text: "Code" }
                Input {
                    placeholder: "e.g. SE-2",
                    value: code(),
                    oninput: move |evt: FormEvent| code.set(evt.value()),
                }
                Label { text: "Level" }
                Input {
                    r#type: "number",
                    value: level(),
                    oninput: move |evt: FormEvent| level.set(evt.value()),
                }
                Label { text: "Expected experience (years)" }
                Input {
                    r#type: "number",
                    value: experience(),
                    oninput: move |evt: FormEvent| experience.set(evt.value()),
                }
                Label { text: "Promotion wait (months)" }
                Input {
                    r#type: "number",
                    value: promotion_wait(),
                    oninput: move |evt: FormEvent| promotion_wait.set(evt.value()),
                }
                Label { text: "Job description" }
                Textarea {
                    rows: 4,
                    value: job_description(),
                    oninput: move |evt: FormEvent| job_description.set(evt.value()),
                }
                Label { text: "Key result areas (one per line)" }
                Textarea {
                    rows: 4,
                    value: kra(),
                    oninput: move |evt: FormEvent| kra.set(evt.value()),
                }
                Label { text: "Increment guidelines" }
                Textarea {
                    rows: 3,
                    value: increments(),
                    oninput: move |evt: FormEvent| increments.set(evt.value()),
                }

                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button {
                        disabled: name().trim().is_empty() || code().trim().is_empty(),
                        onclick: save,
                        "Save"
                    }
                }
            }
        }
    }
}
