//! IT ticket queue: status tabs, inline status changes, and a create/edit
//! dialog. Moving a ticket to resolved requires a resolution note, collected
//! in a small dialog before the status call goes out.

use api::models::{EmployeeInfo, ItTicketInfo, TicketPriority, TicketStatus};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label, Spinner, StatusKind, StatusMessage, Textarea};
use crate::views::ModalOverlay;

#[component]
pub fn TicketsView() -> Element {
    let mut tab = use_signal(|| None::<TicketStatus>);
    let mut editing = use_signal(|| None::<ItTicketInfo>);
    let mut show_form = use_signal(|| false);
    let mut resolving = use_signal(|| None::<ItTicketInfo>);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let mut tickets = use_resource(move || {
        let filter = tab().map(|s| s.as_str().to_string());
        async move { api::it::list_tickets(filter).await }
    });

    let mut change_status = move |ticket: ItTicketInfo, next: TicketStatus| {
        if next == TicketStatus::Resolved {
            resolving.set(Some(ticket));
            return;
        }
        spawn(async move {
            match api::it::update_ticket_status(ticket.id.clone(), next.as_str().to_string(), None)
                .await
            {
                Ok(()) => tickets.restart(),
                Err(e) => status.set(Some((StatusKind::Error, e.to_string()))),
            }
        });
    };

    rsx! {
        div { class: "view tickets",
            div { class: "view-header",
                h1 { "Tickets" }
                Button {
                    onclick: move |_| {
                        editing.set(None);
                        show_form.set(true);
                    },
                    "New ticket"
                }
            }

            div { class: "tabs",
                button {
                    class: if tab().is_none() { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(None),
                    "All"
                }
                for s in TicketStatus::all() {
                    button {
                        key: "{s}",
                        class: if tab() == Some(*s) { "tab active" } else { "tab" },
                        onclick: move |_| tab.set(Some(*s)),
                        "{s}"
                    }
                }
            }

            if let Some((kind, text)) = status() {
                StatusMessage { kind, text }
            }

            match tickets() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(list)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Subject" }
                                th { "Priority" }
                                th { "Reporter" }
                                th { "Assignee" }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            for ticket in list {
                                tr { key: "{ticket.id}",
                                    td { "{ticket.subject}" }
                                    td {
                                        span { class: "badge badge-{ticket.priority}", "{ticket.priority}" }
                                    }
                                    td { {ticket.reporter_name.clone().unwrap_or_default()} }
                                    td { {ticket.assignee_name.clone().unwrap_or_else(|| "Unassigned".to_string())} }
                                    td {
                                        select {
                                            class: "input input-inline",
                                            value: "{ticket.status}",
                                            onchange: {
                                                let t = ticket.clone();
                                                move |evt: FormEvent| {
                                                    if let Ok(next) = evt.value().parse::<TicketStatus>() {
                                                        change_status(t.clone(), next);
                                                    }
                                                }
                                            },
                                            for s in TicketStatus::all() {
                                                option { value: "{s}", selected: *s == ticket.status, "{s}" }
                                            }
                                        }
                                    }
                                    td { class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            onclick: {
                                                let t = ticket.clone();
                                                move |_| {
                                                    editing.set(Some(t.clone()));
                                                    show_form.set(true);
                                                }
                                            },
                                            "Edit"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }

            if show_form() {
                TicketForm {
                    existing: editing(),
                    on_close: move |_| show_form.set(false),
                    on_saved: move |_| {
                        show_form.set(false);
                        tickets.restart();
                    },
                }
            }

            if let Some(ticket) = resolving() {
                ResolveDialog {
                    ticket,
                    on_close: move |_| resolving.set(None),
                    on_resolved: move |_| {
                        resolving.set(None);
                        tickets.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn ResolveDialog(
    ticket: ItTicketInfo,
    on_close: EventHandler<()>,
    on_resolved: EventHandler<()>,
) -> Element {
    let mut resolution = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let ticket_id = ticket.id.clone();

    let resolve = move |_| {
        let ticket_id = ticket_id.clone();
        async move {
            let note = resolution().trim().to_string();
            if note.is_empty() {
                error.set(Some("A resolution note is required".to_string()));
                return;
            }
            match api::it::update_ticket_status(
                ticket_id,
                TicketStatus::Resolved.as_str().to_string(),
                Some(note),
            )
            .await
            {
                Ok(()) => on_resolved.call(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        }
    };

    rsx! {
        ModalOverlay { on_close: move |_| on_close.call(()),
            div { class: "modal-body",
                h2 { "Resolve ticket" }
                p { "{ticket.subject}" }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }
                Label { text: "Resolution" }
                Textarea {
                    rows: 4,
                    placeholder: "What fixed it?",
                    value: resolution(),
                    oninput: move |evt: FormEvent| resolution.set(evt.value()),
                }
                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button { onclick: resolve, "Resolve" }
                }
            }
        }
    }
}

#[component]
fn TicketForm(
    existing: Option<ItTicketInfo>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let mut subject = use_signal(|| existing.as_ref().map(|t| t.subject.clone()).unwrap_or_default());
    let mut description = use_signal(|| {
        existing
            .as_ref()
            .and_then(|t| t.description.clone())
            .unwrap_or_default()
    });
    let mut priority = use_signal(|| {
        existing
            .as_ref()
            .map(|t| t.priority)
            .unwrap_or(TicketPriority::Medium)
    });
    let mut assignee = use_signal(|| {
        existing
            .as_ref()
            .and_then(|t| t.assignee_id.clone())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| None::<String>);
    let mut employees = use_signal(Vec::<EmployeeInfo>::new);

    let _ = use_resource(move || async move {
        if let Ok(list) = api::hr::list_employees().await {
            employees.set(list);
        }
    });

    let existing_id = existing.as_ref().map(|t| t.id.clone());
    let is_edit = existing_id.is_some();

    let save = move |_| {
        let existing_id = existing_id.clone();
        async move {
            let opt = |s: String| if s.trim().is_empty() { None } else { Some(s) };
            let result = match existing_id {
                Some(id) => api::it::update_ticket(
                    id,
                    subject(),
                    opt(description()),
                    priority().as_str().to_string(),
                    opt(assignee()),
                )
                .await
                .map(|_| ()),
                None => api::it::create_ticket(
                    subject(),
                    opt(description()),
                    priority().as_str().to_string(),
                    opt(assignee()),
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
                h2 { if is_edit { "Edit ticket" } else { "New ticket" } }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }

                Label { text: "Subject" }
                Input {
                    value: subject(),
                    oninput: move |evt: FormEvent| subject.set(evt.value()),
                }
                Label { text: "Description" }
                Textarea {
                    rows: 4,
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }
                Label { text: "Priority" }
                select {
                    class: "input",
                    value: "{priority}",
                    onchange: move |evt| {
                        if let Ok(p) = evt.value().parse::<TicketPriority>() {
                            priority.set(p);
                        }
                    },
                    for p in TicketPriority::all() {
                        option { value: "{p}", "{p}" }
                    }
                }
                Label { text: "Assignee" }
                select {
                    class: "input",
                    value: "{assignee}",
                    onchange: move |evt| assignee.set(evt.value()),
                    option { value: "", "Unassigned" }
                    for employee in employees() {
                        option { value: "{employee.id}", "{employee.name}" }
                    }
                }

                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button {
                        disabled: subject().trim().is_empty(),
                        onclick: save,
                        "Save"
                    }
                }
            }
        }
    }
}
