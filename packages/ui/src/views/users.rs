//! User administration: role management, account creation, and the
//! impersonation entry point for super admins.

use api::models::{Role, UserInfo};
use dioxus::prelude::*;

use crate::auth::{use_auth, AuthState};
use crate::components::{Button, ButtonVariant, Input, Label, Spinner, StatusKind, StatusMessage};
use crate::views::ModalOverlay;

#[component]
pub fn UsersView() -> Element {
    let mut auth = use_auth();
    let mut editing = use_signal(|| None::<UserInfo>);
    let mut show_form = use_signal(|| false);
    let mut confirm_delete = use_signal(|| None::<UserInfo>);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let mut users = use_resource(move || async move { api::users::list_users(500).await });

    let me = auth().user;
    let can_impersonate = me.as_ref().is_some_and(|u| u.role == Role::SuperAdmin);
    let my_id = me.map(|u| u.id).unwrap_or_default();

    let impersonate = move |user: UserInfo| async move {
        match api::impersonate_user(user.id.clone()).await {
            Ok(info) => auth.set(AuthState {
                user: Some(info),
                loading: false,
                online: true,
            }),
            Err(e) => status.set(Some((StatusKind::Error, e.to_string()))),
        }
    };

    rsx! {
        div { class: "view users",
            div { class: "view-header",
                h1 { "Users" }
                Button {
                    onclick: move |_| {
                        editing.set(None);
                        show_form.set(true);
                    },
                    "New user"
                }
            }

            if let Some((kind, text)) = status() {
                StatusMessage { kind, text }
            }

            match users() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(list)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Email" }
                                th { "Role" }
                                th {}
                            }
                        }
                        tbody {
                            for user in list {
                                tr { key: "{user.id}",
                                    td { "{user.display_name()}" }
                                    td { "{user.email}" }
                                    td {
                                        span { class: "badge", "{user.role.label()}" }
                                    }
                                    td { class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            onclick: {
                                                let u = user.clone();
                                                move |_| {
                                                    editing.set(Some(u.clone()));
                                                    show_form.set(true);
                                                }
                                            },
                                            "Edit"
                                        }
                                        if can_impersonate && user.id != my_id {
                                            Button {
                                                variant: ButtonVariant::Ghost,
                                                title: "Sign in as this user",
                                                onclick: {
                                                    let u = user.clone();
                                                    move |_| impersonate(u.clone())
                                                },
                                                "Impersonate"
                                            }
                                        }
                                        if user.id != my_id {
                                            Button {
                                                variant: ButtonVariant::Ghost,
                                                onclick: {
                                                    let u = user.clone();
                                                    move |_| confirm_delete.set(Some(u.clone()))
                                                },
                                                "Delete"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }

            if show_form() {
                UserForm {
                    existing: editing(),
                    on_close: move |_| show_form.set(false),
                    on_saved: move |_| {
                        show_form.set(false);
                        users.restart();
                    },
                }
            }

            if let Some(target) = confirm_delete() {
                ModalOverlay { on_close: move |_| confirm_delete.set(None),
                    div { class: "modal-body",
                        h2 { "Delete user" }
                        p { "Delete the account for {target.email}? This cannot be undone." }
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
                                            match api::users::delete_user(id).await {
                                                Ok(()) => {
                                                    confirm_delete.set(None);
                                                    users.restart();
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
fn UserForm(
    existing: Option<UserInfo>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let mut name = use_signal(|| {
        existing
            .as_ref()
            .and_then(|u| u.name.clone())
            .unwrap_or_default()
    });
    let mut email = use_signal(|| existing.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| {
        existing
            .as_ref()
            .map(|u| u.role)
            .unwrap_or(Role::Customer)
    });
    let mut error = use_signal(|| None::<String>);

    let existing_id = existing.as_ref().map(|u| u.id.clone());
    let is_edit = existing_id.is_some();

    let save = move |_| {
        let existing_id = existing_id.clone();
        async move {
            let result = match existing_id {
                Some(id) => {
                    api::users::update_user(id, name(), role().as_str().to_string()).await
                }
                None => {
                    if password().len() < 8 {
                        error.set(Some("Password must be at least 8 characters".to_string()));
                        return;
                    }
                    api::users::create_user(
                        email(),
                        name(),
                        role().as_str().to_string(),
                        password(),
                    )
                    .await
                    .map(|_| ())
                }
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
                h2 { if is_edit { "Edit user" } else { "New user" } }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }

                Label { text: "Name" }
                Input {
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                if !is_edit {
                    Label { text: "Email" }
                    Input {
                        r#type: "email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    Label { text: "Password" }
                    Input {
                        r#type: "password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }
                Label { text: "Role" }
                select {
                    class: "input",
                    value: "{role().as_str()}",
                    onchange: move |evt| {
                        if let Ok(r) = evt.value().parse::<Role>() {
                            role.set(r);
                        }
                    },
                    for r in Role::all() {
                        option { value: "{r.as_str()}", "{r.label()}" }
                    }
                }

                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button {
                        disabled: if is_edit { false } else { email().trim().is_empty() },
                        onclick: save,
                        "Save"
                    }
                }
            }
        }
    }
}
