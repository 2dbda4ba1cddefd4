//! Self-service registration. New accounts start as authors.

use dioxus::prelude::*;
use ui::components::{Button, Input, Label};
use ui::{use_auth, AuthState};

use crate::Route;

#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if busy() {
            return;
        }
        if password() != confirm() {
            error.set(Some("Passwords do not match".to_string()));
            return;
        }
        if password().len() < 8 {
            error.set(Some("Password must be at least 8 characters".to_string()));
            return;
        }
        error.set(None);
        busy.set(true);
        match api::register(email(), password(), name()).await {
            Ok(user) => {
                auth.set(AuthState {
                    user: Some(user),
                    loading: false,
                    online: true,
                });
                nav.replace(Route::DashboardHome {});
            }
            Err(e) => error.set(Some(e.to_string())),
        }
        busy.set(false);
    };

    rsx! {
        div { class: "auth-page",
            form { class: "auth-card", onsubmit: submit,
                h1 { "Create account" }

                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }

                Label { text: "Name" }
                Input {
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
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
                Label { text: "Confirm password" }
                Input {
                    r#type: "password",
                    value: confirm(),
                    oninput: move |evt: FormEvent| confirm.set(evt.value()),
                }

                Button {
                    class: "auth-submit",
                    disabled: busy() || email().trim().is_empty() || password().is_empty(),
                    onclick: move |_| {},
                    if busy() { "Creating…" } else { "Create account" }
                }

                p { class: "auth-switch",
                    "Already registered? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
