//! Login page with an email/password form.

use dioxus::prelude::*;
use ui::components::{Button, Input, Label};
use ui::{use_auth, AuthState};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    // Already signed in, go straight to the dashboard
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::DashboardHome {});
    }

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if busy() {
            return;
        }
        error.set(None);
        busy.set(true);
        match api::login_password(email(), password()).await {
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
                h1 { "OpsDeck" }
                p { class: "auth-subtitle", "Sign in to your workspace" }

                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }

                Label { text: "Email" }
                Input {
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                Label { text: "Password" }
                Input {
                    r#type: "password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Button {
                    class: "auth-submit",
                    disabled: busy() || email().trim().is_empty() || password().is_empty(),
                    onclick: move |_| {},
                    if busy() { "Signing in…" } else { "Sign in" }
                }

                p { class: "auth-switch",
                    "No account? "
                    Link { to: Route::Register {}, "Register" }
                }
            }
        }
    }
}
