//! Authentication context and hooks for the UI.

use api::UserInfo;
use dioxus::prelude::*;
use store::{CachedProfile, ProfileCache};

use crate::client_store::make_store;
use crate::components::{Button, ButtonVariant};
use crate::poll::sleep_secs;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
    /// Whether the server is reachable (last connectivity check succeeded).
    pub online: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            online: false,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Rebuild a [`UserInfo`] from the cached profile. Returns `None` when the
/// cached role string no longer parses.
fn profile_user(profile: CachedProfile) -> Option<UserInfo> {
    Some(UserInfo {
        id: profile.id,
        email: profile.email,
        name: Some(profile.name),
        avatar_url: profile.avatar_url,
        role: profile.role.parse().ok()?,
        impersonated: profile.impersonated,
    })
}

fn cache_profile(user: &Option<UserInfo>) {
    let cache = ProfileCache::new(make_store());
    match user {
        Some(user) => {
            let profile = CachedProfile {
                id: user.id.clone(),
                name: user.display_name().to_string(),
                email: user.email.clone(),
                role: user.role.to_string(),
                avatar_url: user.avatar_url.clone(),
                impersonated: user.impersonated,
            };
            spawn(async move {
                cache.save(&profile).await;
            });
        }
        None => {
            spawn(async move {
                cache.clear().await;
            });
        }
    }
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Seed from the cached profile so the dashboard shell has a name and
    // role to render before the first round-trip answers.
    let _ = use_resource(move || async move {
        let cache = ProfileCache::new(make_store());
        if let Some(profile) = cache.load().await {
            let current = auth_state();
            if current.loading && current.user.is_none() {
                auth_state.set(AuthState {
                    user: profile_user(profile),
                    loading: true,
                    online: false,
                });
            }
        }
    });

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(user) => {
                let online = true;
                cache_profile(&user);
                auth_state.set(AuthState {
                    user,
                    loading: false,
                    online,
                });
            }
            Err(_) => {
                auth_state.set(AuthState {
                    user: None,
                    loading: false,
                    online: false,
                });
            }
        }
    });

    // Periodic connectivity check (every 30s)
    use_effect(move || {
        spawn(async move {
            loop {
                sleep_secs(30).await;

                // Don't check while initial load is still in progress
                if auth_state().loading {
                    continue;
                }
                match api::get_current_user().await {
                    Ok(user) => {
                        let current = auth_state();
                        if current.user != user || !current.online {
                            cache_profile(&user);
                            auth_state.set(AuthState {
                                user,
                                loading: false,
                                online: true,
                            });
                        }
                    }
                    Err(_) => {
                        if auth_state().online {
                            let current = auth_state();
                            auth_state.set(AuthState {
                                online: false,
                                ..current
                            });
                        }
                    }
                }
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Role;

    fn sample_profile(role: &str) -> CachedProfile {
        CachedProfile {
            id: "u-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: role.to_string(),
            avatar_url: None,
            impersonated: true,
        }
    }

    #[test]
    fn test_profile_user_round_trip() {
        let user = profile_user(sample_profile("manager")).unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.role, Role::Manager);
        assert!(user.impersonated);
    }

    #[test]
    fn test_stale_role_string_is_dropped() {
        assert!(profile_user(sample_profile("chief_vibes_officer")).is_none());
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        if let Ok(()) = api::logout().await {
            cache_profile(&None);
            auth_state.set(AuthState {
                user: None,
                loading: false,
                online: auth_state().online,
            });
            // Redirect to login
            #[cfg(target_arch = "wasm32")]
            {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/login");
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

/// Banner shown while a super admin is acting as another user.
#[component]
pub fn ImpersonationBanner() -> Element {
    let mut auth_state = use_auth();

    let Some(user) = auth_state().user else {
        return rsx! {};
    };
    if !user.impersonated {
        return rsx! {};
    }

    let name = user.display_name().to_string();

    let stop = move |_| async move {
        match api::stop_impersonation().await {
            Ok(admin) => {
                cache_profile(&Some(admin.clone()));
                auth_state.set(AuthState {
                    user: Some(admin),
                    loading: false,
                    online: true,
                });
            }
            Err(e) => {
                tracing::error!("Failed to stop impersonation: {}", e);
            }
        }
    };

    rsx! {
        div {
            class: "impersonation-banner",
            span { "Viewing as {name}" }
            Button {
                variant: ButtonVariant::Secondary,
                onclick: stop,
                "Return to admin"
            }
        }
    }
}
