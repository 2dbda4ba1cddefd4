//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod client_store;
pub use client_store::{make_store, ClientStore};

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, ImpersonationBanner, LogoutButton};

mod poll;
pub use poll::{sleep_ms, sleep_secs, use_poll_handle, PollHandle};

pub mod wizard;
pub use wizard::SubmissionDraft;

pub mod views;
