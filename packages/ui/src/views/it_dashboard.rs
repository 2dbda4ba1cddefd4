//! IT dashboard: ticket counts by status plus asset totals.

use dioxus::prelude::*;

use crate::components::{Spinner, StatusKind, StatusMessage};

#[component]
pub fn ItDashboardView() -> Element {
    let dashboard = use_resource(move || async move { api::it::it_dashboard().await });

    rsx! {
        div { class: "view it-dashboard",
            h1 { "IT overview" }

            match dashboard() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(snapshot)) => rsx! {
                    div { class: "stat-grid",
                        StatCard { label: "Open tickets", value: snapshot.open_tickets.to_string() }
                        StatCard { label: "In progress", value: snapshot.in_progress_tickets.to_string() }
                        StatCard { label: "Resolved", value: snapshot.resolved_tickets.to_string() }
                        StatCard { label: "Closed", value: snapshot.closed_tickets.to_string() }
                        StatCard { label: "Assets", value: snapshot.asset_count.to_string() }
                        StatCard {
                            label: "Asset value",
                            value: format!("{:.2}", snapshot.asset_value),
                        }
                        StatCard { label: "In repair", value: snapshot.assets_in_repair.to_string() }
                    }
                },
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: String) -> Element {
    rsx! {
        div { class: "stat-card",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}
