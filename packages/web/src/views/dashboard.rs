//! Dashboard shell and the per-route page wrappers.
//!
//! The layout guards on auth, renders the nav sidebar filtered by role, and
//! puts the impersonation banner above the routed content. Page wrappers stay
//! thin: they load the local config where a view takes an interval, and wire
//! navigation callbacks.

use api::Role;
use dioxus::prelude::*;
use ui::components::Badge;
use ui::views::{
    AssetsView, ChatView, CustomersView, DesignationsView, ExamManagerView, InvoicesView,
    ItDashboardView, LeaveBalancesView, PerformanceView, SubmitWizardView, TicketsView, UsersView,
};
use ui::{use_auth, Icon, icons, ImpersonationBanner, LogoutButton};

use super::load_config;
use crate::Route;

struct NavItem {
    label: &'static str,
    route: Route,
    roles: Option<&'static [Role]>,
}

const STAFF: &[Role] = &[
    Role::SuperAdmin,
    Role::Manager,
    Role::TeamLeader,
    Role::Executive,
];
const ADMIN: &[Role] = &[Role::SuperAdmin, Role::Manager];
const BILLING: &[Role] = &[Role::SuperAdmin, Role::Manager, Role::FinanceAdmin];

fn nav_items() -> Vec<NavItem> {
    vec![
        NavItem { label: "Home", route: Route::DashboardHome {}, roles: None },
        NavItem { label: "Submit", route: Route::Submit {}, roles: None },
        NavItem { label: "Chat", route: Route::Chat {}, roles: None },
        NavItem { label: "Customers", route: Route::Customers {}, roles: Some(STAFF) },
        NavItem { label: "Designations", route: Route::Designations {}, roles: Some(ADMIN) },
        NavItem { label: "Assets", route: Route::Assets {}, roles: Some(STAFF) },
        NavItem { label: "Tickets", route: Route::Tickets {}, roles: Some(STAFF) },
        NavItem { label: "IT overview", route: Route::ItDashboard {}, roles: Some(STAFF) },
        NavItem { label: "Users", route: Route::Users {}, roles: Some(ADMIN) },
        NavItem { label: "Leaves", route: Route::Leaves {}, roles: Some(ADMIN) },
        NavItem { label: "Performance", route: Route::Performance {}, roles: Some(ADMIN) },
        NavItem { label: "Invoices", route: Route::Invoices {}, roles: Some(BILLING) },
        NavItem { label: "Exams", route: Route::Exams {}, roles: Some(ADMIN) },
    ]
}

fn nav_icon(label: &str) -> Element {
    let icon = match label {
        "Home" => rsx! { Icon { icon: icons::FaHouse, width: 16, height: 16 } },
        "Submit" => rsx! { Icon { icon: icons::FaPaperPlane, width: 16, height: 16 } },
        "Chat" => rsx! { Icon { icon: icons::FaComments, width: 16, height: 16 } },
        "Customers" => rsx! { Icon { icon: icons::FaUsers, width: 16, height: 16 } },
        "Designations" => rsx! { Icon { icon: icons::FaSitemap, width: 16, height: 16 } },
        "Assets" => rsx! { Icon { icon: icons::FaLaptop, width: 16, height: 16 } },
        "Tickets" => rsx! { Icon { icon: icons::FaTicket, width: 16, height: 16 } },
        "IT overview" => rsx! { Icon { icon: icons::FaChartLine, width: 16, height: 16 } },
        "Users" => rsx! { Icon { icon: icons::FaUserGear, width: 16, height: 16 } },
        "Leaves" => rsx! { Icon { icon: icons::FaCalendarDays, width: 16, height: 16 } },
        "Performance" => rsx! { Icon { icon: icons::FaRankingStar, width: 16, height: 16 } },
        "Invoices" => rsx! { Icon { icon: icons::FaFileInvoice, width: 16, height: 16 } },
        _ => rsx! { Icon { icon: icons::FaClipboardList, width: 16, height: 16 } },
    };
    icon
}

#[component]
pub fn DashboardLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let state = auth();
    // While the initial fetch is in flight the cached profile, when present,
    // already gives us a user to render the shell from.
    if state.loading && state.user.is_none() {
        return rsx! {
            div { class: "page-loading", ui::components::Spinner {} }
        };
    }
    let Some(user) = state.user else {
        nav.replace(Route::Login {});
        return rsx! {};
    };

    let role = user.role;
    let items: Vec<NavItem> = nav_items()
        .into_iter()
        .filter(|item| item.roles.is_none_or(|allowed| allowed.contains(&role)))
        .collect();

    rsx! {
        div { class: "dashboard",
            nav { class: "dashboard-nav",
                div { class: "dashboard-brand", "OpsDeck" }
                ul {
                    for item in items {
                        li {
                            key: "{item.label}",
                            class: if item.route == route { "nav-item active" } else { "nav-item" },
                            Link { to: item.route.clone(),
                                {nav_icon(item.label)}
                                span { "{item.label}" }
                            }
                        }
                    }
                }
                div { class: "dashboard-nav-footer",
                    span { class: "nav-user", "{user.display_name()}" }
                    Badge { text: user.role.label().to_string() }
                    LogoutButton { class: "btn btn-ghost" }
                }
            }
            main { class: "dashboard-main",
                ImpersonationBanner {}
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
pub fn DashboardHome() -> Element {
    let auth = use_auth();
    let manuscripts =
        use_resource(move || async move { api::manuscripts::list_my_manuscripts().await });

    let name = auth()
        .user
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    rsx! {
        div { class: "view home",
            h1 { "Welcome back, {name}" }

            h2 { "Your submissions" }
            match manuscripts() {
                None => rsx! { ui::components::Spinner {} },
                Some(Err(e)) => rsx! {
                    p { class: "status status-error", "{e}" }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "home-empty",
                        "No manuscripts yet. "
                        Link { to: Route::Submit {}, "Start a submission" }
                        "."
                    }
                },
                Some(Ok(list)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Title" }
                                th { "Journal" }
                                th { "Status" }
                                th { "Submitted" }
                            }
                        }
                        tbody {
                            for manuscript in list {
                                tr { key: "{manuscript.id}",
                                    td { "{manuscript.title}" }
                                    td { "{manuscript.journal_name}" }
                                    td {
                                        span { class: "badge badge-{manuscript.status}", "{manuscript.status}" }
                                    }
                                    td { "{manuscript.submitted_at}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub fn Submit() -> Element {
    let nav = use_navigator();
    let config = use_resource(move || async move { load_config().await });

    let interval = config()
        .map(|c| c.drafts.autosave_interval_secs)
        .unwrap_or(30);

    rsx! {
        SubmitWizardView {
            autosave_interval_secs: interval,
            on_submitted: move |_manuscript_id| {
                nav.push(Route::DashboardHome {});
            },
        }
    }
}

#[component]
pub fn Chat() -> Element {
    let config = use_resource(move || async move { load_config().await });

    let interval = config().map(|c| c.chat.poll_interval_secs).unwrap_or(3);

    rsx! {
        ChatView { poll_interval_secs: interval }
    }
}

#[component]
pub fn Customers() -> Element {
    rsx! { CustomersView {} }
}

#[component]
pub fn Designations() -> Element {
    rsx! { DesignationsView {} }
}

#[component]
pub fn Assets() -> Element {
    rsx! { AssetsView {} }
}

#[component]
pub fn Tickets() -> Element {
    rsx! { TicketsView {} }
}

#[component]
pub fn ItDashboard() -> Element {
    rsx! { ItDashboardView {} }
}

#[component]
pub fn Users() -> Element {
    rsx! { UsersView {} }
}

#[component]
pub fn Leaves() -> Element {
    rsx! { LeaveBalancesView {} }
}

#[component]
pub fn Performance() -> Element {
    rsx! { PerformanceView {} }
}

#[component]
pub fn Invoices() -> Element {
    rsx! { InvoicesView {} }
}

#[component]
pub fn Exams() -> Element {
    rsx! { ExamManagerView {} }
}
