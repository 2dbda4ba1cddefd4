//! Customer directory: filterable, paginated table with bulk assignment.
//!
//! Bulk assignment targets either the checked rows or, when nothing is
//! checked, every customer matching the active filters. The request shape
//! carries exactly one of the two, never both.

use std::collections::HashSet;

use api::models::{BulkAssignRequest, CustomerFilters, CustomerInfo, CustomerType, Paginated, Role, UserInfo};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Spinner, StatusKind, StatusMessage};
use crate::poll::sleep_ms;
use crate::views::ModalOverlay;

const PAGE_SIZE: u32 = 25;
const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Build the assignment request from the current selection and filters.
/// Checked rows win; with nothing checked the active filters apply.
fn bulk_assign_request(
    selected: &HashSet<String>,
    filters: &CustomerFilters,
    assigned_to: String,
) -> BulkAssignRequest {
    if selected.is_empty() {
        BulkAssignRequest {
            customer_ids: None,
            filters: Some(filters.clone()),
            assigned_to,
        }
    } else {
        let mut ids: Vec<String> = selected.iter().cloned().collect();
        ids.sort();
        BulkAssignRequest {
            customer_ids: Some(ids),
            filters: None,
            assigned_to,
        }
    }
}

#[component]
pub fn CustomersView() -> Element {
    let mut search_input = use_signal(String::new);
    let mut debounce_seq = use_signal(|| 0u64);
    let mut filters = use_signal(CustomerFilters::default);
    let mut page = use_signal(|| 1u32);
    let mut selected = use_signal(HashSet::<String>::new);
    let mut show_assign = use_signal(|| false);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let mut customers = use_resource(move || {
        let f = filters();
        let p = page();
        async move {
            api::customers::list_customers(
                p,
                PAGE_SIZE,
                f.search.clone(),
                f.customer_type.clone(),
                f.country.clone(),
                f.state.clone(),
            )
            .await
        }
    });

    // Debounced search: only the newest keystroke's timer commits the filter.
    let on_search = move |evt: FormEvent| {
        search_input.set(evt.value());
        let seq = debounce_seq() + 1;
        debounce_seq.set(seq);
        spawn(async move {
            sleep_ms(SEARCH_DEBOUNCE_MS).await;
            if debounce_seq() != seq {
                return;
            }
            let term = search_input().trim().to_string();
            filters.with_mut(|f| f.search = if term.is_empty() { None } else { Some(term) });
            page.set(1);
            selected.set(HashSet::new());
        });
    };

    let mut set_filter = move |apply: Box<dyn Fn(&mut CustomerFilters)>| {
        filters.with_mut(|f| apply(f));
        page.set(1);
        selected.set(HashSet::new());
    };

    let current: Option<Result<Paginated<CustomerInfo>, _>> = customers();

    rsx! {
        div { class: "view customers",
            h1 { "Customers" }

            div { class: "filter-bar",
                Input {
                    placeholder: "Search name, email, or organization",
                    value: search_input(),
                    oninput: on_search,
                }
                select {
                    class: "input",
                    onchange: move |evt| {
                        let v = evt.value();
                        set_filter(Box::new(move |f| {
                            f.customer_type = if v.is_empty() { None } else { Some(v.clone()) };
                        }));
                    },
                    option { value: "", "All types" }
                    for t in CustomerType::all() {
                        option { value: "{t}", "{t}" }
                    }
                }
                Input {
                    placeholder: "Country",
                    value: filters().country.clone().unwrap_or_default(),
                    onchange: move |evt: FormEvent| {
                        let v = evt.value().trim().to_string();
                        set_filter(Box::new(move |f| {
                            f.country = if v.is_empty() { None } else { Some(v.clone()) };
                        }));
                    },
                }
                Input {
                    placeholder: "State",
                    value: filters().state.clone().unwrap_or_default(),
                    onchange: move |evt: FormEvent| {
                        let v = evt.value().trim().to_string();
                        set_filter(Box::new(move |f| {
                            f.state = if v.is_empty() { None } else { Some(v.clone()) };
                        }));
                    },
                }
                Button {
                    onclick: move |_| show_assign.set(true),
                    if selected().is_empty() {
                        "Assign all matching"
                    } else {
                        "Assign {selected().len()} selected"
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
                Some(Ok(listing)) => rsx! {
                    CustomerTable { listing: listing.clone(), selected }
                    div { class: "pagination",
                        Button {
                            variant: ButtonVariant::Secondary,
                            disabled: page() <= 1,
                            onclick: move |_| {
                                page.set(page() - 1);
                                selected.set(HashSet::new());
                            },
                            "Previous"
                        }
                        span { "Page {listing.page} of {listing.total_pages.max(1)} ({listing.total} customers)" }
                        Button {
                            variant: ButtonVariant::Secondary,
                            disabled: page() >= listing.total_pages,
                            onclick: move |_| {
                                page.set(page() + 1);
                                selected.set(HashSet::new());
                            },
                            "Next"
                        }
                    }
                },
            }

            if show_assign() {
                BulkAssignModal {
                    count: selected().len(),
                    on_close: move |_| show_assign.set(false),
                    on_assign: move |assignee: String| async move {
                        let request = bulk_assign_request(&selected(), &filters(), assignee);
                        match api::customers::bulk_assign(request).await {
                            Ok(affected) => {
                                status.set(Some((
                                    StatusKind::Success,
                                    format!("Assigned {} customers", affected),
                                )));
                                selected.set(HashSet::new());
                                show_assign.set(false);
                                customers.restart();
                            }
                            Err(e) => status.set(Some((StatusKind::Error, e.to_string()))),
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn CustomerTable(listing: Paginated<CustomerInfo>, selected: Signal<HashSet<String>>) -> Element {
    rsx! {
        table { class: "data-table",
            thead {
                tr {
                    th {}
                    th { "Name" }
                    th { "Email" }
                    th { "Type" }
                    th { "Country" }
                    th { "Organization" }
                    th { "Assigned to" }
                }
            }
            tbody {
                for customer in listing.data {
                    tr { key: "{customer.id}",
                        td {
                            input {
                                r#type: "checkbox",
                                checked: selected().contains(&customer.id),
                                onchange: {
                                    let id = customer.id.clone();
                                    move |evt: FormEvent| {
                                        selected.with_mut(|s| {
                                            if evt.checked() {
                                                s.insert(id.clone());
                                            } else {
                                                s.remove(&id);
                                            }
                                        });
                                    }
                                },
                            }
                        }
                        td { "{customer.name}" }
                        td { "{customer.email}" }
                        td { "{customer.customer_type}" }
                        td { {customer.country.clone().unwrap_or_default()} }
                        td { {customer.organization.clone().unwrap_or_default()} }
                        td { {customer.assigned_to_name.clone().unwrap_or_else(|| "Unassigned".to_string())} }
                    }
                }
            }
        }
    }
}

#[component]
fn BulkAssignModal(
    count: usize,
    on_close: EventHandler<()>,
    on_assign: EventHandler<String>,
) -> Element {
    let mut staff = use_signal(Vec::<UserInfo>::new);
    let mut assignee = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let _ = use_resource(move || async move {
        match api::users::list_users(500).await {
            Ok(users) => staff.set(
                users
                    .into_iter()
                    .filter(|u| !matches!(u.role, Role::Customer | Role::Author))
                    .collect(),
            ),
            Err(e) => error.set(Some(e.to_string())),
        }
    });

    rsx! {
        ModalOverlay { on_close: move |_| on_close.call(()),
            div { class: "modal-body",
                h2 { "Bulk assign" }
                p {
                    if count == 0 {
                        "Every customer matching the active filters will be reassigned."
                    } else {
                        "The {count} selected customers will be reassigned."
                    }
                }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }
                select {
                    class: "input",
                    onchange: move |evt| assignee.set(evt.value()),
                    option { value: "", "Select a staff member…" }
                    for user in staff() {
                        option { value: "{user.id}", "{user.display_name()} ({user.role.label()})" }
                    }
                }
                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button {
                        disabled: assignee().is_empty(),
                        onclick: move |_| on_assign.call(assignee()),
                        "Assign"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_produces_id_request_without_filters() {
        let mut selected = HashSet::new();
        selected.insert("a".to_string());
        selected.insert("b".to_string());
        let filters = CustomerFilters {
            search: Some("acme".to_string()),
            ..Default::default()
        };

        let req = bulk_assign_request(&selected, &filters, "staff-1".to_string());

        assert_eq!(req.customer_ids, Some(vec!["a".to_string(), "b".to_string()]));
        assert!(req.filters.is_none());
        assert_eq!(req.assigned_to, "staff-1");
    }

    #[test]
    fn test_empty_selection_produces_filter_request_without_ids() {
        let selected = HashSet::new();
        let filters = CustomerFilters {
            customer_type: Some("agency".to_string()),
            ..Default::default()
        };

        let req = bulk_assign_request(&selected, &filters, "staff-1".to_string());

        assert!(req.customer_ids.is_none());
        assert_eq!(req.filters, Some(filters));
    }

    #[test]
    fn test_empty_selection_and_empty_filters_targets_everyone() {
        let req = bulk_assign_request(
            &HashSet::new(),
            &CustomerFilters::default(),
            "staff-1".to_string(),
        );

        assert!(req.customer_ids.is_none());
        assert!(req.filters.as_ref().is_some_and(|f| f.is_empty()));
    }
}
