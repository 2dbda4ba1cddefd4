//! Leave balances: per-employee allocations and usage for a year, with an
//! edit dialog for the allocated columns. Used days come from approved leave
//! requests and are read-only here.

use api::models::LeaveBalanceInfo;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label, Spinner, StatusKind, StatusMessage};
use crate::poll::sleep_ms;
use crate::views::ModalOverlay;

const SEARCH_DEBOUNCE_MS: u64 = 300;

#[component]
pub fn LeaveBalancesView(#[props(default = 2026)] current_year: i32) -> Element {
    let mut year = use_signal(|| current_year);
    let mut search_input = use_signal(String::new);
    let mut search = use_signal(|| None::<String>);
    let mut debounce_seq = use_signal(|| 0u64);
    let mut editing = use_signal(|| None::<LeaveBalanceInfo>);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let mut balances = use_resource(move || {
        let y = year();
        let term = search();
        async move { api::leaves::list_leave_balances(y, term).await }
    });

    // Debounced search: only the newest keystroke's timer commits the term.
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
            search.set(if term.is_empty() { None } else { Some(term) });
        });
    };

    let years: Vec<i32> = (current_year - 3..=current_year + 1).rev().collect();

    rsx! {
        div { class: "view leave-balances",
            h1 { "Leave balances" }

            div { class: "filter-bar",
                select {
                    class: "input",
                    value: "{year}",
                    onchange: move |evt| {
                        if let Ok(y) = evt.value().parse() {
                            year.set(y);
                        }
                    },
                    for y in years {
                        option { value: "{y}", "{y}" }
                    }
                }
                Input {
                    placeholder: "Search employees",
                    value: search_input(),
                    oninput: on_search,
                }
            }

            if let Some((kind, text)) = status() {
                StatusMessage { kind, text }
            }

            match balances() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(list)) => {
                    let total_allocated: i32 = list.iter().map(|b| b.total_allocated()).sum();
                    let total_used: i32 = list.iter().map(|b| b.total_used()).sum();
                    let total_available: i32 = list.iter().map(|b| b.total_available()).sum();
                    rsx! {
                        div { class: "stat-grid",
                            div { class: "stat-card",
                                span { class: "stat-value", "{total_allocated}" }
                                span { class: "stat-label", "Days allocated" }
                            }
                            div { class: "stat-card",
                                span { class: "stat-value", "{total_used}" }
                                span { class: "stat-label", "Days used" }
                            }
                            div { class: "stat-card",
                                span { class: "stat-value", "{total_available}" }
                                span { class: "stat-label", "Days available" }
                            }
                        }

                        table { class: "data-table",
                            thead {
                                tr {
                                    th { "Employee" }
                                    th { "Annual" }
                                    th { "Sick" }
                                    th { "Casual" }
                                    th { "Compensatory" }
                                    th { "Available" }
                                    th {}
                                }
                            }
                            tbody {
                                for balance in list {
                                    tr { key: "{balance.employee_id}",
                                        td { "{balance.employee_name}" }
                                        td { "{balance.annual_used}/{balance.annual_allocated}" }
                                        td { "{balance.sick_used}/{balance.sick_allocated}" }
                                        td { "{balance.casual_used}/{balance.casual_allocated}" }
                                        td { "{balance.compensatory_used}/{balance.compensatory_allocated}" }
                                        td { "{balance.total_available()}" }
                                        td { class: "row-actions",
                                            Button {
                                                variant: ButtonVariant::Secondary,
                                                onclick: {
                                                    let b = balance.clone();
                                                    move |_| editing.set(Some(b.clone()))
                                                },
                                                "Edit"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(balance) = editing() {
                AllocationForm {
                    balance,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        status.set(Some((StatusKind::Success, "Allocation updated".to_string())));
                        balances.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn AllocationForm(
    balance: LeaveBalanceInfo,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let mut annual = use_signal(|| balance.annual_allocated.to_string());
    let mut sick = use_signal(|| balance.sick_allocated.to_string());
    let mut casual = use_signal(|| balance.casual_allocated.to_string());
    let mut compensatory = use_signal(|| balance.compensatory_allocated.to_string());
    let mut error = use_signal(|| None::<String>);

    let employee_id = balance.employee_id.clone();
    let year = balance.year;

    let save = move |_| {
        let employee_id = employee_id.clone();
        async move {
            let parse = |label: &str, s: String| -> Result<i32, String> {
                s.parse::<i32>()
                    .ok()
                    .filter(|v| *v >= 0)
                    .ok_or_else(|| format!("{} must be a non-negative number of days", label))
            };
            let values = (|| {
                Ok::<_, String>((
                    parse("Annual", annual())?,
                    parse("Sick", sick())?,
                    parse("Casual", casual())?,
                    parse("Compensatory", compensatory())?,
                ))
            })();
            let (annual, sick, casual, compensatory) = match values {
                Ok(v) => v,
                Err(e) => {
                    error.set(Some(e));
                    return;
                }
            };

            match api::leaves::update_leave_balance(
                employee_id,
                year,
                annual,
                sick,
                casual,
                compensatory,
            )
            .await
            {
                Ok(_) => on_saved.call(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        }
    };

    rsx! {
        ModalOverlay { on_close: move |_| on_close.call(()),
            div { class: "modal-body",
                h2 { "Allocations for {balance.employee_name}, {balance.year}" }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }

                Label { text: "Annual days" }
                Input {
                    r#type: "number",
                    value: annual(),
                    oninput: move |evt: FormEvent| annual.set(evt.value()),
                }
                Label { text: "Sick days" }
                Input {
                    r#type: "number",
                    value: sick(),
                    oninput: move |evt: FormEvent| sick.set(evt.value()),
                }
                Label { text: "Casual days" }
                Input {
                    r#type: "number",
                    value: casual(),
                    oninput: move |evt: FormEvent| casual.set(evt.value()),
                }
                Label { text: "Compensatory days" }
                Input {
                    r#type: "number",
                    value: compensatory(),
                    oninput: move |evt: FormEvent| compensatory.set(evt.value()),
                }

                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button { onclick: save, "Save" }
                }
            }
        }
    }
}
