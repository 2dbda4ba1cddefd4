//! Invoice list plus a two-step create dialog: pick a customer, then enter
//! line items. Totals shown in the dialog come from the same arithmetic the
//! server persists with.

use api::models::{compute_totals, CustomerInfo, InvoiceInfo, LineItem};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label, Spinner, StatusKind, StatusMessage};
use crate::poll::sleep_ms;
use crate::views::ModalOverlay;

const PAGE_SIZE: u32 = 25;
const INVOICE_STATUSES: [&str; 4] = ["draft", "sent", "paid", "void"];

#[component]
pub fn InvoicesView() -> Element {
    let mut page = use_signal(|| 1u32);
    let mut status_filter = use_signal(|| None::<String>);
    let mut search = use_signal(String::new);
    let mut show_create = use_signal(|| false);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let mut invoices = use_resource(move || {
        let p = page();
        let f = status_filter();
        let term = search().trim().to_string();
        async move {
            let term = if term.is_empty() { None } else { Some(term) };
            api::invoices::list_invoices(p, PAGE_SIZE, f, term).await
        }
    });

    rsx! {
        div { class: "view invoices",
            div { class: "view-header",
                h1 { "Invoices" }
                Button { onclick: move |_| show_create.set(true), "New invoice" }
            }

            div { class: "filter-bar",
                select {
                    class: "input",
                    onchange: move |evt| {
                        let v = evt.value();
                        status_filter.set(if v.is_empty() { None } else { Some(v) });
                        page.set(1);
                    },
                    option { value: "", "All statuses" }
                    for s in INVOICE_STATUSES {
                        option { value: "{s}", "{s}" }
                    }
                }
                Input {
                    placeholder: "Search number or customer",
                    value: search(),
                    onchange: move |evt: FormEvent| {
                        search.set(evt.value());
                        page.set(1);
                    },
                }
            }

            if let Some((kind, text)) = status() {
                StatusMessage { kind, text }
            }

            match invoices() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(listing)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Number" }
                                th { "Customer" }
                                th { "Subtotal" }
                                th { "Tax" }
                                th { "Total" }
                                th { "Status" }
                                th { "Due" }
                            }
                        }
                        tbody {
                            for invoice in listing.data.clone() {
                                tr { key: "{invoice.id}",
                                    td { "{invoice.number}" }
                                    td { "{invoice.customer_name}" }
                                    td { "{invoice.subtotal:.2}" }
                                    td { "{invoice.tax:.2}" }
                                    td { "{invoice.total:.2}" }
                                    td {
                                        span { class: "badge badge-{invoice.status}", "{invoice.status}" }
                                    }
                                    td { {invoice.due_date.clone().unwrap_or_default()} }
                                }
                            }
                        }
                    }
                    div { class: "pagination",
                        Button {
                            variant: ButtonVariant::Secondary,
                            disabled: page() <= 1,
                            onclick: move |_| page.set(page() - 1),
                            "Previous"
                        }
                        span { "Page {listing.page} of {listing.total_pages.max(1)}" }
                        Button {
                            variant: ButtonVariant::Secondary,
                            disabled: page() >= listing.total_pages,
                            onclick: move |_| page.set(page() + 1),
                            "Next"
                        }
                    }
                },
            }

            if show_create() {
                CreateInvoiceDialog {
                    on_close: move |_| show_create.set(false),
                    on_created: move |invoice: InvoiceInfo| {
                        show_create.set(false);
                        status.set(Some((
                            StatusKind::Success,
                            format!("Created invoice {}", invoice.number),
                        )));
                        invoices.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn CreateInvoiceDialog(
    on_close: EventHandler<()>,
    on_created: EventHandler<InvoiceInfo>,
) -> Element {
    let mut customer = use_signal(|| None::<CustomerInfo>);

    rsx! {
        ModalOverlay { on_close: move |_| on_close.call(()),
            div { class: "modal-body",
                match customer() {
                    None => rsx! {
                        CustomerPicker { on_pick: move |c| customer.set(Some(c)) }
                    },
                    Some(picked) => rsx! {
                        LineItemsStep {
                            customer: picked,
                            on_back: move |_| customer.set(None),
                            on_created,
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn CustomerPicker(on_pick: EventHandler<CustomerInfo>) -> Element {
    let mut query = use_signal(String::new);
    let mut debounce_seq = use_signal(|| 0u64);
    let mut results = use_signal(Vec::<CustomerInfo>::new);
    let mut error = use_signal(|| None::<String>);

    let on_search = move |evt: FormEvent| {
        query.set(evt.value());
        let seq = debounce_seq() + 1;
        debounce_seq.set(seq);
        spawn(async move {
            sleep_ms(300).await;
            if debounce_seq() != seq {
                return;
            }
            let term = query().trim().to_string();
            let term = if term.is_empty() { None } else { Some(term) };
            match api::customers::list_customers(1, 10, term, None, None, None).await {
                Ok(listing) => results.set(listing.data),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        h2 { "New invoice" }
        Label { text: "Customer" }
        Input {
            placeholder: "Search by name, email, or organization",
            value: query(),
            oninput: on_search,
        }
        if let Some(e) = error() {
            p { class: "status status-error", "{e}" }
        }
        ul { class: "picker-list",
            for candidate in results() {
                li {
                    key: "{candidate.id}",
                    onclick: {
                        let c = candidate.clone();
                        move |_| on_pick.call(c.clone())
                    },
                    span { "{candidate.name}" }
                    span { class: "picker-meta", "{candidate.email}" }
                }
            }
        }
    }
}

#[component]
fn LineItemsStep(
    customer: CustomerInfo,
    on_back: EventHandler<()>,
    on_created: EventHandler<InvoiceInfo>,
) -> Element {
    let mut items = use_signal(|| vec![LineItem::default()]);
    let mut tax_rate = use_signal(|| "0".to_string());
    let mut due_date = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut creating = use_signal(|| false);

    let customer_id = customer.id.clone();

    let create = move |_| {
        let customer_id = customer_id.clone();
        async move {
            if creating() {
                return;
            }
            let tax: f64 = match tax_rate().parse() {
                Ok(v) if (0.0..=100.0).contains(&v) => v,
                _ => {
                    error.set(Some("Tax rate must be between 0 and 100".to_string()));
                    return;
                }
            };
            creating.set(true);
            let due = due_date();
            let due = if due.trim().is_empty() { None } else { Some(due) };
            match api::invoices::create_invoice(customer_id, items(), tax, due).await {
                Ok(invoice) => on_created.call(invoice),
                Err(e) => error.set(Some(e.to_string())),
            }
            creating.set(false);
        }
    };

    let tax: f64 = tax_rate().parse().unwrap_or(0.0);
    let totals = compute_totals(&items(), tax);
    let item_count = items().len();

    rsx! {
        h2 { "Invoice for {customer.name}" }
        if let Some(e) = error() {
            p { class: "status status-error", "{e}" }
        }

        div { class: "line-items",
            for (i, item) in items().into_iter().enumerate() {
                div { class: "line-item-row", key: "{i}",
                    Input {
                        placeholder: "Description",
                        value: item.description.clone(),
                        oninput: move |evt: FormEvent| {
                            items.with_mut(|list| list[i].description = evt.value());
                        },
                    }
                    Input {
                        r#type: "number",
                        class: "input-qty",
                        value: item.quantity.to_string(),
                        oninput: move |evt: FormEvent| {
                            if let Ok(q) = evt.value().parse() {
                                items.with_mut(|list| list[i].quantity = q);
                            }
                        },
                    }
                    Input {
                        r#type: "number",
                        class: "input-price",
                        value: item.unit_price.to_string(),
                        oninput: move |evt: FormEvent| {
                            if let Ok(p) = evt.value().parse() {
                                items.with_mut(|list| list[i].unit_price = p);
                            }
                        },
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        disabled: item_count <= 1,
                        title: "Remove line",
                        onclick: move |_| {
                            items.with_mut(|list| {
                                if list.len() > 1 {
                                    list.remove(i);
                                }
                            });
                        },
                        "✕"
                    }
                }
            }
            Button {
                variant: ButtonVariant::Secondary,
                onclick: move |_| items.with_mut(|list| list.push(LineItem::default())),
                "Add line"
            }
        }

        div { class: "invoice-meta",
            Label { text: "Tax rate (%)" }
            Input {
                r#type: "number",
                value: tax_rate(),
                oninput: move |evt: FormEvent| tax_rate.set(evt.value()),
            }
            Label { text: "Due date" }
            Input {
                r#type: "date",
                value: due_date(),
                oninput: move |evt: FormEvent| due_date.set(evt.value()),
            }
        }

        dl { class: "invoice-totals",
            dt { "Subtotal" }
            dd { "{totals.subtotal:.2}" }
            dt { "Tax" }
            dd { "{totals.tax:.2}" }
            dt { "Total" }
            dd { "{totals.total:.2}" }
        }

        div { class: "modal-actions",
            Button { variant: ButtonVariant::Secondary, onclick: move |_| on_back.call(()), "Back" }
            Button {
                disabled: creating() || items().iter().any(|i| i.description.trim().is_empty()),
                onclick: create,
                if creating() { "Creating…" } else { "Create invoice" }
            }
        }
    }
}
