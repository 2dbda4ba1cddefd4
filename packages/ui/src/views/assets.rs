//! IT asset register: table with a create/edit dialog and delete confirm.

use api::models::{EmployeeInfo, ItAssetInfo};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label, Spinner, StatusKind, StatusMessage, Textarea};
use crate::views::ModalOverlay;

const ASSET_STATUSES: [&str; 3] = ["active", "in_repair", "retired"];

#[component]
pub fn AssetsView() -> Element {
    let mut editing = use_signal(|| None::<ItAssetInfo>);
    let mut show_form = use_signal(|| false);
    let mut confirm_delete = use_signal(|| None::<ItAssetInfo>);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let mut assets = use_resource(move || async move { api::it::list_assets().await });

    rsx! {
        div { class: "view assets",
            div { class: "view-header",
                h1 { "IT assets" }
                Button {
                    onclick: move |_| {
                        editing.set(None);
                        show_form.set(true);
                    },
                    "New asset"
                }
            }

            if let Some((kind, text)) = status() {
                StatusMessage { kind, text }
            }

            match assets() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(list)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Type" }
                                th { "Serial" }
                                th { "Status" }
                                th { "Value" }
                                th { "Assigned to" }
                                th { "Purchased" }
                                th {}
                            }
                        }
                        tbody {
                            for asset in list {
                                tr { key: "{asset.id}",
                                    td { "{asset.asset_type}" }
                                    td { "{asset.serial_number}" }
                                    td {
                                        span { class: "badge badge-{asset.status}", "{asset.status}" }
                                    }
                                    td { "{asset.value:.2}" }
                                    td { {asset.assigned_to_name.clone().unwrap_or_else(|| "Unassigned".to_string())} }
                                    td { {asset.purchase_date.clone().unwrap_or_default()} }
                                    td { class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            onclick: {
                                                let a = asset.clone();
                                                move |_| {
                                                    editing.set(Some(a.clone()));
                                                    show_form.set(true);
                                                }
                                            },
                                            "Edit"
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            onclick: {
                                                let a = asset.clone();
                                                move |_| confirm_delete.set(Some(a.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }

            if show_form() {
                AssetForm {
                    existing: editing(),
                    on_close: move |_| show_form.set(false),
                    on_saved: move |_| {
                        show_form.set(false);
                        assets.restart();
                    },
                }
            }

            if let Some(target) = confirm_delete() {
                ModalOverlay { on_close: move |_| confirm_delete.set(None),
                    div { class: "modal-body",
                        h2 { "Delete asset" }
                        p { "Remove {target.asset_type} {target.serial_number} from the register?" }
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
                                            match api::it::delete_asset(id).await {
                                                Ok(()) => {
                                                    confirm_delete.set(None);
                                                    assets.restart();
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
fn AssetForm(
    existing: Option<ItAssetInfo>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let mut asset_type = use_signal(|| existing.as_ref().map(|a| a.asset_type.clone()).unwrap_or_default());
    let mut serial = use_signal(|| existing.as_ref().map(|a| a.serial_number.clone()).unwrap_or_default());
    let mut asset_status = use_signal(|| {
        existing
            .as_ref()
            .map(|a| a.status.clone())
            .unwrap_or_else(|| "active".to_string())
    });
    let mut value = use_signal(|| {
        existing
            .as_ref()
            .map(|a| a.value.to_string())
            .unwrap_or_default()
    });
    let mut purchase_date = use_signal(|| {
        existing
            .as_ref()
            .and_then(|a| a.purchase_date.clone())
            .unwrap_or_default()
    });
    let mut assigned_to = use_signal(|| {
        existing
            .as_ref()
            .and_then(|a| a.assigned_to.clone())
            .unwrap_or_default()
    });
    let mut details = use_signal(|| {
        existing
            .as_ref()
            .and_then(|a| a.details.clone())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| None::<String>);
    let mut employees = use_signal(Vec::<EmployeeInfo>::new);

    let _ = use_resource(move || async move {
        if let Ok(list) = api::hr::list_employees().await {
            employees.set(list);
        }
    });

    let existing_id = existing.as_ref().map(|a| a.id.clone());
    let is_edit = existing_id.is_some();

    let save = move |_| {
        let existing_id = existing_id.clone();
        async move {
            let value: f64 = match value().parse() {
                Ok(v) if v >= 0.0 => v,
                _ => {
                    error.set(Some("Value must be a non-negative amount".to_string()));
                    return;
                }
            };
            let opt = |s: String| if s.trim().is_empty() { None } else { Some(s) };

            let result = match existing_id {
                Some(id) => api::it::update_asset(
                    id,
                    asset_type(),
                    serial(),
                    asset_status(),
                    value,
                    opt(purchase_date()),
                    opt(assigned_to()),
                    opt(details()),
                )
                .await
                .map(|_| ()),
                None => api::it::create_asset(
                    asset_type(),
                    serial(),
                    asset_status(),
                    value,
                    opt(purchase_date()),
                    opt(assigned_to()),
                    opt(details()),
                )
                .await
                .map(|_| ()),
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
                h2 { if is_edit { "Edit asset" } else { "New asset" } }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }

                Label { text: "Type" }
                Input {
                    placeholder: "e.g. laptop, monitor",
                    value: asset_type(),
                    oninput: move |evt: FormEvent| asset_type.set(evt.value()),
                }
                Label { text: "Serial number" }
                Input {
                    value: serial(),
                    oninput: move |evt: FormEvent| serial.set(evt.value()),
                }
                Label { text: "Status" }
                select {
                    class: "input",
                    value: "{asset_status}",
                    onchange: move |evt| asset_status.set(evt.value()),
                    for s in ASSET_STATUSES {
                        option { value: "{s}", "{s}" }
                    }
                }
                Label { text: "Value" }
                Input {
                    r#type: "number",
                    value: value(),
                    oninput: move |evt: FormEvent| value.set(evt.value()),
                }
                Label { text: "Purchase date" }
                Input {
                    r#type: "date",
                    value: purchase_date(),
                    oninput: move |evt: FormEvent| purchase_date.set(evt.value()),
                }
                Label { text: "Assigned to" }
                select {
                    class: "input",
                    value: "{assigned_to}",
                    onchange: move |evt| assigned_to.set(evt.value()),
                    option { value: "", "Unassigned" }
                    for employee in employees() {
                        option { value: "{employee.id}", "{employee.name}" }
                    }
                }
                Label { text: "Details" }
                Textarea {
                    rows: 3,
                    value: details(),
                    oninput: move |evt: FormEvent| details.set(evt.value()),
                }

                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button {
                        disabled: asset_type().trim().is_empty() || serial().trim().is_empty(),
                        onclick: save,
                        "Save"
                    }
                }
            }
        }
    }
}
