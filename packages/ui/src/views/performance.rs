//! Performance overview: KPI cards with progress toward target and the
//! review history table, both filterable by employee. Managers record new
//! reviews through a dialog; the signed-in manager becomes the reviewer.

use api::models::{EmployeeInfo, KpiInfo};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Label, Spinner, StatusKind, StatusMessage, Textarea};
use crate::views::ModalOverlay;

/// Five-slot star strip for a 1-5 rating. Out-of-range values clamp.
fn rating_stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    let mut stars = String::with_capacity(5 * 3);
    for i in 0..5 {
        stars.push(if i < filled { '★' } else { '☆' });
    }
    stars
}

/// Progress caption under a KPI bar, e.g. "42 / 60 deals (70%)".
fn kpi_caption(kpi: &KpiInfo) -> String {
    match kpi.unit.as_deref() {
        Some(unit) if !unit.is_empty() => format!(
            "{} / {} {} ({:.0}%)",
            kpi.current,
            kpi.target,
            unit,
            kpi.progress()
        ),
        _ => format!("{} / {} ({:.0}%)", kpi.current, kpi.target, kpi.progress()),
    }
}

#[component]
pub fn PerformanceView() -> Element {
    let mut employee_filter = use_signal(|| None::<String>);
    let mut show_review_form = use_signal(|| false);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let mut employees = use_signal(Vec::<EmployeeInfo>::new);
    let _ = use_resource(move || async move {
        match api::hr::list_employees().await {
            Ok(list) => employees.set(list),
            Err(e) => status.set(Some((StatusKind::Error, e.to_string()))),
        }
    });

    let mut reviews = use_resource(move || {
        let employee = employee_filter();
        async move { api::hr::list_performance_reviews(employee).await }
    });
    let kpis = use_resource(move || {
        let employee = employee_filter();
        async move { api::hr::list_kpis(employee).await }
    });

    rsx! {
        div { class: "view performance",
            h1 { "Performance" }

            div { class: "filter-bar",
                select {
                    class: "input",
                    onchange: move |evt| {
                        let v = evt.value();
                        employee_filter.set(if v.is_empty() { None } else { Some(v) });
                    },
                    option { value: "", "All employees" }
                    for employee in employees() {
                        option { value: "{employee.id}", "{employee.name}" }
                    }
                }
                Button { onclick: move |_| show_review_form.set(true), "New review" }
            }

            if let Some((kind, text)) = status() {
                StatusMessage { kind, text }
            }

            h2 { "KPIs" }
            match kpis() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "empty", "No KPIs recorded." }
                },
                Some(Ok(list)) => rsx! {
                    div { class: "kpi-grid",
                        for kpi in list {
                            div { class: "kpi-card", key: "{kpi.id}",
                                div { class: "kpi-card-head",
                                    span { class: "kpi-title", "{kpi.title}" }
                                    span { class: "kpi-period", "{kpi.period}" }
                                }
                                span { class: "kpi-employee", "{kpi.employee_name}" }
                                div { class: "progress-track",
                                    div {
                                        class: "progress-fill",
                                        style: "width: {kpi.progress():.0}%",
                                    }
                                }
                                span { class: "kpi-caption", {kpi_caption(&kpi)} }
                            }
                        }
                    }
                },
            }

            h2 { "Reviews" }
            match reviews() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "empty", "No reviews yet." }
                },
                Some(Ok(list)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Employee" }
                                th { "Rating" }
                                th { "Feedback" }
                                th { "Reviewer" }
                                th { "Date" }
                            }
                        }
                        tbody {
                            for review in list {
                                tr { key: "{review.id}",
                                    td { "{review.employee_name}" }
                                    td { class: "rating", {rating_stars(review.rating)} }
                                    td { "{review.feedback}" }
                                    td { "{review.reviewer_name}" }
                                    td { "{review.review_date}" }
                                }
                            }
                        }
                    }
                },
            }

            if show_review_form() {
                ReviewForm {
                    employees: employees(),
                    on_close: move |_| show_review_form.set(false),
                    on_saved: move |_| {
                        show_review_form.set(false);
                        status.set(Some((StatusKind::Success, "Review recorded".to_string())));
                        reviews.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn ReviewForm(
    employees: Vec<EmployeeInfo>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let mut employee_id = use_signal(String::new);
    let mut rating = use_signal(|| 3i32);
    let mut feedback = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let save = move |_| async move {
        if employee_id().is_empty() {
            error.set(Some("Pick an employee".to_string()));
            return;
        }
        match api::hr::create_performance_review(employee_id(), rating(), feedback()).await {
            Ok(_) => on_saved.call(()),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        ModalOverlay { on_close: move |_| on_close.call(()),
            div { class: "modal-body",
                h2 { "New review" }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }

                Label { text: "Employee" }
                select {
                    class: "input",
                    onchange: move |evt| employee_id.set(evt.value()),
                    option { value: "", "Select an employee…" }
                    for employee in employees {
                        option { value: "{employee.id}", "{employee.name}" }
                    }
                }

                Label { text: "Rating" }
                select {
                    class: "input",
                    value: "{rating}",
                    onchange: move |evt| {
                        if let Ok(r) = evt.value().parse() {
                            rating.set(r);
                        }
                    },
                    for r in 1..=5 {
                        option { value: "{r}", {rating_stars(r)} }
                    }
                }

                Label { text: "Feedback" }
                Textarea {
                    rows: 6,
                    placeholder: "Strengths, growth areas, goals for the next period",
                    value: feedback(),
                    oninput: move |evt: FormEvent| feedback.set(evt.value()),
                }

                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button { onclick: save, "Save" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpi(current: f64, target: f64, unit: Option<&str>) -> KpiInfo {
        KpiInfo {
            id: "k1".to_string(),
            employee_id: "e1".to_string(),
            employee_name: "Ada".to_string(),
            title: "Closed deals".to_string(),
            category: None,
            target,
            current,
            unit: unit.map(str::to_string),
            period: "2026-Q3".to_string(),
        }
    }

    #[test]
    fn test_rating_stars_fill_and_clamp() {
        assert_eq!(rating_stars(3), "★★★☆☆");
        assert_eq!(rating_stars(0), "☆☆☆☆☆");
        assert_eq!(rating_stars(9), "★★★★★");
        assert_eq!(rating_stars(-2), "☆☆☆☆☆");
    }

    #[test]
    fn test_kpi_caption_includes_unit_when_present() {
        assert_eq!(kpi_caption(&kpi(42.0, 60.0, Some("deals"))), "42 / 60 deals (70%)");
        assert_eq!(kpi_caption(&kpi(42.0, 60.0, None)), "42 / 60 (70%)");
        // Over-target reads as complete, never past the bar.
        assert_eq!(kpi_caption(&kpi(80.0, 60.0, None)), "80 / 60 (100%)");
    }
}
