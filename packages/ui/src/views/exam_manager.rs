//! Recruitment exam manager: job postings on the left, and an editor dialog
//! for each posting's screening exam. Questions are multiple choice with one
//! correct option; the pass mark is a question count.

use api::models::{ExamQuestion, JobPostingInfo};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label, Spinner, StatusKind, StatusMessage, Textarea};
use crate::views::ModalOverlay;

#[component]
pub fn ExamManagerView() -> Element {
    let mut editing = use_signal(|| None::<JobPostingInfo>);
    let mut status = use_signal(|| None::<(StatusKind, String)>);

    let mut jobs = use_resource(move || async move { api::recruitment::list_job_postings().await });

    rsx! {
        div { class: "view exam-manager",
            h1 { "Screening exams" }

            if let Some((kind, text)) = status() {
                StatusMessage { kind, text }
            }

            match jobs() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! {
                    StatusMessage { kind: StatusKind::Error, text: e.to_string() }
                },
                Some(Ok(list)) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Posting" }
                                th { "Department" }
                                th { "Status" }
                                th { "Exam" }
                                th {}
                            }
                        }
                        tbody {
                            for job in list {
                                tr { key: "{job.id}",
                                    td { "{job.title}" }
                                    td { {job.department.clone().unwrap_or_default()} }
                                    td {
                                        span { class: "badge badge-{job.status}", "{job.status}" }
                                    }
                                    td {
                                        if job.has_exam { "Configured" } else { "None" }
                                    }
                                    td { class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            onclick: {
                                                let j = job.clone();
                                                move |_| editing.set(Some(j.clone()))
                                            },
                                            if job.has_exam { "Edit exam" } else { "Create exam" }
                                        }
                                        if job.has_exam {
                                            Button {
                                                variant: ButtonVariant::Ghost,
                                                onclick: {
                                                    let id = job.id.clone();
                                                    move |_| {
                                                        let id = id.clone();
                                                        async move {
                                                            match api::recruitment::delete_job_exam(id).await {
                                                                Ok(()) => jobs.restart(),
                                                                Err(e) => status.set(Some((
                                                                    StatusKind::Error,
                                                                    e.to_string(),
                                                                ))),
                                                            }
                                                        }
                                                    }
                                                },
                                                "Remove"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }

            if let Some(job) = editing() {
                ExamEditor {
                    job,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        status.set(Some((StatusKind::Success, "Exam saved".to_string())));
                        jobs.restart();
                    },
                }
            }
        }
    }
}

fn blank_question() -> ExamQuestion {
    ExamQuestion {
        prompt: String::new(),
        options: vec![String::new(), String::new()],
        correct_index: 0,
    }
}

#[component]
fn ExamEditor(
    job: JobPostingInfo,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let mut questions = use_signal(|| vec![blank_question()]);
    let mut pass_mark = use_signal(|| "1".to_string());
    let mut duration = use_signal(|| "30".to_string());
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);

    let job_id = job.id.clone();
    let _ = use_resource({
        let job_id = job_id.clone();
        move || {
            let job_id = job_id.clone();
            async move {
                match api::recruitment::get_job_exam(job_id).await {
                    Ok(Some(exam)) => {
                        questions.set(exam.questions);
                        pass_mark.set(exam.pass_mark.to_string());
                        duration.set(exam.duration_minutes.to_string());
                    }
                    Ok(None) => {}
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            }
        }
    });

    let save = move |_| {
        let job_id = job_id.clone();
        async move {
            let pass_mark: i32 = match pass_mark().parse() {
                Ok(v) if v > 0 => v,
                _ => {
                    error.set(Some("Pass mark must be a positive question count".to_string()));
                    return;
                }
            };
            let duration: i32 = match duration().parse() {
                Ok(v) if v > 0 => v,
                _ => {
                    error.set(Some("Duration must be a positive number of minutes".to_string()));
                    return;
                }
            };
            match api::recruitment::save_job_exam(job_id, questions(), pass_mark, duration).await {
                Ok(_) => on_saved.call(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        }
    };

    let question_count = questions().len();

    rsx! {
        ModalOverlay { on_close: move |_| on_close.call(()),
            div { class: "modal-body modal-wide",
                h2 { "Exam for {job.title}" }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }
                if loading() {
                    Spinner {}
                }

                for (qi, question) in questions().into_iter().enumerate() {
                    div { class: "exam-question", key: "{qi}",
                        div { class: "exam-question-header",
                            Label { text: "Question {qi + 1}" }
                            Button {
                                variant: ButtonVariant::Ghost,
                                disabled: question_count <= 1,
                                title: "Remove question",
                                onclick: move |_| {
                                    questions.with_mut(|qs| {
                                        if qs.len() > 1 {
                                            qs.remove(qi);
                                        }
                                    });
                                },
                                "✕"
                            }
                        }
                        Textarea {
                            rows: 2,
                            placeholder: "Prompt",
                            value: question.prompt.clone(),
                            oninput: move |evt: FormEvent| {
                                questions.with_mut(|qs| qs[qi].prompt = evt.value());
                            },
                        }
                        for (oi, option) in question.options.iter().enumerate() {
                            div { class: "exam-option", key: "{oi}",
                                input {
                                    r#type: "radio",
                                    name: "correct-{qi}",
                                    checked: question.correct_index == oi,
                                    onchange: move |_| {
                                        questions.with_mut(|qs| qs[qi].correct_index = oi);
                                    },
                                }
                                Input {
                                    placeholder: "Option {oi + 1}",
                                    value: option.clone(),
                                    oninput: move |evt: FormEvent| {
                                        questions.with_mut(|qs| qs[qi].options[oi] = evt.value());
                                    },
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    disabled: question.options.len() <= 2,
                                    title: "Remove option",
                                    onclick: move |_| {
                                        questions.with_mut(|qs| {
                                            let q = &mut qs[qi];
                                            if q.options.len() > 2 {
                                                q.options.remove(oi);
                                                if q.correct_index >= q.options.len() {
                                                    q.correct_index = q.options.len() - 1;
                                                }
                                            }
                                        });
                                    },
                                    "✕"
                                }
                            }
                        }
                        Button {
                            variant: ButtonVariant::Secondary,
                            onclick: move |_| {
                                questions.with_mut(|qs| qs[qi].options.push(String::new()));
                            },
                            "Add option"
                        }
                    }
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| questions.with_mut(|qs| qs.push(blank_question())),
                    "Add question"
                }

                div { class: "exam-settings",
                    Label { text: "Pass mark (correct answers required)" }
                    Input {
                        r#type: "number",
                        value: pass_mark(),
                        oninput: move |evt: FormEvent| pass_mark.set(evt.value()),
                    }
                    Label { text: "Duration (minutes)" }
                    Input {
                        r#type: "number",
                        value: duration(),
                        oninput: move |evt: FormEvent| duration.set(evt.value()),
                    }
                }

                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button { onclick: save, "Save exam" }
                }
            }
        }
    }
}
