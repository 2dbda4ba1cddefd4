//! Small shared building blocks used across the dashboard views.

use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
    Danger,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-secondary",
            ButtonVariant::Ghost => "btn btn-ghost",
            ButtonVariant::Danger => "btn btn-danger",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = "".to_string())] class: String,
    #[props(default = false)] disabled: bool,
    #[props(default = "".to_string())] title: String,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "{variant.class()} {class}",
            disabled,
            title: "{title}",
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}

#[component]
pub fn Input(
    #[props(default = "text".to_string())] r#type: String,
    #[props(default = "".to_string())] class: String,
    #[props(default = "".to_string())] placeholder: String,
    value: String,
    #[props(default)] oninput: EventHandler<FormEvent>,
    #[props(default)] onchange: EventHandler<FormEvent>,
    #[props(default)] onblur: EventHandler<FocusEvent>,
) -> Element {
    rsx! {
        input {
            class: "input {class}",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
            onchange: move |evt| onchange.call(evt),
            onblur: move |evt| onblur.call(evt),
        }
    }
}

#[component]
pub fn Textarea(
    #[props(default = "".to_string())] class: String,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default = 4)] rows: i64,
    value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        textarea {
            class: "input {class}",
            placeholder: "{placeholder}",
            rows,
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Label(text: String) -> Element {
    rsx! {
        label { class: "label", "{text}" }
    }
}

#[component]
pub fn Badge(#[props(default = "".to_string())] class: String, text: String) -> Element {
    rsx! {
        span { class: "badge {class}", "{text}" }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum StatusKind {
    Error,
    Success,
}

/// Inline banner for operation outcomes. Views keep one `Signal<Option<...>>`
/// and render this when it is set.
#[component]
pub fn StatusMessage(kind: StatusKind, text: String) -> Element {
    let class = match kind {
        StatusKind::Error => "status status-error",
        StatusKind::Success => "status status-success",
    };
    rsx! {
        div { class: "{class}", role: "status", "{text}" }
    }
}

#[component]
pub fn Spinner() -> Element {
    rsx! {
        div { class: "spinner", aria_label: "Loading" }
    }
}
