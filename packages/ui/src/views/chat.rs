//! Team chat: room sidebar plus a polled message window.
//!
//! Message delivery is pull-only. Selecting a room starts a polling loop
//! through a [`PollHandle`]; selecting another room (or leaving the view)
//! cancels it. A fetched list only replaces the held one when it structurally
//! differs, so an unchanged payload causes no re-render. Poll errors are
//! logged and the next tick simply retries.

use api::models::{ChatContactInfo, ChatMessageInfo, ChatRoomInfo};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Spinner};
use crate::poll::{sleep_secs, use_poll_handle};
use crate::use_auth;
use crate::views::ModalOverlay;

/// Replace the held message list only when the payload differs.
fn should_replace(current: &[ChatMessageInfo], fetched: &[ChatMessageInfo]) -> bool {
    current != fetched
}

#[component]
pub fn ChatView(#[props(default = 3)] poll_interval_secs: u32) -> Element {
    let auth = use_auth();
    let mut rooms = use_signal(Vec::<ChatRoomInfo>::new);
    let mut selected = use_signal(|| None::<ChatRoomInfo>);
    let mut messages = use_signal(Vec::<ChatMessageInfo>::new);
    let mut room_search = use_signal(String::new);
    let mut show_create = use_signal(|| false);
    let mut poll = use_poll_handle();

    let my_id = auth()
        .user
        .map(|u| u.id)
        .unwrap_or_default();

    let rooms_loading = use_resource(move || async move {
        match api::chat::list_rooms().await {
            Ok(list) => rooms.set(list),
            Err(e) => tracing::error!("Failed to load rooms: {}", e),
        }
    });

    // Cancel the active poll when the view unmounts.
    use_drop(move || {
        poll.cancel();
    });

    let mut select_room = move |room: ChatRoomInfo| {
        let room_id = room.id.clone();
        selected.set(Some(room));
        messages.set(Vec::new());

        let token = poll.start();
        let interval = poll_interval_secs;
        spawn(async move {
            loop {
                if !poll.is_live(token) {
                    break;
                }
                match api::chat::list_messages(room_id.clone()).await {
                    Ok(fetched) => {
                        if !poll.is_live(token) {
                            break;
                        }
                        if should_replace(&messages(), &fetched) {
                            messages.set(fetched);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("message poll failed: {}", e);
                    }
                }
                // interval 0 means a single fetch with no polling
                if interval == 0 {
                    break;
                }
                sleep_secs(interval).await;
            }
        });
    };

    let filter = room_search().to_lowercase();
    let visible_rooms: Vec<ChatRoomInfo> = rooms()
        .into_iter()
        .filter(|r| filter.is_empty() || r.title(&my_id).to_lowercase().contains(&filter))
        .collect();

    rsx! {
        div { class: "view chat",
            div { class: "chat-sidebar",
                div { class: "chat-sidebar-header",
                    Input {
                        placeholder: "Search conversations",
                        value: room_search(),
                        oninput: move |evt: FormEvent| room_search.set(evt.value()),
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| show_create.set(true),
                        "New"
                    }
                }
                if rooms_loading().is_none() {
                    Spinner {}
                }
                ul { class: "chat-room-list",
                    for room in visible_rooms {
                        li {
                            key: "{room.id}",
                            class: if selected().as_ref().map(|s| s.id.clone()) == Some(room.id.clone()) { "chat-room active" } else { "chat-room" },
                            onclick: {
                                let room = room.clone();
                                move |_| select_room(room.clone())
                            },
                            span { class: "chat-room-title", "{room.title(&my_id)}" }
                            if room.is_group {
                                span { class: "badge", "group" }
                            }
                        }
                    }
                }
            }

            div { class: "chat-main",
                match selected() {
                    Some(room) => rsx! {
                        MessageWindow { room, messages, my_id: my_id.clone() }
                    },
                    None => rsx! {
                        div { class: "chat-empty", "Select a conversation" }
                    },
                }
            }

            if show_create() {
                CreateRoomModal {
                    on_close: move |_| show_create.set(false),
                    on_created: move |room: ChatRoomInfo| {
                        rooms.with_mut(|r| r.insert(0, room.clone()));
                        show_create.set(false);
                        select_room(room);
                    },
                }
            }
        }
    }
}

#[component]
fn MessageWindow(
    room: ChatRoomInfo,
    messages: Signal<Vec<ChatMessageInfo>>,
    my_id: String,
) -> Element {
    let mut input = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let room_id = room.id.clone();

    let send = move |_| {
        let room_id = room_id.clone();
        async move {
            let body = input().trim().to_string();
            if body.is_empty() || sending() {
                return;
            }
            sending.set(true);
            match api::chat::send_message(room_id.clone(), body).await {
                Ok(_) => {
                    input.set(String::new());
                    // Refetch right away instead of waiting for the next tick.
                    if let Ok(fetched) = api::chat::list_messages(room_id).await {
                        if should_replace(&messages(), &fetched) {
                            messages.set(fetched);
                        }
                    }
                }
                Err(e) => tracing::error!("Failed to send message: {}", e),
            }
            sending.set(false);
        }
    };

    rsx! {
        div { class: "chat-window",
            div { class: "chat-window-header", "{room.title(&my_id)}" }
            div { class: "chat-messages",
                for message in messages() {
                    div {
                        key: "{message.id}",
                        class: if message.sender_id == my_id { "chat-message mine" } else { "chat-message" },
                        span { class: "chat-sender", "{message.sender_name}" }
                        p { "{message.body}" }
                    }
                }
            }
            div { class: "chat-input-row",
                Input {
                    placeholder: "Write a message…",
                    value: input(),
                    oninput: move |evt: FormEvent| input.set(evt.value()),
                }
                Button {
                    disabled: sending(),
                    onclick: send,
                    "Send"
                }
            }
        }
    }
}

#[component]
fn CreateRoomModal(
    on_close: EventHandler<()>,
    on_created: EventHandler<ChatRoomInfo>,
) -> Element {
    let mut contacts = use_signal(Vec::<ChatContactInfo>::new);
    let mut chosen = use_signal(Vec::<String>::new);
    let mut group_name = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let _ = use_resource(move || async move {
        match api::chat::list_chat_contacts().await {
            Ok(list) => contacts.set(list),
            Err(e) => error.set(Some(e.to_string())),
        }
    });

    let create = move |_| async move {
        let ids = chosen();
        if ids.is_empty() {
            error.set(Some("Select at least one participant".to_string()));
            return;
        }
        let is_group = ids.len() > 1;
        let name = if is_group { Some(group_name()) } else { None };
        match api::chat::create_room(ids, name, is_group).await {
            Ok(room) => on_created.call(room),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        ModalOverlay { on_close: move |_| on_close.call(()),
            div { class: "modal-body",
                h2 { "New conversation" }
                if let Some(e) = error() {
                    p { class: "status status-error", "{e}" }
                }
                ul { class: "contact-list",
                    for contact in contacts() {
                        li { key: "{contact.id}",
                            label {
                                input {
                                    r#type: "checkbox",
                                    checked: chosen().contains(&contact.id),
                                    onchange: {
                                        let id = contact.id.clone();
                                        move |evt: FormEvent| {
                                            chosen.with_mut(|c| {
                                                if evt.checked() {
                                                    if !c.contains(&id) {
                                                        c.push(id.clone());
                                                    }
                                                } else {
                                                    c.retain(|x| x != &id);
                                                }
                                            });
                                        }
                                    },
                                }
                                "{contact.name} ({contact.role})"
                            }
                        }
                    }
                }
                if chosen().len() > 1 {
                    Input {
                        placeholder: "Group name",
                        value: group_name(),
                        oninput: move |evt: FormEvent| group_name.set(evt.value()),
                    }
                }
                div { class: "modal-actions",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button { onclick: create, "Create" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, body: &str) -> ChatMessageInfo {
        ChatMessageInfo {
            id: id.to_string(),
            room_id: "r".to_string(),
            sender_id: "s".to_string(),
            sender_name: "S".to_string(),
            body: body.to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_identical_payload_is_not_replaced() {
        let held = vec![message("1", "hi"), message("2", "yo")];
        let fetched = held.clone();
        assert!(!should_replace(&held, &fetched));
    }

    #[test]
    fn test_new_message_triggers_replace() {
        let held = vec![message("1", "hi")];
        let fetched = vec![message("1", "hi"), message("2", "yo")];
        assert!(should_replace(&held, &fetched));
    }

    #[test]
    fn test_edited_body_triggers_replace() {
        let held = vec![message("1", "hi")];
        let fetched = vec![message("1", "hi!")];
        assert!(should_replace(&held, &fetched));
    }
}
