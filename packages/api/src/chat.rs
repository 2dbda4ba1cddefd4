//! Chat server functions: rooms, messages, and the contact list.
//!
//! There is no push channel; clients poll [`list_messages`] and replace their
//! held list only when the payload actually differs.

use dioxus::prelude::*;

use crate::models::{ChatContactInfo, ChatMessageInfo, ChatRoomInfo};

#[cfg(feature = "server")]
async fn room_participants(
    pool: &sqlx::PgPool,
    room_id: uuid::Uuid,
) -> Result<Vec<ChatContactInfo>, ServerFnError> {
    let rows: Vec<(uuid::Uuid, Option<String>, String, String)> = sqlx::query_as(
        "SELECT u.id, u.name, u.email, u.role
         FROM chat_room_participants p JOIN users u ON u.id = p.user_id
         WHERE p.room_id = $1 ORDER BY u.name",
    )
    .bind(room_id)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|(id, name, email, role)| ChatContactInfo {
            id: id.to_string(),
            name: name.unwrap_or(email),
            role,
        })
        .collect())
}

/// List the rooms the signed-in user participates in, most recent first.
#[cfg(feature = "server")]
#[get("/api/chat/rooms", session: tower_sessions::Session)]
pub async fn list_rooms() -> Result<Vec<ChatRoomInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ChatRoom;

    let user = crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let rooms: Vec<ChatRoom> = sqlx::query_as(
        "SELECT r.* FROM chat_rooms r
         JOIN chat_room_participants p ON p.room_id = r.id
         WHERE p.user_id = $1 ORDER BY r.created_at DESC",
    )
    .bind(user.id)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut out = Vec::with_capacity(rooms.len());
    for room in rooms {
        let participants = room_participants(pool, room.id).await?;
        out.push(room.to_info(participants));
    }

    Ok(out)
}

#[cfg(not(feature = "server"))]
#[get("/api/chat/rooms")]
pub async fn list_rooms() -> Result<Vec<ChatRoomInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a room with the given participants. The creator is always included.
#[cfg(feature = "server")]
#[post("/api/chat/rooms", session: tower_sessions::Session)]
pub async fn create_room(
    participant_ids: Vec<String>,
    name: Option<String>,
    is_group: bool,
) -> Result<ChatRoomInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ChatRoom;

    let user = crate::auth::require_user(&session).await?;

    if participant_ids.is_empty() {
        return Err(ServerFnError::new("Select at least one participant"));
    }
    if is_group && name.as_deref().unwrap_or("").trim().is_empty() {
        return Err(ServerFnError::new("Group rooms need a name"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut member_ids = vec![user.id];
    for id in &participant_ids {
        let uuid = uuid::Uuid::parse_str(id)
            .map_err(|e| ServerFnError::new(e.to_string()))?;
        if !member_ids.contains(&uuid) {
            member_ids.push(uuid);
        }
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let room: ChatRoom = sqlx::query_as(
        "INSERT INTO chat_rooms (name, is_group, created_by) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(name.as_deref().filter(|n| !n.trim().is_empty()))
    .bind(is_group)
    .bind(user.id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    for member in &member_ids {
        sqlx::query("INSERT INTO chat_room_participants (room_id, user_id) VALUES ($1, $2)")
            .bind(room.id)
            .bind(member)
            .execute(&mut *tx)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
    }

    tx.commit()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let participants = room_participants(pool, room.id).await?;
    Ok(room.to_info(participants))
}

#[cfg(not(feature = "server"))]
#[post("/api/chat/rooms")]
pub async fn create_room(
    participant_ids: Vec<String>,
    name: Option<String>,
    is_group: bool,
) -> Result<ChatRoomInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List a room's messages, oldest first. The caller must be a participant.
#[cfg(feature = "server")]
#[get("/api/chat/messages", session: tower_sessions::Session)]
pub async fn list_messages(room_id: String) -> Result<Vec<ChatMessageInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let room_uuid = uuid::Uuid::parse_str(&room_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let member: Option<(uuid::Uuid,)> = sqlx::query_as(
        "SELECT user_id FROM chat_room_participants WHERE room_id = $1 AND user_id = $2",
    )
    .bind(room_uuid)
    .bind(user.id)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if member.is_none() {
        return Err(ServerFnError::new("Not a participant of this room"));
    }

    let rows: Vec<(uuid::Uuid, uuid::Uuid, uuid::Uuid, String, chrono::DateTime<chrono::Utc>, Option<String>, String)> =
        sqlx::query_as(
            "SELECT m.id, m.room_id, m.sender_id, m.body, m.created_at, u.name, u.email
             FROM chat_messages m JOIN users u ON u.id = m.sender_id
             WHERE m.room_id = $1 ORDER BY m.created_at ASC",
        )
        .bind(room_uuid)
        .fetch_all(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|(id, room_id, sender_id, body, created_at, name, email)| ChatMessageInfo {
            id: id.to_string(),
            room_id: room_id.to_string(),
            sender_id: sender_id.to_string(),
            sender_name: name.unwrap_or(email),
            body,
            created_at: created_at.to_rfc3339(),
        })
        .collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/chat/messages")]
pub async fn list_messages(room_id: String) -> Result<Vec<ChatMessageInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Send a message to a room the signed-in user participates in.
#[cfg(feature = "server")]
#[post("/api/chat/messages", session: tower_sessions::Session)]
pub async fn send_message(room_id: String, body: String) -> Result<ChatMessageInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ChatMessage;

    let user = crate::auth::require_user(&session).await?;

    let body = body.trim().to_string();
    if body.is_empty() {
        return Err(ServerFnError::new("Message is empty"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let room_uuid = uuid::Uuid::parse_str(&room_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let member: Option<(uuid::Uuid,)> = sqlx::query_as(
        "SELECT user_id FROM chat_room_participants WHERE room_id = $1 AND user_id = $2",
    )
    .bind(room_uuid)
    .bind(user.id)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if member.is_none() {
        return Err(ServerFnError::new("Not a participant of this room"));
    }

    let message: ChatMessage = sqlx::query_as(
        "INSERT INTO chat_messages (room_id, sender_id, body) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(room_uuid)
    .bind(user.id)
    .bind(&body)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let sender_name = user.name.clone().unwrap_or_else(|| user.email.clone());
    Ok(message.to_info(sender_name))
}

#[cfg(not(feature = "server"))]
#[post("/api/chat/messages")]
pub async fn send_message(room_id: String, body: String) -> Result<ChatMessageInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Users the signed-in user can start a conversation with.
#[cfg(feature = "server")]
#[get("/api/chat/contacts", session: tower_sessions::Session)]
pub async fn list_chat_contacts() -> Result<Vec<ChatContactInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let rows: Vec<(uuid::Uuid, Option<String>, String, String)> = sqlx::query_as(
        "SELECT id, name, email, role FROM users WHERE id != $1 ORDER BY name, email",
    )
    .bind(user.id)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|(id, name, email, role)| ChatContactInfo {
            id: id.to_string(),
            name: name.unwrap_or(email),
            role,
        })
        .collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/chat/contacts")]
pub async fn list_chat_contacts() -> Result<Vec<ChatContactInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
