//! Chat rooms, messages, and the contact list for starting a conversation.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct ChatRoom {
    pub id: Uuid,
    pub name: Option<String>,
    pub is_group: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl ChatRoom {
    pub fn to_info(&self, participants: Vec<ChatContactInfo>) -> ChatRoomInfo {
        ChatRoomInfo {
            id: self.id.to_string(),
            name: self.name.clone(),
            is_group: self.is_group,
            participants,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRoomInfo {
    pub id: String,
    /// Group rooms carry a name; direct rooms derive one from the other party.
    pub name: Option<String>,
    pub is_group: bool,
    pub participants: Vec<ChatContactInfo>,
}

impl ChatRoomInfo {
    /// Display title: the room name, or the first participant other than `me`.
    pub fn title(&self, me: &str) -> String {
        if let Some(ref name) = self.name {
            return name.clone();
        }
        self.participants
            .iter()
            .find(|p| p.id != me)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Conversation".to_string())
    }
}

/// A user that can be added to a room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatContactInfo {
    pub id: String,
    pub name: String,
    pub role: String,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub room_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl ChatMessage {
    pub fn to_info(&self, sender_name: String) -> ChatMessageInfo {
        ChatMessageInfo {
            id: self.id.to_string(),
            room_id: self.room_id.to_string(),
            sender_id: self.sender_id.to_string(),
            sender_name,
            body: self.body.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessageInfo {
    pub id: String,
    pub room_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub body: String,
    pub created_at: String,
}
