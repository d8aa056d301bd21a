//! Conversion logic between DTOs and domain entities.

use parley_shared::{
    protocol::{MessagePayload, MessageTargetPayload, ServerEvent},
    time::timestamp_to_rfc3339,
};

use crate::{
    domain::{Group, Message, MessageTarget, UserId},
    infrastructure::dto::http::GroupDto,
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&MessageTarget> for MessageTargetPayload {
    fn from(target: &MessageTarget) -> Self {
        match target {
            MessageTarget::Direct { recipient_id } => Self::Direct {
                recipient_id: recipient_id.to_string(),
            },
            MessageTarget::Group { group_id } => Self::Group {
                group_id: group_id.to_string(),
            },
        }
    }
}

impl From<&Message> for MessagePayload {
    fn from(model: &Message) -> Self {
        Self {
            id: model.id.to_string(),
            sender_id: model.sender_id.to_string(),
            target: (&model.target).into(),
            text: model.body.text().map(str::to_string),
            image_url: model.body.image_url().map(str::to_string),
            created_at: model.created_at.value(),
        }
    }
}

impl From<&Group> for GroupDto {
    fn from(model: &Group) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name.as_str().to_string(),
            creator: model.creator.to_string(),
            members: model.members.iter().map(UserId::to_string).collect(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

/// Build the `presence` snapshot event
pub fn presence_event(online_user_ids: &[UserId]) -> ServerEvent {
    ServerEvent::Presence {
        online_user_ids: online_user_ids.iter().map(UserId::to_string).collect(),
    }
}

/// Build the `message` push event
pub fn message_event(message: &Message) -> ServerEvent {
    ServerEvent::Message {
        message: message.into(),
    }
}

/// Build the `typing` push event
pub fn typing_event(sender_id: &UserId, is_typing: bool) -> ServerEvent {
    ServerEvent::Typing {
        sender_id: sender_id.to_string(),
        is_typing,
    }
}
