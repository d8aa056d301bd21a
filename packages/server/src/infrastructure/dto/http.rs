//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

/// `POST /api/messages/{recipient_id}` and `POST /api/groups/{group_id}/messages` body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// `POST /api/groups` body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
}

/// Group response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupDto {
    pub id: String,
    pub name: String,
    pub creator: String,
    pub members: Vec<String>,
    /// RFC 3339 (UTC)
    pub created_at: String,
}

/// Error response body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
