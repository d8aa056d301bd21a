//! 呼び出し元ユーザーの抽出
//!
//! 認証は外部の auth 層が担い、検証済みのユーザー ID を `x-user-id` ヘッダで渡す。

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::domain::UserId;

use super::error::ApiError;

/// 認証済みユーザー ID を運ぶヘッダ
pub const USER_ID_HEADER: &str = "x-user-id";

/// リクエストの呼び出し元ユーザー
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("missing x-user-id header"))?;

        UserId::new(raw.to_string())
            .map(AuthenticatedUser)
            .map_err(|e| ApiError::unauthorized(e.to_string()))
    }
}
