//! UseCase エラーから HTTP レスポンスへの変換

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::ValueObjectError,
    infrastructure::dto::http::ErrorResponse,
    usecase::{CreateGroupError, GetMessagesError, SendMessageError},
};

/// ステータスコードとエラーメッセージ
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {}", self.message);
        }
        (
            self.status,
            Json(ErrorResponse {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(e: ValueObjectError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::bad_request(e.body_text())
    }
}

impl From<SendMessageError> for ApiError {
    fn from(e: SendMessageError) -> Self {
        match e {
            SendMessageError::GroupNotFound(_) => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            SendMessageError::NotGroupMember(_) => Self::new(StatusCode::FORBIDDEN, e.to_string()),
            SendMessageError::Repository(_) => Self::internal(e.to_string()),
        }
    }
}

impl From<GetMessagesError> for ApiError {
    fn from(e: GetMessagesError) -> Self {
        match e {
            GetMessagesError::GroupNotFound(_) => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            GetMessagesError::NotGroupMember(_) => Self::new(StatusCode::FORBIDDEN, e.to_string()),
            GetMessagesError::Repository(_) => Self::internal(e.to_string()),
        }
    }
}

impl From<CreateGroupError> for ApiError {
    fn from(e: CreateGroupError) -> Self {
        match e {
            CreateGroupError::InvalidInput(_) | CreateGroupError::NoMembers => {
                Self::bad_request(e.to_string())
            }
            CreateGroupError::Repository(_) => Self::internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryError;

    #[test]
    fn test_send_message_error_status_mapping() {
        // テスト項目: 送信エラーが対応する HTTP ステータスに変換される
        // given (前提条件):
        let cases = [
            (
                SendMessageError::GroupNotFound("g1".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                SendMessageError::NotGroupMember("g1".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                SendMessageError::Repository(RepositoryError::Unavailable("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            // when (操作):
            let response = ApiError::from(error).into_response();

            // then (期待する結果):
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_create_group_validation_is_bad_request() {
        // テスト項目: グループ作成の入力エラーは 400 になる
        // given (前提条件):
        let error = CreateGroupError::NoMembers;

        // when (操作):
        let response = ApiError::from(error).into_response();

        // then (期待する結果):
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
