//! REST API client.
//!
//! 呼び出し元ユーザーは `x-user-id` ヘッダで渡す。

use parley_shared::protocol::MessagePayload;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};

use crate::{
    endpoint::{api_endpoint, parse_api_base},
    error::ClientError,
};

const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// REST API client bound to one user
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    user_id: String,
}

impl ApiClient {
    /// `base_url` は `http://127.0.0.1:8080/api` の形式
    pub fn new(base_url: &str, user_id: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            base_url: parse_api_base(base_url)?,
            user_id: user_id.into(),
        })
    }

    /// ダイレクトメッセージを送信
    pub async fn send_direct(
        &self,
        recipient_id: &str,
        text: &str,
    ) -> Result<MessagePayload, ClientError> {
        let url = api_endpoint(&self.base_url, &["messages", recipient_id])?;
        self.post_message(url, text).await
    }

    /// グループにメッセージを送信
    pub async fn send_group(&self, group_id: &str, text: &str) -> Result<MessagePayload, ClientError> {
        let url = api_endpoint(&self.base_url, &["groups", group_id, "messages"])?;
        self.post_message(url, text).await
    }

    /// 相手とのダイレクトメッセージ履歴
    pub async fn direct_history(&self, peer_id: &str) -> Result<Vec<MessagePayload>, ClientError> {
        let url = api_endpoint(&self.base_url, &["messages", peer_id])?;
        self.get_json(url).await
    }

    /// グループのメッセージ履歴
    pub async fn group_history(&self, group_id: &str) -> Result<Vec<MessagePayload>, ClientError> {
        let url = api_endpoint(&self.base_url, &["groups", group_id, "messages"])?;
        self.get_json(url).await
    }

    /// オンラインユーザー一覧（WebSocket が切れているときの代替）
    pub async fn online_users(&self) -> Result<Vec<String>, ClientError> {
        let url = api_endpoint(&self.base_url, &["users", "online"])?;
        self.get_json(url).await
    }

    async fn post_message(&self, url: Url, text: &str) -> Result<MessagePayload, ClientError> {
        let response = self
            .http
            .post(url)
            .header(USER_ID_HEADER, &self.user_id)
            .json(&SendMessageBody { text })
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self
            .http
            .get(url)
            .header(USER_ID_HEADER, &self.user_id)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    Err(ClientError::Api(format!("{} ({})", message, status.as_u16())))
}
