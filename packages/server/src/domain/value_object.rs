//! Value Object 定義
//!
//! ID 類はすべて不透明な文字列。生成時にバリデーションを行い、
//! 一度生成された値は常に妥当であることを型で保証する。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// 未認証クライアントが送ってくるプレースホルダ値
const PLACEHOLDER_IDS: [&str; 2] = ["undefined", "null"];

/// グループ名の最大文字数
pub const GROUP_NAME_MAX_CHARS: usize = 50;

fn validate_id(kind: &'static str, value: &str) -> Result<(), ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed != value {
        return Err(ValueObjectError::InvalidId {
            kind,
            value: value.to_string(),
        });
    }
    if PLACEHOLDER_IDS.contains(&value) {
        return Err(ValueObjectError::InvalidId {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                validate_id($kind, &value)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// ユーザー ID（ストアがアカウント作成時に採番する。再利用されない）
    UserId,
    "user_id"
);

string_id!(
    /// 接続 ID（トランスポートが接続ごとに採番する。接続の間だけ有効）
    ConnectionId,
    "connection_id"
);

string_id!(
    /// グループ ID
    GroupId,
    "group_id"
);

string_id!(
    /// メッセージ ID
    MessageId,
    "message_id"
);

/// ConnectionId の採番
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// MessageId の採番
pub struct MessageIdFactory;

impl MessageIdFactory {
    pub fn generate() -> MessageId {
        MessageId(Uuid::new_v4().to_string())
    }
}

/// GroupId の採番
pub struct GroupIdFactory;

impl GroupIdFactory {
    pub fn generate() -> GroupId {
        GroupId(Uuid::new_v4().to_string())
    }
}

/// Unix タイムスタンプ（UTC, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// メッセージ本文
///
/// テキストと画像 URL のどちらか一方は必須。空白のみのテキストは「なし」として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    text: Option<String>,
    image_url: Option<String>,
}

impl MessageBody {
    pub fn new(text: Option<String>, image_url: Option<String>) -> Result<Self, ValueObjectError> {
        let text = text.filter(|t| !t.trim().is_empty());
        let image_url = image_url.filter(|u| !u.trim().is_empty());
        if text.is_none() && image_url.is_none() {
            return Err(ValueObjectError::EmptyMessageBody);
        }
        Ok(Self { text, image_url })
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// グループ名（前後の空白は除去、1〜50 文字）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        let chars = trimmed.chars().count();
        if chars == 0 || chars > GROUP_NAME_MAX_CHARS {
            return Err(ValueObjectError::InvalidGroupName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
