//! ドメイン層
//!
//! - Value Object / Entity
//! - 外部ストア（Repository）、接続レジストリ、メッセージ送信の抽象化

pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{Group, Message, MessageTarget, NewMessage};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::ConnectionRegistry;
pub use repository::{GroupRepository, MessageRepository};
pub use value_object::{
    ConnectionId, ConnectionIdFactory, GroupId, GroupIdFactory, GroupName, MessageBody, MessageId,
    MessageIdFactory, Timestamp, UserId,
};

#[cfg(test)]
pub use pusher::MockMessagePusher;
#[cfg(test)]
pub use registry::MockConnectionRegistry;
