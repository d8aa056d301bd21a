//! UseCase 層
//!
//! - 接続ライフサイクル: `ConnectUserUseCase`, `DisconnectUserUseCase`
//! - プレゼンス: `PresenceBroadcaster`, `GetOnlineUsersUseCase`
//! - リレー: `RelayMessageUseCase`, `RelayTypingUseCase`
//! - REST: `SendMessageUseCase`, `GetMessagesUseCase`, `CreateGroupUseCase`

mod announce_presence;
mod connect_user;
mod create_group;
mod disconnect_user;
mod error;
mod get_messages;
mod get_online_users;
mod relay_message;
mod relay_typing;
mod send_message;

pub use announce_presence::PresenceBroadcaster;
pub use connect_user::ConnectUserUseCase;
pub use create_group::CreateGroupUseCase;
pub use disconnect_user::DisconnectUserUseCase;
pub use error::{CreateGroupError, GetMessagesError, SendMessageError};
pub use get_messages::GetMessagesUseCase;
pub use get_online_users::GetOnlineUsersUseCase;
pub use relay_message::{RelayMessageUseCase, RelayOutcome};
pub use relay_typing::RelayTypingUseCase;
pub use send_message::SendMessageUseCase;
