//! Shared application state.

use std::sync::Arc;

use parley_shared::time::Clock;

use crate::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        registry::InMemoryConnectionRegistry,
        repository::{InMemoryGroupRepository, InMemoryMessageRepository},
    },
    usecase::{
        ConnectUserUseCase, CreateGroupUseCase, DisconnectUserUseCase, GetMessagesUseCase,
        GetOnlineUsersUseCase, PresenceBroadcaster, RelayMessageUseCase, RelayTypingUseCase,
        SendMessageUseCase,
    },
};

/// ハンドラから参照する UseCase 一式
pub struct AppState {
    /// ConnectUserUseCase（接続時のレジストリ登録とプレゼンス通知）
    pub connect_user_usecase: Arc<ConnectUserUseCase>,
    /// DisconnectUserUseCase（切断時の登録解除とプレゼンス通知）
    pub disconnect_user_usecase: Arc<DisconnectUserUseCase>,
    /// RelayTypingUseCase（入力中シグナルのリレー）
    pub relay_typing_usecase: Arc<RelayTypingUseCase>,
    /// SendMessageUseCase（永続化してからリレー）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetMessagesUseCase（履歴取得）
    pub get_messages_usecase: Arc<GetMessagesUseCase>,
    /// CreateGroupUseCase（グループ作成）
    pub create_group_usecase: Arc<CreateGroupUseCase>,
    /// GetOnlineUsersUseCase（オンライン一覧）
    pub get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
}

impl AppState {
    /// インメモリのストアとレジストリで依存関係を組み立てる
    ///
    /// 組み立て順:
    /// 1. Repository / Registry / MessagePusher
    /// 2. PresenceBroadcaster とリレー
    /// 3. UseCases
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        // 1. インフラ
        let messages = Arc::new(InMemoryMessageRepository::new(clock.clone()));
        let groups = Arc::new(InMemoryGroupRepository::new(clock));
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());

        // 2. プレゼンスとリレー
        let presence = Arc::new(PresenceBroadcaster::new(
            registry.clone(),
            message_pusher.clone(),
        ));
        let relay_message = Arc::new(RelayMessageUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            groups.clone(),
        ));

        // 3. UseCases
        Self {
            connect_user_usecase: Arc::new(ConnectUserUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                presence.clone(),
            )),
            disconnect_user_usecase: Arc::new(DisconnectUserUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                presence,
            )),
            relay_typing_usecase: Arc::new(RelayTypingUseCase::new(
                registry.clone(),
                message_pusher,
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                messages.clone(),
                groups.clone(),
                relay_message,
            )),
            get_messages_usecase: Arc::new(GetMessagesUseCase::new(messages, groups.clone())),
            create_group_usecase: Arc::new(CreateGroupUseCase::new(groups)),
            get_online_users_usecase: Arc::new(GetOnlineUsersUseCase::new(registry)),
        }
    }
}
