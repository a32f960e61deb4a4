//! Server state shared by every handler.

use std::sync::Arc;

use hiroba_shared::time::SystemClock;

use crate::{
    config::ServerConfig,
    domain::ColorAssigner,
    infrastructure::registry::InMemoryConnectionRegistry,
    usecase::{
        BroadcastHub, ConnectSessionUseCase, DisconnectSessionUseCase, GetHealthUseCase,
        HandleCommandUseCase,
    },
};

/// Shared application state
///
/// Built once at startup and handed to every connection task.
pub struct AppState {
    /// ConnectSessionUseCase（接続受付のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// HandleCommandUseCase（コマンド処理のユースケース）
    pub handle_command_usecase: Arc<HandleCommandUseCase>,
    /// DisconnectSessionUseCase（切断処理のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// GetHealthUseCase（ヘルスチェックのユースケース）
    pub get_health_usecase: Arc<GetHealthUseCase>,
}

impl AppState {
    /// Wire the in-memory stack for the given configuration
    pub fn from_config(config: &ServerConfig) -> Self {
        // Initialize dependencies in order:
        // 1. Registry
        // 2. BroadcastHub
        // 3. UseCases

        // 1. Create Registry (in-memory)
        let registry = Arc::new(InMemoryConnectionRegistry::new());

        // 2. Create BroadcastHub (history + fan-out)
        let hub = Arc::new(BroadcastHub::new(
            registry,
            Arc::new(SystemClock),
            config.history_capacity,
        ));

        // 3. Create UseCases
        Self {
            connect_session_usecase: Arc::new(ConnectSessionUseCase::new(Arc::new(
                ColorAssigner::new(),
            ))),
            handle_command_usecase: Arc::new(HandleCommandUseCase::new(
                hub.clone(),
                config.replay_limit,
            )),
            disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(hub.clone())),
            get_health_usecase: Arc::new(GetHealthUseCase::new(hub)),
        }
    }
}
