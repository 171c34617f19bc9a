//! Server state shared by every connection task.

use std::sync::Arc;

use crate::{infrastructure::registry::ConnectionRegistry, usecase::DispatchCommandUseCase};

/// Shared application state
pub struct AppState {
    /// ConnectionRegistry（接続中のクライアントとブロードキャスト）
    pub registry: Arc<ConnectionRegistry>,
    /// DispatchCommandUseCase（受信メッセージのコマンド処理）
    pub dispatch_command_usecase: Arc<DispatchCommandUseCase>,
}
