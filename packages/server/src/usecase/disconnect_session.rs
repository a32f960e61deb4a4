//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() / release()
//! - Registry からの削除と退室通知
//!
//! ### なぜこのテストが必要か
//! - 切断・エラー・キャンセルのどの経路でも後片付けは 1 回だけ行われる必要がある
//! - join 前に切断したセッションは退室通知を出してはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みセッションの切断
//! - エッジケース：join 前の切断、2 回目の切断

use std::sync::Arc;

use crate::domain::{Broadcast, Session, SessionId, SessionState};

use super::broadcast::BroadcastHub;

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// join 済みだったため退室通知を送った（削除後の接続数）
    Left { user_count: usize },
    /// join 前だったため削除のみ行った
    Dropped,
    /// 既に後片付け済み
    AlreadyClosed,
}

/// 切断処理のユースケース
pub struct DisconnectSessionUseCase {
    hub: Arc<BroadcastHub>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(hub: Arc<BroadcastHub>) -> Self {
        Self { hub }
    }

    /// セッションを Closed にして後片付けを行う
    ///
    /// 2 回目以降の呼び出しは何もしない。
    pub async fn execute(&self, session: &mut Session) -> DisconnectOutcome {
        match session.close() {
            Some(previous) => self.release(session.id(), previous).await,
            None => DisconnectOutcome::AlreadyClosed,
        }
    }

    /// Closed へ遷移済みのセッションについて、Registry からの削除と退室通知を行う
    ///
    /// # Arguments
    ///
    /// * `id` - 切断したセッションの ID
    /// * `previous` - `Session::close()` が返した直前の状態
    pub async fn release(&self, id: SessionId, previous: SessionState) -> DisconnectOutcome {
        let user_count = self.hub.dismiss(&id).await;

        match previous {
            SessionState::Joined(username) => {
                tracing::info!(
                    "Session '{}' ({}) left ({} online)",
                    id,
                    username,
                    user_count
                );
                self.hub.broadcast(Broadcast::Left(username), None).await;
                DisconnectOutcome::Left { user_count }
            }
            SessionState::Connected => {
                tracing::info!("Session '{}' disconnected before joining", id);
                DisconnectOutcome::Dropped
            }
            SessionState::Closed => DisconnectOutcome::AlreadyClosed,
        }
    }
}
