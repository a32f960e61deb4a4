//! ConnectionRegistry trait 定義
//!
//! join 済みのセッションを管理するインターフェースです。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    entity::OutboundEvent,
    value_object::{Color, SessionId, Username},
};

/// 接続ごとの送信チャンネル
///
/// 受信側は接続ごとに 1 つの pusher タスクが持ち、順番に WebSocket へ書き出す。
pub type PusherChannel = mpsc::UnboundedSender<OutboundEvent>;

/// Registry に登録されるセッション
#[derive(Debug, Clone)]
pub struct RegisteredSession {
    pub id: SessionId,
    pub username: Username,
    pub color: Color,
    pub sender: PusherChannel,
}

/// Connection Registry trait
///
/// - `add`: 同じ ID が既にあれば上書き
/// - `remove`: 存在しない ID の削除は何もしない（冪等）
/// - `count`: 現在登録されているセッション数
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// セッションを登録
    async fn add(&self, session: RegisteredSession);

    /// セッションを削除し、削除されたセッションを返す
    async fn remove(&self, id: &SessionId) -> Option<RegisteredSession>;

    /// 登録中の全セッションを取得（順序は保証しない）
    async fn get_all(&self) -> Vec<RegisteredSession>;

    /// 登録中のセッション数を取得
    async fn count(&self) -> usize;
}
