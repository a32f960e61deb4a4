//! UseCase: ヘルスチェック
//!
//! 現在 join 済みのクライアント数を返します。

use std::sync::Arc;

use super::broadcast::BroadcastHub;

/// ヘルスチェックのユースケース
pub struct GetHealthUseCase {
    hub: Arc<BroadcastHub>,
}

impl GetHealthUseCase {
    /// 新しい GetHealthUseCase を作成
    pub fn new(hub: Arc<BroadcastHub>) -> Self {
        Self { hub }
    }

    /// 接続数を取得
    pub async fn execute(&self) -> usize {
        self.hub.online_count().await
    }
}
