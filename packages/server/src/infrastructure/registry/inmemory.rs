//! InMemory ConnectionRegistry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! `HashMap` をインメモリのストアとして使用し、全操作を 1 つの Mutex で直列化します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionRegistry, RegisteredSession, SessionId};

/// インメモリ ConnectionRegistry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    /// Key: SessionId, Value: 登録済みセッション
    sessions: Mutex<HashMap<SessionId, RegisteredSession>>,
}

impl InMemoryConnectionRegistry {
    /// 新しい InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn add(&self, session: RegisteredSession) {
        let mut sessions = self.sessions.lock().await;
        let id = session.id;
        let username = session.username.clone();
        if sessions.insert(id, session).is_some() {
            tracing::debug!("Session '{}' re-registered as '{}' (overwritten)", id, username);
        } else {
            tracing::debug!("Session '{}' registered as '{}'", id, username);
        }
    }

    async fn remove(&self, id: &SessionId) -> Option<RegisteredSession> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(id);
        if let Some(session) = &removed {
            tracing::debug!("Session '{}' ({}) unregistered", id, session.username);
        }
        removed
    }

    async fn get_all(&self) -> Vec<RegisteredSession> {
        let sessions = self.sessions.lock().await;
        sessions.values().cloned().collect()
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PALETTE, Username};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryConnectionRegistry の add / remove / get_all / count
    //
    // 【なぜこのテストが必要か】
    // - 接続数（userCount）とブロードキャスト先はこの Registry から決まる
    // - 切断時のクリーンアップは join 前でも安全でなければならない（remove の冪等性）
    //
    // 【どのようなシナリオをテストするか】
    // 1. 追加した分だけ count が増える
    // 2. 同じ ID の追加は上書き
    // 3. 存在しない ID の削除は何もしない
    // 4. get_all が全セッションを返す
    // ========================================

    fn registered(id: SessionId, name: &str) -> RegisteredSession {
        let (sender, _receiver) = mpsc::unbounded_channel();
        RegisteredSession {
            id,
            username: Username::new(name),
            color: PALETTE[0],
            sender,
        }
    }

    #[tokio::test]
    async fn test_add_increments_count() {
        // テスト項目: セッションを追加すると count が増える
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();

        // when (操作):
        registry.add(registered(SessionId::generate(), "alice")).await;
        registry.add(registered(SessionId::generate(), "bob")).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn test_add_with_duplicate_id_overwrites() {
        // テスト項目: 同じ ID で追加すると上書きされる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let id = SessionId::generate();
        registry.add(registered(id, "alice")).await;

        // when (操作):
        registry.add(registered(id, "alicia")).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 1);
        let all = registry.get_all().await;
        assert_eq!(all[0].username.as_str(), "alicia");
    }

    #[tokio::test]
    async fn test_remove_existing_session() {
        // テスト項目: 登録済みセッションを削除できる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let id = SessionId::generate();
        registry.add(registered(id, "alice")).await;

        // when (操作):
        let removed = registry.remove(&id).await;

        // then (期待する結果):
        assert_eq!(removed.map(|s| s.id), Some(id));
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_missing_session_is_noop() {
        // テスト項目: 存在しない ID の削除は何もしない（冪等）
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        registry.add(registered(SessionId::generate(), "alice")).await;

        // when (操作):
        let first = registry.remove(&SessionId::generate()).await;

        // then (期待する結果):
        assert!(first.is_none());
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_get_all_returns_every_session() {
        // テスト項目: get_all が登録中の全セッションを返す
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let alice = SessionId::generate();
        let bob = SessionId::generate();
        registry.add(registered(alice, "alice")).await;
        registry.add(registered(bob, "bob")).await;

        // when (操作):
        let all = registry.get_all().await;

        // then (期待する結果):
        assert_eq!(all.len(), 2);
        let ids: Vec<SessionId> = all.iter().map(|s| s.id).collect();
        assert!(ids.contains(&alice));
        assert!(ids.contains(&bob));
    }
}
