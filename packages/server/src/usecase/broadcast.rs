//! BroadcastHub: 履歴への記録と全セッションへのファンアウト
//!
//! ## 設計ノート
//!
//! - 「履歴への追加 → 送信」は `state` の Mutex を保持したまま行う。
//!   これにより、履歴の順序と各受信者が受け取る順序が一致する。
//! - 送信は `UnboundedSender::send` なので待機しない。1 人への送信失敗は
//!   ログに残して無視し、他の受信者への送信を続ける。
//! - join 時の登録と init の送信も同じ Mutex の中で行い、init より先に
//!   ブロードキャストが届かないようにする。

use std::sync::Arc;

use hiroba_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    Broadcast, ChatEvent, ChatLine, ConnectionRegistry, HistoryBuffer, OutboundEvent,
    RegisteredSession, SessionId, SystemNotice, Timestamp, Username,
};

/// Mutex で保護される Hub の状態
struct HubState {
    history: HistoryBuffer<ChatEvent>,
    last_stamp: Timestamp,
}

impl HubState {
    /// 時計が巻き戻っても履歴内のタイムスタンプが減少しないようにする
    fn stamp(&mut self, now_millis: i64) -> Timestamp {
        let stamp = Timestamp::new(now_millis).max(self.last_stamp);
        self.last_stamp = stamp;
        stamp
    }
}

/// 履歴の記録とブロードキャストを担う Hub
pub struct BroadcastHub {
    /// Registry（join 済みセッションの管理）
    registry: Arc<dyn ConnectionRegistry>,
    /// タイムスタンプの取得元
    clock: Arc<dyn Clock>,
    state: Mutex<HubState>,
}

impl BroadcastHub {
    /// 新しい BroadcastHub を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        clock: Arc<dyn Clock>,
        history_capacity: usize,
    ) -> Self {
        Self {
            registry,
            clock,
            state: Mutex::new(HubState {
                history: HistoryBuffer::with_capacity(history_capacity),
                last_stamp: Timestamp::default(),
            }),
        }
    }

    /// セッションを登録し、本人に init を送る
    ///
    /// # Returns
    ///
    /// 登録後の接続数
    pub async fn admit(&self, session: RegisteredSession, replay_limit: usize) -> usize {
        let state = self.state.lock().await;

        let id = session.id;
        let color = session.color;
        let sender = session.sender.clone();
        self.registry.add(session).await;

        let user_count = self.registry.count().await;
        let init = OutboundEvent::Init {
            history: state.history.tail(replay_limit),
            user_count,
            color,
        };
        if sender.send(init).is_err() {
            tracing::warn!("Failed to push init to session '{}'", id);
        }

        user_count
    }

    /// セッションを Registry から外す（存在しなければ何もしない）
    ///
    /// # Returns
    ///
    /// 削除後の接続数
    pub async fn dismiss(&self, id: &SessionId) -> usize {
        self.registry.remove(id).await;
        self.registry.count().await
    }

    /// 履歴に記録し、`exclude` 以外の全セッションへ送信する
    ///
    /// # Returns
    ///
    /// 送信に成功したセッションの ID リスト
    pub async fn broadcast(
        &self,
        message: Broadcast,
        exclude: Option<&SessionId>,
    ) -> Vec<SessionId> {
        let mut state = self.state.lock().await;

        let timestamp = state.stamp(self.clock.now_millis());
        let event = match message {
            Broadcast::Joined(username) => ChatEvent::System(SystemNotice {
                text: format!("{} joined the chat", username),
                timestamp,
                user_count: self.registry.count().await,
            }),
            Broadcast::Left(username) => ChatEvent::System(SystemNotice {
                text: format!("{} left the chat", username),
                timestamp,
                user_count: self.registry.count().await,
            }),
            Broadcast::Chat {
                username,
                text,
                color,
            } => ChatEvent::Chat(ChatLine {
                username,
                text,
                color,
                timestamp,
            }),
        };
        state.history.append(event.clone());

        let recipients = self.registry.get_all().await;
        let delivered = deliver(recipients, exclude, &OutboundEvent::Event(event));
        drop(state);

        delivered
    }

    /// 送信者以外に入力中通知を送る（履歴には残さない）
    pub async fn typing_notice(
        &self,
        sender_id: &SessionId,
        username: &Username,
    ) -> Vec<SessionId> {
        let recipients = self.registry.get_all().await;
        deliver(
            recipients,
            Some(sender_id),
            &OutboundEvent::Typing {
                username: username.clone(),
            },
        )
    }

    /// 直近 `n` 件の履歴
    pub async fn recent_history(&self, n: usize) -> Vec<ChatEvent> {
        self.state.lock().await.history.tail(n)
    }

    /// 現在の接続数
    pub async fn online_count(&self) -> usize {
        self.registry.count().await
    }
}

/// 1 件ずつ独立に送信し、失敗は無視する
fn deliver(
    recipients: Vec<RegisteredSession>,
    exclude: Option<&SessionId>,
    event: &OutboundEvent,
) -> Vec<SessionId> {
    recipients
        .into_iter()
        .filter(|recipient| Some(&recipient.id) != exclude)
        .filter_map(|recipient| match recipient.sender.send(event.clone()) {
            Ok(()) => Some(recipient.id),
            Err(_) => {
                tracing::warn!("Failed to push message to session '{}'", recipient.id);
                None
            }
        })
        .collect()
}
