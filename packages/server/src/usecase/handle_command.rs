//! UseCase: クライアントからのコマンド処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HandleCommandUseCase::execute() メソッド
//! - join / message / typing の各コマンドが Hub の操作に変換されること
//!
//! ### なぜこのテストが必要か
//! - join で init が本人に届き、入室通知が全員に届くことを保証
//! - 空白だけのメッセージや join 前のコマンドが黙って無視されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：join → message → typing
//! - エッジケース：join 前の message、空白のみの message、未知の type

use std::sync::Arc;

use crate::domain::{
    Broadcast, IgnoreReason, PusherChannel, RegisteredSession, Session, SessionAction,
    SessionCommand,
};

use super::broadcast::BroadcastHub;

/// コマンド処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// join 完了（登録後の接続数）
    Joined { user_count: usize },
    /// チャットメッセージをブロードキャストした
    Posted,
    /// 入力中通知を送った
    Typing,
    /// 何もしなかった
    Ignored(IgnoreReason),
}

/// コマンド処理のユースケース
pub struct HandleCommandUseCase {
    hub: Arc<BroadcastHub>,
    /// join 時に再送する履歴の件数
    replay_limit: usize,
}

impl HandleCommandUseCase {
    /// 新しい HandleCommandUseCase を作成
    pub fn new(hub: Arc<BroadcastHub>, replay_limit: usize) -> Self {
        Self { hub, replay_limit }
    }

    /// コマンドを実行
    ///
    /// # Arguments
    ///
    /// * `session` - コマンドを送ったセッション
    /// * `sender` - このセッションの送信チャンネル（join 時に Registry に登録する）
    /// * `command` - デコード済みのコマンド
    pub async fn execute(
        &self,
        session: &mut Session,
        sender: &PusherChannel,
        command: SessionCommand,
    ) -> CommandOutcome {
        match session.handle(command) {
            SessionAction::Join(username) => {
                let user_count = self
                    .hub
                    .admit(
                        RegisteredSession {
                            id: session.id(),
                            username: username.clone(),
                            color: session.color(),
                            sender: sender.clone(),
                        },
                        self.replay_limit,
                    )
                    .await;
                tracing::info!(
                    "Session '{}' joined as '{}' ({} online)",
                    session.id(),
                    username,
                    user_count
                );

                self.hub.broadcast(Broadcast::Joined(username), None).await;
                CommandOutcome::Joined { user_count }
            }
            SessionAction::Chat { username, text } => {
                tracing::debug!("Broadcasting message from '{}'", username);
                self.hub
                    .broadcast(
                        Broadcast::Chat {
                            username,
                            text,
                            color: session.color(),
                        },
                        None,
                    )
                    .await;
                CommandOutcome::Posted
            }
            SessionAction::Typing(username) => {
                self.hub.typing_notice(&session.id(), &username).await;
                CommandOutcome::Typing
            }
            SessionAction::Ignore(reason) => {
                tracing::debug!("Ignored command from '{}': {:?}", session.id(), reason);
                CommandOutcome::Ignored(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatEvent, OutboundEvent, PALETTE, SessionId},
        infrastructure::registry::InMemoryConnectionRegistry,
    };
    use hiroba_shared::time::FixedClock;
    use tokio::sync::mpsc;

    struct Client {
        session: Session,
        sender: PusherChannel,
        receiver: mpsc::UnboundedReceiver<OutboundEvent>,
    }

    impl Client {
        fn new(index: usize) -> Self {
            let (sender, receiver) = mpsc::unbounded_channel();
            Self {
                session: Session::new(SessionId::generate(), PALETTE[index]),
                sender,
                receiver,
            }
        }

        fn drain(&mut self) -> Vec<OutboundEvent> {
            let mut events = Vec::new();
            while let Ok(event) = self.receiver.try_recv() {
                events.push(event);
            }
            events
        }
    }

    fn create_test_usecase() -> HandleCommandUseCase {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let hub = Arc::new(BroadcastHub::new(
            registry,
            Arc::new(FixedClock::new(1672531200000)),
            200,
        ));
        HandleCommandUseCase::new(hub, 50)
    }

    async fn send(
        usecase: &HandleCommandUseCase,
        client: &mut Client,
        command: SessionCommand,
    ) -> CommandOutcome {
        usecase
            .execute(&mut client.session, &client.sender, command)
            .await
    }

    fn join(name: &str) -> SessionCommand {
        SessionCommand::Join {
            username: Some(name.to_string()),
        }
    }

    fn message(text: &str) -> SessionCommand {
        SessionCommand::Message {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_join_sends_init_then_joined_notice() {
        // テスト項目: join すると本人に init、続いて入室通知が届く
        // given (前提条件):
        let usecase = create_test_usecase();
        let mut alice = Client::new(0);

        // when (操作):
        let outcome = send(&usecase, &mut alice, join("  Alice  ")).await;

        // then (期待する結果):
        assert_eq!(outcome, CommandOutcome::Joined { user_count: 1 });
        let events = alice.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            OutboundEvent::Init { history, user_count: 1, color } if history.is_empty() && *color == PALETTE[0]
        ));
        assert!(matches!(
            &events[1],
            OutboundEvent::Event(ChatEvent::System(notice))
                if notice.text == "Alice joined the chat" && notice.user_count == 1
        ));
    }

    #[tokio::test]
    async fn test_second_join_is_announced_to_first_client() {
        // テスト項目: 2 人目の join が 1 人目に userCount=2 で通知される
        // given (前提条件):
        let usecase = create_test_usecase();
        let mut alice = Client::new(0);
        let mut bob = Client::new(1);
        send(&usecase, &mut alice, join("Alice")).await;
        alice.drain();

        // when (操作):
        let outcome = send(&usecase, &mut bob, join("Bob")).await;

        // then (期待する結果):
        assert_eq!(outcome, CommandOutcome::Joined { user_count: 2 });
        let alice_events = alice.drain();
        assert!(matches!(
            alice_events.as_slice(),
            [OutboundEvent::Event(ChatEvent::System(notice))]
                if notice.text == "Bob joined the chat" && notice.user_count == 2
        ));
        let bob_events = bob.drain();
        assert!(matches!(
            &bob_events[0],
            OutboundEvent::Init { history, user_count: 2, .. } if history.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_message_is_broadcast_with_sender_identity() {
        // テスト項目: join 後の message が送信者名と色付きで全員に届く
        // given (前提条件):
        let usecase = create_test_usecase();
        let mut alice = Client::new(0);
        let mut bob = Client::new(1);
        send(&usecase, &mut alice, join("Alice")).await;
        send(&usecase, &mut bob, join("Bob")).await;
        alice.drain();
        bob.drain();

        // when (操作):
        let outcome = send(&usecase, &mut alice, message("hi")).await;

        // then (期待する結果):
        assert_eq!(outcome, CommandOutcome::Posted);
        for events in [alice.drain(), bob.drain()] {
            assert!(matches!(
                events.as_slice(),
                [OutboundEvent::Event(ChatEvent::Chat(line))]
                    if line.username.as_str() == "Alice"
                        && line.text.as_str() == "hi"
                        && line.color == PALETTE[0]
            ));
        }
    }

    #[tokio::test]
    async fn test_long_message_is_clamped() {
        // テスト項目: 1500 文字の message は先頭 1000 文字でブロードキャストされる
        // given (前提条件):
        let usecase = create_test_usecase();
        let mut alice = Client::new(0);
        send(&usecase, &mut alice, join("Alice")).await;
        alice.drain();
        let text = "z".repeat(1500);

        // when (操作):
        send(&usecase, &mut alice, message(&text)).await;

        // then (期待する結果):
        match alice.drain().as_slice() {
            [OutboundEvent::Event(ChatEvent::Chat(line))] => {
                assert_eq!(line.text.as_str(), &text[..1000]);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_whitespace_message_produces_no_broadcast() {
        // テスト項目: 空白のみの message はブロードキャストされない
        // given (前提条件):
        let usecase = create_test_usecase();
        let mut alice = Client::new(0);
        send(&usecase, &mut alice, join("Alice")).await;
        alice.drain();

        // when (操作):
        let outcome = send(&usecase, &mut alice, message("   ")).await;

        // then (期待する結果):
        assert_eq!(outcome, CommandOutcome::Ignored(IgnoreReason::EmptyMessage));
        assert!(alice.drain().is_empty());
    }

    #[tokio::test]
    async fn test_commands_before_join_are_ignored() {
        // テスト項目: join 前の message / typing は何も起こさない
        // given (前提条件):
        let usecase = create_test_usecase();
        let mut alice = Client::new(0);
        let mut bob = Client::new(1);
        send(&usecase, &mut alice, join("Alice")).await;
        alice.drain();

        // when (操作):
        let posted = send(&usecase, &mut bob, message("hello?")).await;
        let typing = send(&usecase, &mut bob, SessionCommand::Typing).await;

        // then (期待する結果):
        assert_eq!(posted, CommandOutcome::Ignored(IgnoreReason::NotJoined));
        assert_eq!(typing, CommandOutcome::Ignored(IgnoreReason::NotJoined));
        assert!(alice.drain().is_empty());
        assert!(bob.drain().is_empty());
    }

    #[tokio::test]
    async fn test_typing_reaches_everyone_but_sender() {
        // テスト項目: typing は送信者以外にだけ届く
        // given (前提条件):
        let usecase = create_test_usecase();
        let mut alice = Client::new(0);
        let mut bob = Client::new(1);
        send(&usecase, &mut alice, join("Alice")).await;
        send(&usecase, &mut bob, join("Bob")).await;
        alice.drain();
        bob.drain();

        // when (操作):
        let outcome = send(&usecase, &mut alice, SessionCommand::Typing).await;

        // then (期待する結果):
        assert_eq!(outcome, CommandOutcome::Typing);
        assert!(alice.drain().is_empty());
        assert!(matches!(
            bob.drain().as_slice(),
            [OutboundEvent::Typing { username }] if username.as_str() == "Alice"
        ));
    }

    #[tokio::test]
    async fn test_unknown_command_is_ignored() {
        // テスト項目: 未知の type は無視される
        // given (前提条件):
        let usecase = create_test_usecase();
        let mut alice = Client::new(0);

        // when (操作):
        let outcome = send(&usecase, &mut alice, SessionCommand::Unknown).await;

        // then (期待する結果):
        assert_eq!(outcome, CommandOutcome::Ignored(IgnoreReason::UnknownType));
        assert!(alice.drain().is_empty());
    }
}
