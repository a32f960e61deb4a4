//! Entities
//!
//! ブロードキャストされ、履歴に記録されるイベントと、
//! 各接続の送信チャンネルに流れるイベントを定義します。

use super::value_object::{Color, MessageText, Timestamp, Username};

/// 入退室などのシステム通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemNotice {
    pub text: String,
    pub timestamp: Timestamp,
    /// 通知時点の接続数
    pub user_count: usize,
}

/// ユーザーが投稿したチャットメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub username: Username,
    pub text: MessageText,
    pub color: Color,
    pub timestamp: Timestamp,
}

/// 履歴に記録されるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    System(SystemNotice),
    Chat(ChatLine),
}

/// ブロードキャスト依頼
///
/// タイムスタンプと接続数は BroadcastHub が送信時点の値で埋める。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Broadcast {
    Joined(Username),
    Left(Username),
    Chat {
        username: Username,
        text: MessageText,
        color: Color,
    },
}

/// 1 つの接続の送信チャンネルに流れるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// join 直後に本人にだけ送る初期状態
    Init {
        history: Vec<ChatEvent>,
        user_count: usize,
        color: Color,
    },
    /// 履歴に記録されたイベント
    Event(ChatEvent),
    /// 入力中通知（履歴には残らない）
    Typing { username: Username },
}
