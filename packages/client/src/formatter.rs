//! Message formatting utilities for client display.

use chrono::{DateTime, Local};
use hiroba_server::infrastructure::dto::websocket::ServerMessage;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server frame for display
    ///
    /// # Arguments
    ///
    /// * `msg` - Decoded server frame
    /// * `me` - The local username (to mark own lines)
    pub fn format(msg: &ServerMessage, me: &str) -> String {
        match msg {
            ServerMessage::Init {
                history,
                user_count,
                color,
            } => Self::format_init(history, *user_count, color, me),
            ServerMessage::System {
                text,
                timestamp,
                user_count,
            } => Self::format_system(text, timestamp, *user_count),
            ServerMessage::Message {
                username,
                text,
                timestamp,
                ..
            } => Self::format_chat(username, text, timestamp, me),
            ServerMessage::Typing { username } => Self::format_typing(username),
        }
    }

    /// Format the init frame: a header followed by the replayed history
    pub fn format_init(
        history: &[ServerMessage],
        user_count: usize,
        color: &str,
        me: &str,
    ) -> String {
        let mut output = String::new();
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "Joined as {} ({}) - {} online\n",
            me, color, user_count
        ));
        output.push_str(RULE);

        if history.is_empty() {
            output.push_str("\n(No messages yet)");
        }
        for entry in history {
            output.push('\n');
            output.push_str(&Self::format(entry, me));
        }
        output
    }

    /// Format a system notice: `[HH:MM] * Alice joined the chat (2 online)`
    pub fn format_system(text: &str, timestamp: &str, user_count: usize) -> String {
        format!(
            "[{}] * {} ({} online)",
            Self::clock(timestamp),
            text,
            user_count
        )
    }

    /// Format a chat line: `[HH:MM] Alice: hi`
    ///
    /// Own lines are marked with `(me)`.
    pub fn format_chat(username: &str, text: &str, timestamp: &str, me: &str) -> String {
        let me_suffix = if username == me { " (me)" } else { "" };
        format!(
            "[{}] {}{}: {}",
            Self::clock(timestamp),
            username,
            me_suffix,
            text
        )
    }

    pub fn format_typing(username: &str) -> String {
        format!("{} is typing...", username)
    }

    /// Format a frame that could not be decoded
    pub fn format_raw_message(text: &str) -> String {
        format!("<- Received: {}", text)
    }

    /// `HH:MM` in local time, or `--:--` when the timestamp is not RFC 3339
    pub fn clock(timestamp: &str) -> String {
        match DateTime::parse_from_rfc3339(timestamp) {
            Ok(dt) => dt.with_timezone(&Local).format("%H:%M").to_string(),
            Err(_) => "--:--".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2023-01-01T00:00:00.123Z";

    fn expected_clock() -> String {
        DateTime::parse_from_rfc3339(TS)
            .unwrap()
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }

    #[test]
    fn test_clock_converts_rfc3339_to_hours_and_minutes() {
        // テスト項目: RFC 3339 のタイムスタンプが HH:MM に変換される
        // given (前提条件):
        let timestamp = TS;

        // when (操作):
        let result = MessageFormatter::clock(timestamp);

        // then (期待する結果):
        assert_eq!(result, expected_clock());
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_clock_with_invalid_timestamp() {
        // テスト項目: 解釈できないタイムスタンプは --:-- になる
        // given (前提条件):
        let timestamp = "yesterday";

        // when (操作):
        let result = MessageFormatter::clock(timestamp);

        // then (期待する結果):
        assert_eq!(result, "--:--");
    }

    #[test]
    fn test_format_chat_message() {
        // テスト項目: チャット行が [HH:MM] name: text の形式になる
        // given (前提条件):
        let msg = ServerMessage::Message {
            username: "Alice".to_string(),
            text: "Hello, world!".to_string(),
            color: "#e74c3c".to_string(),
            timestamp: TS.to_string(),
        };

        // when (操作):
        let result = MessageFormatter::format(&msg, "Bob");

        // then (期待する結果):
        assert_eq!(result, format!("[{}] Alice: Hello, world!", expected_clock()));
    }

    #[test]
    fn test_format_own_chat_message_is_marked() {
        // テスト項目: 自分の発言には (me) が付く
        // given (前提条件):
        let me = "Alice";

        // when (操作):
        let result = MessageFormatter::format_chat("Alice", "hi", TS, me);

        // then (期待する結果):
        assert!(result.ends_with("Alice (me): hi"));
    }

    #[test]
    fn test_format_system_notice() {
        // テスト項目: システム通知に接続数が付く
        // given (前提条件):
        let msg = ServerMessage::System {
            text: "Bob joined the chat".to_string(),
            timestamp: TS.to_string(),
            user_count: 2,
        };

        // when (操作):
        let result = MessageFormatter::format(&msg, "Alice");

        // then (期待する結果):
        assert_eq!(
            result,
            format!("[{}] * Bob joined the chat (2 online)", expected_clock())
        );
    }

    #[test]
    fn test_format_typing() {
        // テスト項目: 入力中通知が正しくフォーマットされる
        // given (前提条件):
        let msg = ServerMessage::Typing {
            username: "Bob".to_string(),
        };

        // when (操作):
        let result = MessageFormatter::format(&msg, "Alice");

        // then (期待する結果):
        assert_eq!(result, "Bob is typing...");
    }

    #[test]
    fn test_format_init_with_empty_history() {
        // テスト項目: 履歴が空の init ではヘッダーと空の旨が表示される
        // given (前提条件):
        let msg = ServerMessage::Init {
            history: vec![],
            user_count: 1,
            color: "#e74c3c".to_string(),
        };

        // when (操作):
        let result = MessageFormatter::format(&msg, "Alice");

        // then (期待する結果):
        assert!(result.contains("Joined as Alice (#e74c3c) - 1 online"));
        assert!(result.contains("(No messages yet)"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_init_replays_history_in_order() {
        // テスト項目: init の履歴が古い順に 1 行ずつ表示される
        // given (前提条件):
        let msg = ServerMessage::Init {
            history: vec![
                ServerMessage::System {
                    text: "Alice joined the chat".to_string(),
                    timestamp: TS.to_string(),
                    user_count: 1,
                },
                ServerMessage::Message {
                    username: "Alice".to_string(),
                    text: "first".to_string(),
                    color: "#e74c3c".to_string(),
                    timestamp: TS.to_string(),
                },
            ],
            user_count: 2,
            color: "#3498db".to_string(),
        };

        // when (操作):
        let result = MessageFormatter::format(&msg, "Bob");

        // then (期待する結果):
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].ends_with("* Alice joined the chat (1 online)"));
        assert!(lines[4].ends_with("Alice: first"));
        assert!(!result.contains("(No messages yet)"));
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: デコードできないフレームはそのまま表示される
        // given (前提条件):
        let text = "unknown message format";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(result.contains("unknown message format"));
        assert!(result.contains("Received:"));
    }
}
