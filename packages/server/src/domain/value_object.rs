//! Value Objects
//!
//! 不変で、値そのものが意味を持つドメインの型を定義します。
//! 生の入力（ユーザー名、メッセージ本文）の正規化はここで一度だけ行います。

use std::fmt;

use uuid::Uuid;

use super::error::MessageTextError;

/// ユーザー名の最大文字数
pub const MAX_USERNAME_CHARS: usize = 20;
/// ユーザー名が空の場合に使われる名前
pub const DEFAULT_USERNAME: &str = "Anon";
/// メッセージ本文の最大文字数
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// 接続ごとに割り当てられる一意な ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// 新しい ID を生成（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 表示名
///
/// 前後の空白を除去し、先頭 20 文字に切り詰める。
/// 空になった場合は `"Anon"` になるため、構築は失敗しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Self {
        let clamped: String = raw.trim().chars().take(MAX_USERNAME_CHARS).collect();
        if clamped.is_empty() {
            Self(DEFAULT_USERNAME.to_string())
        } else {
            Self(clamped)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for Username {
    fn default() -> Self {
        Self(DEFAULT_USERNAME.to_string())
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャットメッセージ本文
///
/// 前後の空白を除去し、先頭 1000 文字に切り詰める。空の本文は作れない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(raw: &str) -> Result<Self, MessageTextError> {
        let clamped: String = raw.trim().chars().take(MAX_MESSAGE_CHARS).collect();
        if clamped.is_empty() {
            return Err(MessageTextError::Empty);
        }
        Ok(Self(clamped))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = MessageTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

/// パレットから割り当てられる表示色（`#rrggbb`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(&'static str);

impl Color {
    pub const fn from_static(value: &'static str) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
