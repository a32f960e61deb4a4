//! UseCase: 接続受付
//!
//! 接続ごとに ID と表示色を割り当てたセッションを作成します。
//! Registry への登録は join 時に行うため、ここでは登録しません。

use std::sync::Arc;

use crate::domain::{ColorAssigner, Session, SessionId};

/// 接続受付のユースケース
pub struct ConnectSessionUseCase {
    colors: Arc<ColorAssigner>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(colors: Arc<ColorAssigner>) -> Self {
        Self { colors }
    }

    /// 新しいセッションを作成（状態は Connected）
    pub fn execute(&self) -> Session {
        let session = Session::new(SessionId::generate(), self.colors.next());
        tracing::debug!(
            "Session '{}' created with color {}",
            session.id(),
            session.color()
        );
        session
    }
}
