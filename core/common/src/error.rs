//! エラーハンドリング
//!
//! 入力検証の失敗（必須項目の未入力）はエラーではなく `form::SubmitOutcome` で表す。
//! ここで扱うのは CLI 引数・ストア・I/O・HTTP など、処理を続行できない失敗のみ。

/// アプリ全体で共通のエラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正（使い方の表示対象）
    #[error("{0}")]
    InvalidArgument(String),
    /// 指定 ID のレコードが存在しない
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
    /// バックエンドとの通信失敗・非 2xx 応答
    #[error("HTTP error: {0}")]
    Http(String),
    /// 環境変数・ディレクトリ解決の失敗
    #[error("{0}")]
    Env(String),
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// 使い方を表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセスの終了コード（sysexits.h 準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::NotFound(_) => 66,
            Self::Http(_) => 69,
            Self::Io(_) | Self::Json(_) => 74,
            Self::Env(_) | Self::System(_) => 70,
        }
    }
}
