//! 環境変数解決 Outbound ポート
//!
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::{Dirs, HomeDir};
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモック。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. CLINICA_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/clinica
    /// 3. $HOME/.config/clinica
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// config / state ディレクトリ
    ///
    /// CLINICA_HOME があれば両方ともその配下、なければ XDG に従う
    /// （state は $XDG_STATE_HOME/clinica または $HOME/.local/state/clinica）。
    fn resolve_dirs(&self) -> Result<Dirs, Error>;

    /// CLINICA_API_URL（空文字は未設定扱い）
    fn api_url(&self) -> Option<String>;
}
