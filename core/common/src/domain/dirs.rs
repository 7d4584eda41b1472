//! 実行時ディレクトリ（XDG / CLINICA_HOME 解決結果）
//!
//! EnvResolver::resolve_dirs() で取得し、設定ファイル・ログのパス計算に使う。

use std::path::PathBuf;

const CONFIG_FILENAME: &str = "config.json";
const LOG_FILENAME: &str = "clinica.jsonl";

/// 解決済みの config / state ディレクトリ
#[derive(Debug, Clone)]
pub struct Dirs {
    pub config_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Dirs {
    /// 設定ファイル（config/config.json）
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILENAME)
    }

    /// ログ格納ディレクトリ（state/logs）
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILENAME)
    }
}
