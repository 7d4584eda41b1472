//! config.json 用の設定型
//!
//! どのストア（メモリ / REST）を使うかと、REST の接続先を決める。
//! 優先順位は CLI フラグ > CLINICA_API_URL > config.json > 既定（メモリ）。

use serde::Deserialize;
use std::time::Duration;

use crate::domain::BaseUrl;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// ストアの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// サンプルデータで初期化したメモリ上の配列
    Memory,
    Http { base_url: BaseUrl },
}

/// 解決済みの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicaConfig {
    pub backend: Backend,
    pub timeout: Duration,
}

impl Default for ClinicaConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// serde 用の内部構造
#[derive(Debug, Deserialize)]
struct ClinicaConfigRaw {
    backend: Option<BackendKindSerde>,
    #[serde(alias = "api_url")]
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BackendKindSerde {
    #[serde(alias = "mock")]
    Memory,
    #[serde(alias = "rest")]
    Http,
}

/// 上書き用の入力（CLI と環境変数）
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// --api-url
    pub api_url: Option<String>,
    /// --memory（他の指定より優先）
    pub force_memory: bool,
    /// CLINICA_API_URL
    pub env_api_url: Option<String>,
}

impl ClinicaConfig {
    /// JSON 文字列からパース（ファイル読みは呼び出し側で行う）
    ///
    /// backend 未指定で base_url があれば http とみなす。
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: ClinicaConfigRaw = serde_json::from_str(json)?;
        let base_url = raw
            .base_url
            .filter(|s| !s.trim().is_empty())
            .map(BaseUrl::new);
        let backend = match (raw.backend, base_url) {
            (Some(BackendKindSerde::Memory), _) | (None, None) => Backend::Memory,
            (Some(BackendKindSerde::Http), None) => {
                return Err(serde::de::Error::custom(
                    "backend \"http\" requires \"base_url\"",
                ))
            }
            (_, Some(base_url)) => Backend::Http { base_url },
        };
        Ok(Self {
            backend,
            timeout: Duration::from_secs(raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    /// CLI / 環境変数の指定を重ねる
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if overrides.force_memory {
            self.backend = Backend::Memory;
        } else if let Some(url) = overrides.api_url.as_ref().or(overrides.env_api_url.as_ref()) {
            self.backend = Backend::Http {
                base_url: BaseUrl::new(url.as_str()),
            };
        }
        self
    }
}
