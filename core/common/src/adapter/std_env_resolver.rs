//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::{Dirs, HomeDir};
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "clinica";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn home() -> Result<PathBuf, Error> {
    non_empty_var("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| Error::env("HOME is not set"))
}

impl EnvResolver for StdEnvResolver {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        if let Some(h) = non_empty_var("CLINICA_HOME") {
            return Ok(HomeDir::new(PathBuf::from(h)));
        }
        let config_base = match non_empty_var("XDG_CONFIG_HOME") {
            Some(x) => PathBuf::from(x),
            None => home()?.join(".config"),
        };
        Ok(HomeDir::new(config_base.join(APP_DIR)))
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        if let Some(h) = non_empty_var("CLINICA_HOME") {
            let root = PathBuf::from(h);
            return Ok(Dirs {
                config_dir: root.clone(),
                state_dir: root.join("state"),
            });
        }
        let config_dir = self.resolve_home_dir()?.to_path_buf();
        let state_base = match non_empty_var("XDG_STATE_HOME") {
            Some(x) => PathBuf::from(x),
            None => home()?.join(".local").join("state"),
        };
        Ok(Dirs {
            config_dir,
            state_dir: state_base.join(APP_DIR),
        })
    }

    fn api_url(&self) -> Option<String> {
        non_empty_var("CLINICA_API_URL")
    }
}
