//! ドメイン型（Newtype、enum、レコード）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

pub mod dirs;
pub mod medico;
pub mod paciente;
pub mod record;
pub mod sample;

use std::path::{Path, PathBuf};

pub use dirs::Dirs;
pub use medico::{Especialidade, Medico, MedicoField, ESPECIALIDADE_LABELS};
pub use paciente::{Paciente, PacienteField};
pub use record::{FieldName, Record, RecordId, RecordKind};

/// ホームディレクトリのパス（CLINICA_HOME 等から解決）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HomeDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

/// バックエンドのベース URL（末尾の `/` は除去済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn new(s: impl Into<String>) -> Self {
        let s: String = s.into();
        Self(s.trim().trim_end_matches('/').to_string())
    }

    /// `{base}/{segments...}` を組み立てる
    pub fn join(&self, segments: &[&str]) -> String {
        let mut url = self.0.clone();
        for s in segments {
            url.push('/');
            url.push_str(s.trim_matches('/'));
        }
        url
    }
}

impl std::ops::Deref for BaseUrl {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_join() {
        let base = BaseUrl::new("http://localhost:8080/ ");
        assert_eq!(&*base, "http://localhost:8080");
        assert_eq!(base.join(&["medicos", "cadastro"]), "http://localhost:8080/medicos/cadastro");
        assert_eq!(base.join(&["/pacientes/", "7"]), "http://localhost:8080/pacientes/7");
    }
}
