//! レコード共通の型と trait
//!
//! 医師・患者はどちらも「フィールド名 -> 文字列」のフラットな形で扱う。
//! 住所のネスト（`endereco`）はストア境界でのみ現れる。

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::Error;

/// レコード ID（ストアが採番、以後不変）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| Error::invalid_argument(format!("Invalid id: '{}'", s)))
    }
}

/// レコードの種別（表示文言と REST リソース名を持つ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Medico,
    Paciente,
}

impl RecordKind {
    /// REST リソース名（`/medicos`, `/pacientes`）
    pub fn resource(self) -> &'static str {
        match self {
            Self::Medico => "medicos",
            Self::Paciente => "pacientes",
        }
    }

    /// 単数形の名詞
    pub fn noun(self) -> &'static str {
        match self {
            Self::Medico => "médico",
            Self::Paciente => "paciente",
        }
    }

    /// 一覧画面の見出し
    pub fn list_title(self) -> &'static str {
        match self {
            Self::Medico => "Médico(a)s",
            Self::Paciente => "Pacientes",
        }
    }

    /// 一覧が空のときのメッセージ
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Medico => "Nenhum médico encontrado.",
            Self::Paciente => "Nenhum paciente encontrado.",
        }
    }

    pub fn create_title(self) -> &'static str {
        match self {
            Self::Medico => "Novo Cadastro Médico",
            Self::Paciente => "Novo Paciente",
        }
    }

    pub fn edit_title(self) -> &'static str {
        match self {
            Self::Medico => "Editar Perfil Médico",
            Self::Paciente => "Editar Paciente",
        }
    }
}

/// フィールド名の enum が満たす trait
pub trait FieldName: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// ワイヤ・フォーム上の名前（例: "nome", "cep"）
    fn as_str(self) -> &'static str;

    /// 画面上のラベル（例: "Nome Completo"）
    fn label(self) -> &'static str;

    /// 名前から解決する。未知の名前は None。
    fn parse(name: &str) -> Option<Self>;
}

/// フラット形のレコード（医師・患者）
pub trait Record: Clone + PartialEq + Debug + Send + Sync + 'static {
    type Field: FieldName;

    const KIND: RecordKind;

    /// 全フィールド（フォーム表示順）
    const FIELDS: &'static [Self::Field];

    /// 必須フィールド
    const REQUIRED_FIELDS: &'static [Self::Field];

    /// 新規作成時の初期値
    fn blank() -> Self;

    fn id(&self) -> Option<RecordId>;

    /// ストアが採番した ID を設定する
    fn assign_id(&mut self, id: RecordId);

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    fn name(&self) -> &str {
        self.field(Self::name_field())
    }

    /// セクション分けに使う名前フィールド
    fn name_field() -> Self::Field;

    fn field(&self, field: Self::Field) -> &str;

    fn set_field(&mut self, field: Self::Field, value: String);

    /// 選択式フィールドの選択肢。自由入力のフィールドは空。
    fn choices(_field: Self::Field) -> &'static [&'static str] {
        &[]
    }

    /// 検索クエリに一致するか（種別ごとの規則）
    fn matches_query(&self, query: &str) -> bool;
}

/// 大文字小文字を無視した部分一致
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_parse() {
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::new(42));
        assert_eq!(" 7 ".parse::<RecordId>().unwrap().get(), 7);
        assert!("abc".parse::<RecordId>().unwrap_err().is_usage());
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::new(101).to_string(), "101");
        assert_eq!(format!("[{:>4}]", RecordId::new(7)), "[   7]");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Cardiologista", "CARDIO"));
        assert!(contains_ignore_case("Antônio", "antÔ"));
        assert!(contains_ignore_case("any", ""));
        assert!(!contains_ignore_case("Pediatra", "derma"));
    }
}
