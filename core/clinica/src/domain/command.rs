//! clinica コマンドの enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、match でディスパッチする。

use common::domain::{RecordId, RecordKind};

/// clinica のサブコマンド
///
/// コマンドなし = 対話シェル起動。それ以外は `<medicos|pacientes> <action> [args...]`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// ヘルプ表示
    Help,

    /// 対話シェルを起動（コマンド未指定時）
    Shell,

    /// 医師・患者に対する操作
    Record { kind: RecordKind, action: RecordAction },

    /// 引数が足りない・ID が数値でない等（使い方エラー用）
    Invalid(String),

    /// 未知のコマンド（エラー用）
    Unknown(String),
}

/// レコードに対する操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAction {
    /// listar [consulta]
    List { query: String },
    /// ver <id>
    Show { id: RecordId },
    /// novo campo=valor...
    Create { assignments: Vec<String> },
    /// editar <id> campo=valor...
    Edit { id: RecordId, assignments: Vec<String> },
    /// desativar <id>（論理削除）
    Deactivate { id: RecordId },
}

impl RecordAction {
    /// ログ用の操作名
    pub fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "listar",
            Self::Show { .. } => "ver",
            Self::Create { .. } => "novo",
            Self::Edit { .. } => "editar",
            Self::Deactivate { .. } => "desativar",
        }
    }
}

/// リソース名から種別を得る
pub fn kind_from_name(name: &str) -> Option<RecordKind> {
    match name {
        "medicos" => Some(RecordKind::Medico),
        "pacientes" => Some(RecordKind::Paciente),
        _ => None,
    }
}

impl Command {
    /// リソース名と引数から Command に解析する（args[0] が操作名）
    pub fn parse_with_args(name: &str, args: &[String]) -> Self {
        let Some(kind) = kind_from_name(name) else {
            return Command::Unknown(name.to_string());
        };
        let sub = args.first().map(|s| s.as_str()).unwrap_or("");
        let rest = args.get(1..).unwrap_or(&[]);
        let action = match sub {
            "listar" => Ok(RecordAction::List {
                query: rest.join(" "),
            }),
            "ver" => parse_id(name, sub, rest).map(|id| RecordAction::Show { id }),
            "novo" => Ok(RecordAction::Create {
                assignments: rest.to_vec(),
            }),
            "editar" => parse_id(name, sub, rest).map(|id| RecordAction::Edit {
                id,
                assignments: rest[1..].to_vec(),
            }),
            "desativar" => parse_id(name, sub, rest).map(|id| RecordAction::Deactivate { id }),
            _ => return Command::Unknown(format!("{} {}", name, sub).trim_end().to_string()),
        };
        match action {
            Ok(action) => Command::Record { kind, action },
            Err(msg) => Command::Invalid(msg),
        }
    }
}

fn parse_id(name: &str, sub: &str, rest: &[String]) -> Result<RecordId, String> {
    let raw = rest
        .first()
        .ok_or_else(|| format!("{} {} requires an id", name, sub))?;
    raw.parse::<RecordId>().map_err(|e| e.to_string())
}
