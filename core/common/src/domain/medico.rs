//! 医師レコード（フラット形）と専門分野

use serde::{Deserialize, Serialize};

use super::record::{contains_ignore_case, FieldName, Record, RecordId, RecordKind};

/// 専門分野（選択肢は固定、先頭が新規作成時の既定値）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Especialidade {
    Cardiologia,
    Pediatria,
    Dermatologia,
    Ginecologia,
    Neurologia,
    Oftalmologia,
    ClinicaGeral,
}

/// ピッカーに並べるラベル（`Especialidade::ALL` と同順）
pub const ESPECIALIDADE_LABELS: [&str; 7] = [
    "Cardiologia",
    "Pediatria",
    "Dermatologia",
    "Ginecologia",
    "Neurologia",
    "Oftalmologia",
    "Clínica Geral",
];

impl Especialidade {
    pub const ALL: [Especialidade; 7] = [
        Self::Cardiologia,
        Self::Pediatria,
        Self::Dermatologia,
        Self::Ginecologia,
        Self::Neurologia,
        Self::Oftalmologia,
        Self::ClinicaGeral,
    ];

    /// 画面表示用ラベル
    pub fn label(self) -> &'static str {
        match self {
            Self::Cardiologia => "Cardiologia",
            Self::Pediatria => "Pediatria",
            Self::Dermatologia => "Dermatologia",
            Self::Ginecologia => "Ginecologia",
            Self::Neurologia => "Neurologia",
            Self::Oftalmologia => "Oftalmologia",
            Self::ClinicaGeral => "Clínica Geral",
        }
    }

    /// バックエンドの enum 名
    pub fn code(self) -> &'static str {
        match self {
            Self::Cardiologia => "CARDIOLOGIA",
            Self::Pediatria => "PEDIATRIA",
            Self::Dermatologia => "DERMATOLOGIA",
            Self::Ginecologia => "GINECOLOGIA",
            Self::Neurologia => "NEUROLOGIA",
            Self::Oftalmologia => "OFTALMOLOGIA",
            Self::ClinicaGeral => "CLINICA_GERAL",
        }
    }

    /// ラベルまたはコードから解決する（大文字小文字は無視）
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|e| {
            e.label().to_lowercase() == s.to_lowercase() || e.code().eq_ignore_ascii_case(s)
        })
    }
}

/// 医師のフィールド名
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MedicoField {
    Nome,
    Especialidade,
    Crm,
    Email,
    Telefone,
    Logradouro,
    Numero,
    Complemento,
    Bairro,
    Cidade,
    Uf,
    Cep,
}

impl FieldName for MedicoField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Nome => "nome",
            Self::Especialidade => "especialidade",
            Self::Crm => "crm",
            Self::Email => "email",
            Self::Telefone => "telefone",
            Self::Logradouro => "logradouro",
            Self::Numero => "numero",
            Self::Complemento => "complemento",
            Self::Bairro => "bairro",
            Self::Cidade => "cidade",
            Self::Uf => "uf",
            Self::Cep => "cep",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Nome => "Nome Completo",
            Self::Especialidade => "Especialidade",
            Self::Crm => "CRM",
            Self::Email => "Email",
            Self::Telefone => "Telefone Celular",
            Self::Logradouro => "Logradouro",
            Self::Numero => "Número",
            Self::Complemento => "Complemento",
            Self::Bairro => "Bairro",
            Self::Cidade => "Cidade",
            Self::Uf => "UF",
            Self::Cep => "CEP",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        Medico::FIELDS.iter().copied().find(|f| f.as_str() == name)
    }
}

/// 医師（住所はフラットに展開済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medico {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub nome: String,
    pub especialidade: String,
    pub crm: String,
    pub email: String,
    pub telefone: String,
    pub logradouro: String,
    pub numero: String,
    #[serde(default)]
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
    pub cep: String,
    #[serde(default = "default_active")]
    pub ativo: bool,
}

pub(crate) fn default_active() -> bool {
    true
}

impl Record for Medico {
    type Field = MedicoField;

    const KIND: RecordKind = RecordKind::Medico;

    const FIELDS: &'static [MedicoField] = &[
        MedicoField::Nome,
        MedicoField::Especialidade,
        MedicoField::Crm,
        MedicoField::Email,
        MedicoField::Telefone,
        MedicoField::Logradouro,
        MedicoField::Numero,
        MedicoField::Complemento,
        MedicoField::Bairro,
        MedicoField::Cidade,
        MedicoField::Uf,
        MedicoField::Cep,
    ];

    // complemento は任意
    const REQUIRED_FIELDS: &'static [MedicoField] = &[
        MedicoField::Nome,
        MedicoField::Especialidade,
        MedicoField::Crm,
        MedicoField::Email,
        MedicoField::Telefone,
        MedicoField::Logradouro,
        MedicoField::Numero,
        MedicoField::Bairro,
        MedicoField::Cidade,
        MedicoField::Uf,
        MedicoField::Cep,
    ];

    fn blank() -> Self {
        Self {
            id: None,
            nome: String::new(),
            especialidade: Especialidade::ALL[0].label().to_string(),
            crm: String::new(),
            email: String::new(),
            telefone: String::new(),
            logradouro: String::new(),
            numero: String::new(),
            complemento: String::new(),
            bairro: String::new(),
            cidade: String::new(),
            uf: String::new(),
            cep: String::new(),
            ativo: true,
        }
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn is_active(&self) -> bool {
        self.ativo
    }

    fn set_active(&mut self, active: bool) {
        self.ativo = active;
    }

    fn name_field() -> MedicoField {
        MedicoField::Nome
    }

    fn field(&self, field: MedicoField) -> &str {
        match field {
            MedicoField::Nome => &self.nome,
            MedicoField::Especialidade => &self.especialidade,
            MedicoField::Crm => &self.crm,
            MedicoField::Email => &self.email,
            MedicoField::Telefone => &self.telefone,
            MedicoField::Logradouro => &self.logradouro,
            MedicoField::Numero => &self.numero,
            MedicoField::Complemento => &self.complemento,
            MedicoField::Bairro => &self.bairro,
            MedicoField::Cidade => &self.cidade,
            MedicoField::Uf => &self.uf,
            MedicoField::Cep => &self.cep,
        }
    }

    fn set_field(&mut self, field: MedicoField, value: String) {
        let slot = match field {
            MedicoField::Nome => &mut self.nome,
            MedicoField::Especialidade => &mut self.especialidade,
            MedicoField::Crm => &mut self.crm,
            MedicoField::Email => &mut self.email,
            MedicoField::Telefone => &mut self.telefone,
            MedicoField::Logradouro => &mut self.logradouro,
            MedicoField::Numero => &mut self.numero,
            MedicoField::Complemento => &mut self.complemento,
            MedicoField::Bairro => &mut self.bairro,
            MedicoField::Cidade => &mut self.cidade,
            MedicoField::Uf => &mut self.uf,
            MedicoField::Cep => &mut self.cep,
        };
        *slot = value;
    }

    fn choices(field: MedicoField) -> &'static [&'static str] {
        match field {
            MedicoField::Especialidade => &ESPECIALIDADE_LABELS,
            _ => &[],
        }
    }

    /// 名前または専門分野の部分一致（大文字小文字を無視）
    fn matches_query(&self, query: &str) -> bool {
        contains_ignore_case(&self.nome, query) || contains_ignore_case(&self.especialidade, query)
    }
}
