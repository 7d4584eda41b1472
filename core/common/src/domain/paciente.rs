//! 患者レコード（フラット形）

use serde::{Deserialize, Serialize};

use super::medico::default_active;
use super::record::{contains_ignore_case, FieldName, Record, RecordId, RecordKind};

/// 患者のフィールド名
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PacienteField {
    Nome,
    Cpf,
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

impl FieldName for PacienteField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Nome => "nome",
            Self::Cpf => "cpf",
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
            Self::Cpf => "CPF",
            Self::Email => "Email",
            Self::Telefone => "Telefone",
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
        Paciente::FIELDS.iter().copied().find(|f| f.as_str() == name)
    }
}

/// 患者（住所はフラットに展開済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paciente {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub nome: String,
    pub cpf: String,
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

impl Record for Paciente {
    type Field = PacienteField;

    const KIND: RecordKind = RecordKind::Paciente;

    const FIELDS: &'static [PacienteField] = &[
        PacienteField::Nome,
        PacienteField::Cpf,
        PacienteField::Email,
        PacienteField::Telefone,
        PacienteField::Logradouro,
        PacienteField::Numero,
        PacienteField::Complemento,
        PacienteField::Bairro,
        PacienteField::Cidade,
        PacienteField::Uf,
        PacienteField::Cep,
    ];

    const REQUIRED_FIELDS: &'static [PacienteField] = &[
        PacienteField::Nome,
        PacienteField::Cpf,
        PacienteField::Email,
        PacienteField::Telefone,
        PacienteField::Logradouro,
        PacienteField::Numero,
        PacienteField::Bairro,
        PacienteField::Cidade,
        PacienteField::Uf,
        PacienteField::Cep,
    ];

    fn blank() -> Self {
        Self {
            id: None,
            nome: String::new(),
            cpf: String::new(),
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

    fn name_field() -> PacienteField {
        PacienteField::Nome
    }

    fn field(&self, field: PacienteField) -> &str {
        match field {
            PacienteField::Nome => &self.nome,
            PacienteField::Cpf => &self.cpf,
            PacienteField::Email => &self.email,
            PacienteField::Telefone => &self.telefone,
            PacienteField::Logradouro => &self.logradouro,
            PacienteField::Numero => &self.numero,
            PacienteField::Complemento => &self.complemento,
            PacienteField::Bairro => &self.bairro,
            PacienteField::Cidade => &self.cidade,
            PacienteField::Uf => &self.uf,
            PacienteField::Cep => &self.cep,
        }
    }

    fn set_field(&mut self, field: PacienteField, value: String) {
        let slot = match field {
            PacienteField::Nome => &mut self.nome,
            PacienteField::Cpf => &mut self.cpf,
            PacienteField::Email => &mut self.email,
            PacienteField::Telefone => &mut self.telefone,
            PacienteField::Logradouro => &mut self.logradouro,
            PacienteField::Numero => &mut self.numero,
            PacienteField::Complemento => &mut self.complemento,
            PacienteField::Bairro => &mut self.bairro,
            PacienteField::Cidade => &mut self.cidade,
            PacienteField::Uf => &mut self.uf,
            PacienteField::Cep => &mut self.cep,
        };
        *slot = value;
    }

    /// 名前は大文字小文字を無視、CPF はそのままの部分一致
    fn matches_query(&self, query: &str) -> bool {
        contains_ignore_case(&self.nome, query) || self.cpf.contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paciente(nome: &str, cpf: &str) -> Paciente {
        let mut p = Paciente::blank();
        p.nome = nome.to_string();
        p.cpf = cpf.to_string();
        p
    }

    #[test]
    fn test_blank_is_all_empty() {
        let p = Paciente::blank();
        for f in Paciente::FIELDS {
            assert_eq!(p.field(*f), "");
        }
        assert!(p.ativo);
    }

    #[test]
    fn test_complemento_is_optional() {
        assert!(!Paciente::REQUIRED_FIELDS.contains(&PacienteField::Complemento));
        assert_eq!(Paciente::REQUIRED_FIELDS.len(), 10);
    }

    #[test]
    fn test_matches_query_cpf_is_literal() {
        let p = paciente("Pedro Alves", "123.456.789-00");
        assert!(p.matches_query("456.789"));
        assert!(p.matches_query("pedro"));
        assert!(!p.matches_query("456789"));
    }
}
