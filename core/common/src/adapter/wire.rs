//! REST バックエンドとの JSON 形（住所は `endereco` にネスト）
//!
//! フラット形 <-> ネスト形の変換はここだけで行う。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Especialidade, Medico, Paciente, Record, RecordId};
use crate::error::Error;

/// null と欠落を空文字として読む
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnderecoWire {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logradouro: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub numero: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub complemento: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bairro: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cidade: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uf: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cep: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicoWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub telefone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub crm: String,
    /// バックエンドの enum 名（例: CARDIOLOGIA）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub especialidade: String,
    #[serde(default)]
    pub endereco: Option<EnderecoWire>,
    #[serde(default, skip_serializing)]
    pub ativo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacienteWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub telefone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cpf: String,
    #[serde(default)]
    pub endereco: Option<EnderecoWire>,
    #[serde(default, skip_serializing)]
    pub ativo: Option<bool>,
}

/// 一覧応答: Spring のページ（`content`）または素の配列
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page {
        content: Vec<T>,
        #[serde(default)]
        last: Option<bool>,
        #[serde(default, rename = "totalPages")]
        total_pages: Option<u64>,
    },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    /// `page`（0 始まり）の次のページがあるか。`last` を優先し、無ければ `totalPages` で判断する。
    pub fn has_next(&self, page: u64) -> bool {
        match self {
            Self::Page {
                content,
                last,
                total_pages,
            } => {
                if content.is_empty() {
                    return false;
                }
                match (last, total_pages) {
                    (Some(last), _) => !last,
                    (None, Some(total)) => page + 1 < *total,
                    (None, None) => false,
                }
            }
            Self::Bare(_) => false,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page { content, .. } => content,
            Self::Bare(items) => items,
        }
    }
}

/// ネスト形との相互変換ができるレコード
pub trait WireRecord: Record {
    type Wire: Serialize + DeserializeOwned + Send;

    /// 送信前の変換。バックエンドが受け付けない値はここで弾く。
    fn to_wire(&self) -> Result<Self::Wire, Error>;

    fn from_wire(wire: Self::Wire) -> Self;
}

impl WireRecord for Medico {
    type Wire = MedicoWire;

    fn to_wire(&self) -> Result<MedicoWire, Error> {
        let especialidade = Especialidade::parse(&self.especialidade).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown especialidade '{}' (expected one of: {})",
                self.especialidade,
                Especialidade::ALL
                    .iter()
                    .map(|e| e.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;
        Ok(MedicoWire {
            id: self.id.map(RecordId::get),
            nome: self.nome.clone(),
            email: self.email.clone(),
            telefone: self.telefone.clone(),
            crm: self.crm.clone(),
            especialidade: especialidade.code().to_string(),
            endereco: Some(EnderecoWire {
                logradouro: self.logradouro.clone(),
                numero: self.numero.clone(),
                complemento: self.complemento.clone(),
                bairro: self.bairro.clone(),
                cidade: self.cidade.clone(),
                uf: self.uf.clone(),
                cep: self.cep.clone(),
            }),
            ativo: None,
        })
    }

    fn from_wire(wire: MedicoWire) -> Self {
        let e = wire.endereco.unwrap_or_default();
        let especialidade = Especialidade::parse(&wire.especialidade)
            .map(|esp| esp.label().to_string())
            .unwrap_or(wire.especialidade);
        Medico {
            id: wire.id.map(RecordId::new),
            nome: wire.nome,
            especialidade,
            crm: wire.crm,
            email: wire.email,
            telefone: wire.telefone,
            logradouro: e.logradouro,
            numero: e.numero,
            complemento: e.complemento,
            bairro: e.bairro,
            cidade: e.cidade,
            uf: e.uf,
            cep: e.cep,
            ativo: wire.ativo.unwrap_or(true),
        }
    }
}

impl WireRecord for Paciente {
    type Wire = PacienteWire;

    fn to_wire(&self) -> Result<PacienteWire, Error> {
        Ok(PacienteWire {
            id: self.id.map(RecordId::get),
            nome: self.nome.clone(),
            email: self.email.clone(),
            telefone: self.telefone.clone(),
            cpf: self.cpf.clone(),
            endereco: Some(EnderecoWire {
                logradouro: self.logradouro.clone(),
                numero: self.numero.clone(),
                complemento: self.complemento.clone(),
                bairro: self.bairro.clone(),
                cidade: self.cidade.clone(),
                uf: self.uf.clone(),
                cep: self.cep.clone(),
            }),
            ativo: None,
        })
    }

    fn from_wire(wire: PacienteWire) -> Self {
        let e = wire.endereco.unwrap_or_default();
        Paciente {
            id: wire.id.map(RecordId::new),
            nome: wire.nome,
            cpf: wire.cpf,
            email: wire.email,
            telefone: wire.telefone,
            logradouro: e.logradouro,
            numero: e.numero,
            complemento: e.complemento,
            bairro: e.bairro,
            cidade: e.cidade,
            uf: e.uf,
            cep: e.cep,
            ativo: wire.ativo.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample;
    use serde_json::json;

    #[test]
    fn test_medico_to_wire_nests_endereco_and_uses_code() {
        let mut m = sample::medicos().remove(1);
        m.especialidade = "Clínica Geral".to_string();
        let v = serde_json::to_value(m.to_wire().unwrap()).unwrap();
        assert_eq!(v["id"], 2);
        assert_eq!(v["especialidade"], "CLINICA_GERAL");
        assert_eq!(v["endereco"]["complemento"], "Sala 1");
        assert_eq!(v["endereco"]["cep"], "30110-002");
        assert!(v.get("logradouro").is_none());
        assert!(v.get("ativo").is_none());
    }

    #[test]
    fn test_medico_to_wire_rejects_unknown_especialidade() {
        // サンプルの "Cardiologista" はバックエンドの選択肢にない
        let m = sample::medicos().remove(0);
        let err = m.to_wire().unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("Cardiologista"));
    }

    #[test]
    fn test_new_record_has_no_id_on_wire() {
        let v = serde_json::to_value(Paciente::blank().to_wire().unwrap()).unwrap();
        assert!(v.get("id").is_none());
    }

    #[test]
    fn test_medico_from_wire_flattens() {
        let wire: MedicoWire = serde_json::from_value(json!({
            "id": 7,
            "nome": "Ana",
            "email": "ana@x.com",
            "telefone": "1",
            "crm": "7/MG",
            "especialidade": "NEUROLOGIA",
            "endereco": { "logradouro": "R", "numero": "1", "complemento": null,
                          "bairro": "B", "cidade": "C", "uf": "MG", "cep": "0" }
        }))
        .unwrap();
        let m = Medico::from_wire(wire);
        assert_eq!(m.id, Some(RecordId::new(7)));
        assert_eq!(m.especialidade, "Neurologia");
        assert_eq!(m.logradouro, "R");
        assert_eq!(m.complemento, "");
        assert!(m.ativo);
    }

    #[test]
    fn test_missing_endereco_flattens_to_empty() {
        let wire: PacienteWire =
            serde_json::from_value(json!({ "id": 1, "nome": "Zeca", "cpf": "1", "ativo": false }))
                .unwrap();
        let p = Paciente::from_wire(wire);
        assert_eq!(p.cidade, "");
        assert!(!p.ativo);
    }

    #[test]
    fn test_listing_accepts_page_and_bare_array() {
        let page: Listing<PacienteWire> =
            serde_json::from_str(r#"{"content":[{"id":1,"nome":"A"}],"totalElements":1}"#).unwrap();
        assert_eq!(page.into_items().len(), 1);
        let bare: Listing<PacienteWire> = serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert!(!bare.has_next(0));
        assert_eq!(bare.into_items().len(), 2);
    }

    #[test]
    fn test_listing_next_page_detection() {
        let parse = |s: &str| serde_json::from_str::<Listing<PacienteWire>>(s).unwrap();
        assert!(parse(r#"{"content":[{"id":1}],"last":false,"totalPages":2}"#).has_next(0));
        assert!(!parse(r#"{"content":[{"id":2}],"last":true,"totalPages":2}"#).has_next(1));
        assert!(parse(r#"{"content":[{"id":1}],"totalPages":3}"#).has_next(1));
        assert!(!parse(r#"{"content":[{"id":1}],"totalPages":3}"#).has_next(2));
        assert!(!parse(r#"{"content":[],"last":false}"#).has_next(0));
        assert!(!parse(r#"{"content":[{"id":1}]}"#).has_next(0));
    }
}
