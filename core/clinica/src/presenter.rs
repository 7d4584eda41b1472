//! 画面表示用の文字列組み立て（カード・詳細・フォーム・通知）
//!
//! ここでは文字列を作るだけで、出力先への書き込みは呼び出し側が行う。

use std::io::Write;

use common::domain::{FieldName, Medico, Paciente, Record};
use common::error::Error;
use common::form::{FormEditor, Notice};
use common::list::Section;

/// 住所（フラット形のフィールドへの参照）
pub struct Address<'a> {
    pub logradouro: &'a str,
    pub numero: &'a str,
    pub complemento: &'a str,
    pub bairro: &'a str,
    pub cidade: &'a str,
    pub uf: &'a str,
    pub cep: &'a str,
}

impl Address<'_> {
    fn is_empty(&self) -> bool {
        [
            self.logradouro,
            self.numero,
            self.bairro,
            self.cidade,
            self.uf,
            self.cep,
        ]
        .iter()
        .all(|s| s.is_empty())
    }

    /// `logradouro, numero` に、complemento があれば ` - complemento` を付ける
    pub fn street_line(&self) -> String {
        if self.is_empty() {
            return "Endereço indisponível.".to_string();
        }
        if self.complemento.is_empty() {
            format!("{}, {}", self.logradouro, self.numero)
        } else {
            format!("{}, {} - {}", self.logradouro, self.numero, self.complemento)
        }
    }

    pub fn city_line(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("{}, {}/{} - CEP: {}", self.bairro, self.cidade, self.uf, self.cep)
    }
}

/// 一覧カードと詳細の表示内容（種別ごと）
pub trait CardView: Record {
    /// 名前の下に出す 1 行
    fn summary(&self) -> String;

    /// 詳細の住所見出し
    fn address_header() -> &'static str;

    fn address(&self) -> Address<'_>;

    fn email(&self) -> &str;

    fn telefone(&self) -> &str;
}

impl CardView for Medico {
    fn summary(&self) -> String {
        format!("{} | CRM: {}", self.especialidade, self.crm)
    }

    fn address_header() -> &'static str {
        "Endereço Profissional"
    }

    fn address(&self) -> Address<'_> {
        Address {
            logradouro: &self.logradouro,
            numero: &self.numero,
            complemento: &self.complemento,
            bairro: &self.bairro,
            cidade: &self.cidade,
            uf: &self.uf,
            cep: &self.cep,
        }
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn telefone(&self) -> &str {
        &self.telefone
    }
}

impl CardView for Paciente {
    fn summary(&self) -> String {
        format!("CPF: {}", self.cpf)
    }

    fn address_header() -> &'static str {
        "Endereço Completo"
    }

    fn address(&self) -> Address<'_> {
        Address {
            logradouro: &self.logradouro,
            numero: &self.numero,
            complemento: &self.complemento,
            bairro: &self.bairro,
            cidade: &self.cidade,
            uf: &self.uf,
            cep: &self.cep,
        }
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn telefone(&self) -> &str {
        &self.telefone
    }
}

fn id_label<R: Record>(record: &R) -> String {
    record
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// セクション一覧。空なら種別ごとの「見つかりません」メッセージ。
pub fn render_sections<R: CardView>(sections: &[Section<R>]) -> String {
    if sections.is_empty() {
        return format!("{}\n", R::KIND.empty_message());
    }
    let mut out = String::new();
    for section in sections {
        out.push_str(&format!("== {} ==\n", section.title));
        for item in &section.items {
            out.push_str(&format!("  [{}] {}\n", id_label(item), item.name()));
            out.push_str(&format!("      {}\n", item.summary()));
        }
    }
    out
}

/// カードを展開したときの詳細
pub fn render_detail<R: CardView>(record: &R) -> String {
    let address = record.address();
    let status = if record.is_active() { "" } else { " (inativo)" };
    let mut out = format!("[{}] {}{}\n", id_label(record), record.name(), status);
    out.push_str(&format!("  {}\n", record.summary()));
    out.push_str("Informações de Contato\n");
    out.push_str(&format!("  Email: {}\n", record.email()));
    out.push_str(&format!("  Telefone: {}\n", record.telefone()));
    out.push_str(&format!("{}\n", R::address_header()));
    out.push_str(&format!("  Logradouro: {}\n", address.street_line()));
    out.push_str(&format!("  Local: {}\n", address.city_line()));
    out
}

/// フォーム全体（ラベル・値・フィールドごとのエラー）
pub fn render_form<R: Record>(form: &FormEditor<R>) -> String {
    let mut out = format!("{}\n", form.title());
    for field in R::FIELDS {
        let mark = if R::REQUIRED_FIELDS.contains(field) { "*" } else { "" };
        out.push_str(&format!(
            "  {:<12} {}{}: {}\n",
            field.as_str(),
            field.label(),
            mark,
            form.draft().field(*field)
        ));
        let choices = R::choices(*field);
        if !choices.is_empty() {
            out.push_str(&format!("  {:<12}   ({})\n", "", choices.join(" | ")));
        }
        if let Some(msg) = form.error(*field) {
            out.push_str(&format!("  {:<12}   ! {}\n", "", msg));
        }
    }
    out.push_str(&format!("[{}]\n", form.submit_label()));
    out
}

/// 検証エラーだけを並べる（CLI の拒否時）
pub fn render_field_errors<R: Record>(form: &FormEditor<R>) -> String {
    form.errors()
        .iter()
        .map(|(field, msg)| format!("  {} ({}): {}\n", field.label(), field.as_str(), msg))
        .collect()
}

pub fn render_notice(notice: &Notice) -> String {
    format!("{}: {}\n", notice.title, notice.message)
}

/// 出力先へ書き込む（I/O エラーは Error::Io）
pub fn write_text<W: Write + ?Sized>(out: &mut W, text: &str) -> Result<(), Error> {
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| Error::io_msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::domain::{sample, MedicoField};
    use common::list::derive_sections;

    #[test]
    fn test_address_lines_with_and_without_complemento() {
        let pacientes = sample::pacientes();
        let alice = pacientes[1].address();
        assert_eq!(alice.street_line(), "Av. Y, 1500 - Apto 502");
        assert_eq!(alice.city_line(), "Jardins, São Paulo/SP - CEP: 01414-000");
        let pedro = pacientes[0].address();
        assert_eq!(pedro.street_line(), "Rua X, 50");
    }

    #[test]
    fn test_missing_address_is_unavailable() {
        let p = Paciente::blank();
        assert_eq!(p.address().street_line(), "Endereço indisponível.");
        assert_eq!(p.address().city_line(), "");
    }

    #[test]
    fn test_render_sections() {
        let sections = derive_sections(&sample::medicos(), "oliveira");
        let text = render_sections(&sections);
        assert!(text.starts_with(
            "== A ==\n  [2] Antônio de Oliveira\n      Pediatra | CRM: 23456/MG\n"
        ));
        assert!(text.contains("== J ==\n  [1] João de Oliveira\n"));
        assert!(!text.contains("Maria"));
    }

    #[test]
    fn test_render_empty_sections() {
        let sections = derive_sections(&sample::pacientes(), "zzz");
        assert_eq!(render_sections(&sections), "Nenhum paciente encontrado.\n");
    }

    #[test]
    fn test_render_detail() {
        let mut m = sample::medicos()[1].clone();
        m.ativo = false;
        let text = render_detail(&m);
        assert!(text.starts_with("[2] Antônio de Oliveira (inativo)\n"));
        assert!(text.contains("Endereço Profissional\n  Logradouro: Av. B, 200 - Sala 1\n"));
        assert!(text.contains("  Local: Funcionários, BH/MG - CEP: 30110-002\n"));
    }

    #[test]
    fn test_render_form_shows_errors_and_choices() {
        let mut form = FormEditor::<Medico>::new(None);
        form.validate();
        form.set_field(MedicoField::Nome, "Ana");
        let text = render_form(&form);
        assert!(text.starts_with("Novo Cadastro Médico\n"));
        assert!(text.contains("Nome Completo*: Ana\n"));
        assert!(text.contains("Complemento: \n"));
        assert!(text.contains("Cardiologia | Pediatria"));
        assert!(text.ends_with("[Concluir Cadastro]\n"));
        // especialidade は既定値あり、nome は入力済み
        assert_eq!(text.matches("! Campo Obrigatório").count(), 9);
        assert_eq!(render_field_errors(&form).lines().count(), 9);
    }
}
