//! 対話シェル（スプラッシュ → メニュー → 一覧 → フォーム）
//!
//! 入力は任意の `BufRead`、出力は任意の `Write`。ストアのエラーは表示して続行する。

use std::io::{BufRead, Write};

use common::domain::{RecordId, RecordKind};
use common::error::Error;
use common::form::{Navigation, SubmitOutcome};
use common::list::count_items;

use crate::presenter::{
    render_detail, render_field_errors, render_form, render_notice, render_sections, write_text,
    CardView,
};
use crate::usecase::{apply_assignment, RecordUseCases};
use crate::wiring::App;

const SPLASH: &str = "\
+--------------------------------+
|            CLÍNICA             |
|    Gerenciando sua Clínica     |
+--------------------------------+
";

const MENU_HELP: &str = "\
Escolha qual seção deseja iniciar.
  medicos     Médico(a)s
  pacientes   Pacientes
  sair        Encerrar
";

const LIST_HELP: &str = "\
  buscar <texto>    Filtrar por nome (e especialidade / CPF)
  ver <id>          Detalhes
  novo              Novo cadastro
  editar <id>       Editar cadastro
  desativar <id>    Desativar perfil
  voltar            Voltar ao menu
  sair              Encerrar
";

const FORM_HELP: &str = "\
  campo=valor       Preencher um campo
  salvar            Concluir (validar e salvar)
  cancelar          Descartar e voltar
  mostrar           Mostrar o formulário
  novo              Recomeçar como novo cadastro
  editar <id>       Trocar para outro cadastro
  sair              Encerrar
";

/// 画面を抜けたあとの行き先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Back,
    Quit,
}

struct Io<'a> {
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
}

impl Io<'_> {
    fn say(&mut self, text: &str) -> Result<(), Error> {
        write_text(self.out, text)
    }

    /// プロンプトを出して 1 行読む（改行だけ除く）。EOF なら None。
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>, Error> {
        self.say(prompt)?;
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// ストア等の失敗を表示する（シェルは続行）
    fn report(&mut self, e: &Error) -> Result<(), Error> {
        self.say(&format!("Erro: {}\n", e))
    }
}

/// コマンド語と残りに分ける。残りは区切りの空白 1 文字だけを除いてそのまま返す。
fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    line.split_once(char::is_whitespace).unwrap_or((line, ""))
}

fn parse_id(io: &mut Io<'_>, raw: &str) -> Result<Option<RecordId>, Error> {
    match raw.parse::<RecordId>() {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            io.report(&e)?;
            Ok(None)
        }
    }
}

/// 対話シェルを実行する。戻り値は終了コード。
pub fn run(app: &App, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<i32, Error> {
    let mut io = Io { input, out };
    io.say(SPLASH)?;
    io.say(MENU_HELP)?;
    loop {
        let Some(line) = io.prompt("menu> ")? else {
            return Ok(0);
        };
        let flow = match line.trim() {
            "" => continue,
            "medicos" => list_screen(&app.medicos, &mut io)?,
            "pacientes" => list_screen(&app.pacientes, &mut io)?,
            "sair" => return Ok(0),
            "ajuda" | "?" => {
                io.say(MENU_HELP)?;
                continue;
            }
            other => {
                io.say(&format!("Comando desconhecido: {}\n", other))?;
                continue;
            }
        };
        match flow {
            Flow::Back => io.say(MENU_HELP)?,
            Flow::Quit => return Ok(0),
        }
    }
}

fn show_list<R: CardView>(
    uc: &RecordUseCases<R>,
    io: &mut Io<'_>,
    query: &str,
) -> Result<(), Error> {
    io.say(&format!("--- {} ---\n", R::KIND.list_title()))?;
    match uc.list.list(query) {
        Ok(sections) if sections.is_empty() => io.say(&render_sections(&sections)),
        Ok(sections) => {
            io.say(&render_sections(&sections))?;
            io.say(&format!("({} ativo(s))\n", count_items(&sections)))
        }
        Err(e) => io.report(&e),
    }
}

fn resource_prompt(kind: RecordKind) -> String {
    format!("{}> ", kind.resource())
}

fn list_screen<R: CardView>(uc: &RecordUseCases<R>, io: &mut Io<'_>) -> Result<Flow, Error> {
    let mut query = String::new();
    show_list(uc, io, &query)?;
    loop {
        let Some(line) = io.prompt(&resource_prompt(R::KIND))? else {
            return Ok(Flow::Quit);
        };
        let (cmd, rest) = split_command(&line);
        match cmd {
            "" => {}
            "buscar" => {
                query = rest.to_string();
                show_list(uc, io, &query)?;
            }
            "listar" => show_list(uc, io, &query)?,
            "ver" => {
                if let Some(id) = parse_id(io, rest)? {
                    match uc.list.find(id) {
                        Ok(record) => io.say(&render_detail(&record))?,
                        Err(e) => io.report(&e)?,
                    }
                }
            }
            "novo" => {
                if form_screen(uc, io, None)? == Flow::Quit {
                    return Ok(Flow::Quit);
                }
                show_list(uc, io, &query)?;
            }
            "editar" => {
                if let Some(id) = parse_id(io, rest)? {
                    if form_screen(uc, io, Some(id))? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                    show_list(uc, io, &query)?;
                }
            }
            "desativar" => {
                if let Some(id) = parse_id(io, rest)? {
                    if deactivate(uc, io, id)? {
                        show_list(uc, io, &query)?;
                    }
                }
            }
            "voltar" => return Ok(Flow::Back),
            "sair" => return Ok(Flow::Quit),
            "ajuda" | "?" => io.say(LIST_HELP)?,
            other => io.say(&format!("Comando desconhecido: {}\n", other))?,
        }
    }
}

/// 確認してから無効化する。無効化したら true。
fn deactivate<R: CardView>(
    uc: &RecordUseCases<R>,
    io: &mut Io<'_>,
    id: RecordId,
) -> Result<bool, Error> {
    let record = match uc.list.find(id) {
        Ok(r) => r,
        Err(e) => {
            io.report(&e)?;
            return Ok(false);
        }
    };
    let question = format!(
        "Confirmação: Deseja realmente desativar o perfil de {}? [s/N] ",
        record.name()
    );
    let answer = io.prompt(&question)?.unwrap_or_default();
    if !matches!(answer.trim().to_lowercase().as_str(), "s" | "sim") {
        io.say("Cancelado.\n")?;
        return Ok(false);
    }
    match uc.deactivate.deactivate(id) {
        Ok(r) => {
            io.say(&format!("Perfil de {} desativado.\n", r.name()))?;
            Ok(true)
        }
        Err(e) => {
            io.report(&e)?;
            Ok(false)
        }
    }
}

fn form_screen<R: CardView>(
    uc: &RecordUseCases<R>,
    io: &mut Io<'_>,
    id: Option<RecordId>,
) -> Result<Flow, Error> {
    let mut form = match uc.edit.open(id) {
        Ok(f) => f,
        Err(e) => {
            io.report(&e)?;
            return Ok(Flow::Back);
        }
    };
    io.say(&render_form(&form))?;
    loop {
        let Some(line) = io.prompt("form> ")? else {
            return Ok(Flow::Quit);
        };
        let (cmd, rest) = split_command(&line);
        match cmd {
            "" => {}
            "salvar" => match uc.edit.submit(&mut form) {
                Ok(SubmitOutcome::Saved { record, notice }) => {
                    io.say(&render_notice(&notice))?;
                    io.say(&render_detail(&record))?;
                    return Ok(Flow::Back);
                }
                Ok(SubmitOutcome::Rejected { notice }) => {
                    io.say(&render_field_errors(&form))?;
                    io.say(&render_notice(&notice))?;
                }
                Err(e) => io.report(&e)?,
            },
            "cancelar" => match form.cancel() {
                Navigation::Back => return Ok(Flow::Back),
            },
            "mostrar" => io.say(&render_form(&form))?,
            "novo" => {
                if let Err(e) = uc.edit.reopen(&mut form, None) {
                    io.report(&e)?;
                }
                io.say(&render_form(&form))?;
            }
            "editar" => {
                if let Some(id) = parse_id(io, rest)? {
                    match uc.edit.reopen(&mut form, Some(id)) {
                        Ok(_) => io.say(&render_form(&form))?,
                        Err(e) => io.report(&e)?,
                    }
                }
            }
            "sair" => return Ok(Flow::Quit),
            "ajuda" | "?" => io.say(FORM_HELP)?,
            _ if line.contains('=') => {
                if let Err(e) = apply_assignment(&mut form, &line) {
                    io.report(&e)?;
                }
            }
            other => io.say(&format!("Comando desconhecido: {}\n", other))?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::NoopLog;
    use std::io::Cursor;
    use std::sync::Arc;

    fn run_script(app: &App, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let code = run(app, &mut input, &mut out).unwrap();
        assert_eq!(code, 0);
        String::from_utf8(out).unwrap()
    }

    fn app() -> App {
        App::in_memory(Arc::new(NoopLog))
    }

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("buscar de  Oliveira"), ("buscar", "de  Oliveira"));
        assert_eq!(split_command("  buscar  Lima "), ("buscar", " Lima "));
        assert_eq!(split_command("voltar"), ("voltar", ""));
    }

    #[test]
    fn test_eof_at_menu_exits() {
        let out = run_script(&app(), "");
        assert!(out.contains("Gerenciando sua Clínica"));
        assert!(out.ends_with("menu> "));
    }

    #[test]
    fn test_search_in_list_screen() {
        let out = run_script(&app(), "medicos\nbuscar cardio\nvoltar\nsair\n");
        assert!(out.contains("--- Médico(a)s ---"));
        let after_search = out.rsplit("--- Médico(a)s ---").next().unwrap();
        assert!(after_search.contains("== J ==\n  [1] João de Oliveira\n"));
        assert!(!after_search.contains("Maria"));
        assert!(after_search.contains("(1 ativo(s))"));
    }

    #[test]
    fn test_search_keeps_surrounding_spaces_literal() {
        let out = run_script(&app(), "pacientes\nbuscar Pedro \nsair\n");
        let after_search = out.rsplit("--- Pacientes ---").next().unwrap();
        assert!(after_search.contains("[101] Pedro Alves"));

        let out = run_script(&app(), "pacientes\nbuscar Lima \nsair\n");
        let after_search = out.rsplit("--- Pacientes ---").next().unwrap();
        assert!(after_search.contains("Nenhum paciente encontrado."));
    }

    #[test]
    fn test_search_without_match_shows_empty_message() {
        let out = run_script(&app(), "pacientes\nbuscar zzz\nsair\n");
        assert!(out.contains("Nenhum paciente encontrado."));
    }

    #[test]
    fn test_deactivate_requires_confirmation() {
        let a = app();
        let out = run_script(&a, "medicos\ndesativar 3\nn\ndesativar 3\ns\nsair\n");
        assert!(out.contains("Deseja realmente desativar o perfil de Maria da Silva?"));
        assert!(out.contains("Cancelado."));
        assert!(out.contains("Perfil de Maria da Silva desativado."));
        let titles: Vec<String> = a
            .medicos
            .list
            .list("")
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["A", "J"]);
    }

    #[test]
    fn test_form_rejects_then_saves() {
        let a = app();
        let script = "pacientes\nnovo\nnome=Ana Souza\nsalvar\n\
cpf=111.222.333-44\nemail=ana@x.com\ntelefone=1\nlogradouro=Rua\nnumero=1\n\
bairro=B\ncidade=C\nuf=SP\ncep=0\nsalvar\nsair\n";
        let out = run_script(&a, script);
        assert!(out.contains("Erro: Por favor, preencha todos os campos obrigatórios."));
        assert!(out.contains("CPF (cpf): Campo Obrigatório"));
        assert!(out.contains("Cadastro Concluído: Novo paciente cadastrado com sucesso!"));
        let sections = a.pacientes.list.list("Ana").unwrap();
        assert_eq!(sections[0].items[0].id, Some(RecordId::new(103)));
    }

    #[test]
    fn test_form_cancel_discards_draft() {
        let a = app();
        run_script(&a, "medicos\neditar 1\nnome=Outro\ncancelar\nsair\n");
        let record = a.medicos.list.find(RecordId::new(1)).unwrap();
        assert_eq!(record.nome, "João de Oliveira");
    }

    #[test]
    fn test_store_error_is_reported_and_shell_continues() {
        let out = run_script(&app(), "medicos\nver 99\neditar x\nvoltar\nsair\n");
        assert!(out.contains("Erro: Not found: médico 99"));
        assert!(out.contains("Erro: Invalid id: 'x'"));
        assert!(out.ends_with("menu> "));
    }

    #[test]
    fn test_bad_assignment_is_reported() {
        let out = run_script(
            &app(),
            "medicos\nnovo\nespecialidade=Cirurgia\ncpf=1\ncancelar\nsair\n",
        );
        assert!(out.contains("Erro: Invalid Especialidade: 'Cirurgia'"));
        assert!(out.contains("Erro: Unknown field 'cpf'"));
    }
}
