mod cli;
mod domain;
mod ports;
mod presenter;
mod shell;
mod usecase;
mod wiring;


use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::process;

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::domain::{FieldName, RecordId, RecordKind};
use common::error::Error;
use common::form::SubmitOutcome;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::command::{Command, RecordAction};
use ports::inbound::RunClinicaApp;
use presenter::{
    render_detail, render_field_errors, render_notice, render_sections, write_text, CardView,
};
use serde::Serialize;
use usecase::{apply_assignments, RecordUseCases};
use wiring::{wire_clinica, App};

/// フォームが必須項目不足で拒否されたときの終了コード（sysexits.h の EX_DATAERR）
const EX_DATAERR: i32 = 65;

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl RunClinicaApp for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = std::io::stdout();
        self.execute(&config, &mut input, &mut out)
    }
}

impl Runner {
    /// 入出力を差し替え可能な本体（テストから直接呼ぶ）
    fn execute(
        &self,
        config: &Config,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<i32, Error> {
        let command = config_to_command(config);
        let name = command_name(&command);
        self.log_lifecycle(LogLevel::Info, "command started", &name, None);
        let result = self.dispatch(command, config.json, input, out);
        match &result {
            Ok(code) => self.log_lifecycle(LogLevel::Info, "command finished", &name, Some(*code)),
            Err(e) => {
                let _ = self.app.logger.log(
                    &LogRecord::new(LogLevel::Error, "command failed")
                        .layer("cli")
                        .kind("lifecycle")
                        .field("command", name.as_str())
                        .field("error", e.to_string())
                        .field("exit_code", e.exit_code()),
                );
            }
        }
        result
    }

    fn log_lifecycle(&self, level: LogLevel, message: &str, name: &str, exit_code: Option<i32>) {
        let mut record = LogRecord::new(level, message)
            .layer("cli")
            .kind("lifecycle")
            .field("command", name);
        if let Some(code) = exit_code {
            record = record.field("exit_code", code);
        }
        let _ = self.app.logger.log(&record);
    }

    fn dispatch(
        &self,
        command: Command,
        json: bool,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<i32, Error> {
        match command {
            Command::Help => {
                write_text(out, HELP)?;
                Ok(0)
            }
            Command::Shell => shell::run(&self.app, input, out),
            Command::Record {
                kind: RecordKind::Medico,
                action,
            } => run_record_action(&self.app.medicos, action, json, out),
            Command::Record {
                kind: RecordKind::Paciente,
                action,
            } => run_record_action(&self.app.pacientes, action, json, out),
            Command::Invalid(msg) => Err(Error::invalid_argument(msg)),
            Command::Unknown(name) => Err(Error::invalid_argument(format!(
                "Command '{}' is not implemented.",
                name
            ))),
        }
    }
}

/// ログ用のコマンド名（例: "medicos listar"）
fn command_name(command: &Command) -> String {
    match command {
        Command::Help => "help".to_string(),
        Command::Shell => "shell".to_string(),
        Command::Record { kind, action } => format!("{} {}", kind.resource(), action.name()),
        Command::Invalid(_) => "invalid".to_string(),
        Command::Unknown(name) => name.clone(),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    let mut text = serde_json::to_string_pretty(value).map_err(|e| Error::json(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

/// 1 種別に対する非対話コマンドを実行する
fn run_record_action<R: CardView + Serialize>(
    uc: &RecordUseCases<R>,
    action: RecordAction,
    json: bool,
    out: &mut dyn Write,
) -> Result<i32, Error> {
    match action {
        RecordAction::List { query } => {
            let sections = uc.list.list(&query)?;
            let text = if json {
                to_json(&sections)?
            } else {
                render_sections(&sections)
            };
            write_text(out, &text)?;
            Ok(0)
        }
        RecordAction::Show { id } => {
            let record = uc.list.find(id)?;
            let text = if json { to_json(&record)? } else { render_detail(&record) };
            write_text(out, &text)?;
            Ok(0)
        }
        RecordAction::Create { assignments } => submit_form(uc, None, &assignments, json, out),
        RecordAction::Edit { id, assignments } => {
            submit_form(uc, Some(id), &assignments, json, out)
        }
        RecordAction::Deactivate { id } => {
            let record = uc.deactivate.deactivate(id)?;
            let text = if json {
                to_json(&record)?
            } else {
                format!("Perfil de {} desativado.\n", record.name())
            };
            write_text(out, &text)?;
            Ok(0)
        }
    }
}

/// フォームを開き、`campo=valor` を適用して送信する。拒否なら EX_DATAERR。
fn submit_form<R: CardView + Serialize>(
    uc: &RecordUseCases<R>,
    id: Option<RecordId>,
    assignments: &[String],
    json: bool,
    out: &mut dyn Write,
) -> Result<i32, Error> {
    let mut form = uc.edit.open(id)?;
    apply_assignments(&mut form, assignments)?;
    match uc.edit.submit(&mut form)? {
        SubmitOutcome::Saved { record, notice } => {
            let text = if json {
                to_json(&record)?
            } else {
                format!("{}{}", render_notice(&notice), render_detail(&record))
            };
            write_text(out, &text)?;
            Ok(0)
        }
        SubmitOutcome::Rejected { notice } => {
            let text = if json {
                let errors: BTreeMap<&str, &str> = form
                    .errors()
                    .iter()
                    .map(|(field, msg)| (field.as_str(), *msg))
                    .collect();
                to_json(&serde_json::json!({
                    "title": notice.title,
                    "message": notice.message,
                    "errors": errors,
                }))?
            } else {
                format!("{}{}", render_field_errors(&form), render_notice(&notice))
            };
            write_text(out, &text)?;
            Ok(EX_DATAERR)
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("clinica: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!(
        "Usage: clinica [-h] [-d|--home-dir directory] [--api-url url] [--memory] [--json] \
         [<medicos|pacientes> <action> [args...]]"
    );
}

const HELP: &str = "\
Usage: clinica [-h] [-d|--home-dir directory] [--api-url url] [--memory] [--json] [<medicos|pacientes> <action> [args...]]
  -h, --help            Display this help message.
  -d, --home-dir        Specify a home directory (sets CLINICA_HOME for this process).
  --api-url <url>       Use the REST backend at this base URL.
  --memory              Use the in-memory sample data (ignores --api-url, CLINICA_API_URL and config.json).
  --json                Print results as JSON.
  --generate <shell>    Generate shell completion script (bash, zsh, fish).
  Without a command, the interactive shell starts.

Environment:
  CLINICA_HOME      Home directory (config.json, state/logs). Default: $XDG_CONFIG_HOME/clinica or ~/.config/clinica.
  CLINICA_API_URL   REST backend base URL (overridden by --api-url).

Commands (medicos | pacientes):
  listar [consulta]              List active records grouped by initial.
  ver <id>                       Show one record.
  novo campo=valor...            Create a record. Exits 65 when required fields are missing.
  editar <id> campo=valor...     Edit a record. Exits 65 when required fields are missing.
  desativar <id>                 Deactivate a record (logical delete).

Fields:
  medicos     nome especialidade crm email telefone logradouro numero complemento bairro cidade uf cep
  pacientes   nome cpf email telefone logradouro numero complemento bairro cidade uf cep
";

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match outcome {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    // -d/--home-dir 指定時は CLINICA_HOME を設定し、resolve_dirs() がその配下を使うようにする
    if let Some(ref h) = config.home_dir {
        std::env::set_var("CLINICA_HOME", h);
    }
    let app = wire_clinica(&config.overrides())?;
    let runner = Runner { app };
    runner.run(config)
}
