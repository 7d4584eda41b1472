use crate::domain::command::Command;
use clap::builder::ArgAction;
use clap::error::ErrorKind;
use clap::value_parser;
use clap_complete::Shell;
use common::config::ConfigOverrides;
use common::error::Error;

const RESOURCES: [(&str, &str); 2] = [
    ("medicos", "Manage doctors (médicos)"),
    ("pacientes", "Manage patients (pacientes)"),
];

/// CLI から受け取った生の設定（command は文字列のまま保持）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    pub home_dir: Option<String>,
    /// --api-url（CLINICA_API_URL・config.json より優先）
    pub api_url: Option<String>,
    /// --memory（常にメモリ上のサンプルデータを使う）
    pub memory: bool,
    /// 結果を JSON で出力
    pub json: bool,
    /// リソース名（None の場合は Shell）
    pub command_name: Option<String>,
    pub command_args: Vec<String>,
}

impl Config {
    /// 設定ファイルに重ねる上書き（環境変数分は配線側で埋める）
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            force_memory: self.memory,
            env_api_url: None,
        }
    }
}

/// 解析結果: 通常の Config または補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn global_args(cmd: clap::Command) -> clap::Command {
    cmd.disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("home-dir")
                .short('d')
                .long("home-dir")
                .value_name("directory")
                .help("Specify a home directory (sets CLINICA_HOME for this process)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("api-url")
                .long("api-url")
                .value_name("url")
                .help("Use the REST backend at this base URL")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("memory")
                .long("memory")
                .help("Use the in-memory sample data (ignores --api-url and config)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn id_arg() -> clap::Arg {
    clap::Arg::new("id").value_name("id").required(true)
}

fn assignments_arg() -> clap::Arg {
    clap::Arg::new("assignments")
        .value_name("campo=valor")
        .num_args(0..)
        .allow_hyphen_values(true)
}

fn build_resource_subcommand(name: &'static str, about: &'static str) -> clap::Command {
    clap::Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("listar")
                .about("List active records grouped by initial")
                .arg(clap::Arg::new("consulta").num_args(0..).value_name("consulta")),
        )
        .subcommand(
            clap::Command::new("ver")
                .about("Show one record")
                .arg(id_arg()),
        )
        .subcommand(
            clap::Command::new("novo")
                .about("Create a record from field assignments")
                .arg(assignments_arg()),
        )
        .subcommand(
            clap::Command::new("editar")
                .about("Edit a record with field assignments")
                .arg(id_arg())
                .arg(assignments_arg()),
        )
        .subcommand(
            clap::Command::new("desativar")
                .about("Deactivate a record (logical delete)")
                .arg(id_arg()),
        )
}

fn build_clap_command() -> clap::Command {
    let mut cmd = clap::Command::new("clinica")
        .about("Clinic management: doctors and patients")
        .subcommand_required(false)
        .disable_help_subcommand(true)
        .subcommand(clap::Command::new("shell").about("Start the interactive shell (default)"))
        .subcommand(clap::Command::new("help").about("Display this help message"));
    for (name, about) in RESOURCES {
        cmd = cmd.subcommand(build_resource_subcommand(name, about));
    }
    global_args(cmd)
}

fn many(m: &clap::ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|i| i.cloned().collect())
        .unwrap_or_default()
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let help = matches.get_flag("help") || matches.subcommand_matches("help").is_some();
    let home_dir = matches.get_one::<String>("home-dir").cloned();
    let api_url = matches.get_one::<String>("api-url").cloned();
    let memory = matches.get_flag("memory");
    let json = matches.get_flag("json");

    let (command_name, command_args) = match matches.subcommand() {
        None | Some(("help", _)) | Some(("shell", _)) => (None, Vec::new()),
        Some((name, res_m)) => {
            let mut command_args = Vec::new();
            match res_m.subcommand() {
                Some(("listar", m)) => {
                    command_args.push("listar".to_string());
                    command_args.extend(many(m, "consulta"));
                }
                Some((sub @ ("ver" | "desativar"), m)) => {
                    command_args.push(sub.to_string());
                    command_args.extend(m.get_one::<String>("id").cloned());
                }
                Some(("novo", m)) => {
                    command_args.push("novo".to_string());
                    command_args.extend(many(m, "assignments"));
                }
                Some(("editar", m)) => {
                    command_args.push("editar".to_string());
                    command_args.extend(m.get_one::<String>("id").cloned());
                    command_args.extend(many(m, "assignments"));
                }
                Some((sub, _)) => command_args.push(sub.to_string()),
                None => {}
            }
            (Some(name.to_string()), command_args)
        }
    };

    Config {
        help,
        home_dir,
        api_url,
        memory,
        json,
        command_name,
        command_args,
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_from(std::env::args_os())
}

/// 任意の引数列を解析する（先頭はプログラム名）
pub fn parse_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cmd = build_clap_command();
    let matches = match cmd.try_get_matches_from(args) {
        Ok(m) => m,
        // サブコマンド側の -h は clap が処理するので、こちらのヘルプに寄せる
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            return Ok(ParseOutcome::Config(Config {
                help: true,
                ..Default::default()
            }))
        }
        Err(e) => return Err(Error::invalid_argument(e.to_string())),
    };

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// 補完スクリプトを標準出力に出力する。
/// サブコマンドが 2 段あるため、1 段目と 2 段目の候補だけを返す簡易版。
pub fn print_completion(shell: Shell) {
    let resources: Vec<&str> = RESOURCES.iter().map(|(n, _)| *n).collect();
    let top = [&["help", "shell"][..], &resources[..]].concat();
    let actions = ["desativar", "editar", "listar", "novo", "ver"];
    match shell {
        Shell::Bash => {
            println!(
                r#"# Fallback completion for clinica (subcommands only)
_clinica() {{
  local cur="${{COMP_WORDS[COMP_CWORD]}}"
  if [ "$COMP_CWORD" -eq 2 ] && [[ "${{COMP_WORDS[1]}}" =~ ^({}) ]]; then
    COMPREPLY=($(compgen -W "{}" -- "$cur"))
  else
    COMPREPLY=($(compgen -W "{}" -- "$cur"))
  fi
}}
complete -F _clinica clinica
"#,
                resources.join("|"),
                actions.join(" "),
                top.join(" ")
            );
        }
        Shell::Zsh => {
            println!(
                r#"# Fallback completion for clinica (subcommands only)
#compdef clinica
local subcommands
subcommands=({})
_describe 'command' subcommands
"#,
                top.iter().map(|s| format!("\"{}\"", s)).collect::<Vec<_>>().join(" ")
            );
        }
        Shell::Fish => {
            println!(
                r#"# Fallback completion for clinica (subcommands only)
complete -c clinica -n "__fish_use_subcommand" -a "{}"
complete -c clinica -n "__fish_seen_subcommand_from {}" -a "{}"
"#,
                top.join(" "),
                resources.join(" "),
                actions.join(" ")
            );
        }
        _ => {}
    }
}

/// Config を Command に変換する
pub fn config_to_command(config: &Config) -> Command {
    if config.help {
        return Command::Help;
    }
    match &config.command_name {
        Some(name) => Command::parse_with_args(name, &config.command_args),
        None => Command::Shell,
    }
}
