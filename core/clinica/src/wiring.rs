//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{
    FileJsonLog, HttpRecordStore, LoggingRecordStore, MemoryRecordStore, NoopLog, StdEnvResolver,
    StdFileSystem,
};
use common::config::{Backend, ClinicaConfig, ConfigOverrides};
use common::domain::{sample, Dirs, Medico, Paciente};
use common::error::Error;
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel, LogRecord, RecordStore};

use crate::usecase::RecordUseCases;

/// 配線で組み立てたユースケース群（main の Command ディスパッチで利用）
pub struct App {
    pub medicos: RecordUseCases<Medico>,
    pub pacientes: RecordUseCases<Paciente>,
    /// 構造化ログ（ファイルへ JSONL）。コンソール表示とは別。
    pub logger: Arc<dyn Log>,
}

impl App {
    /// サンプルデータ入りのメモリストアで組み立てる
    pub fn in_memory(logger: Arc<dyn Log>) -> Self {
        let medicos: Arc<dyn RecordStore<Medico>> =
            Arc::new(MemoryRecordStore::new(sample::medicos()));
        let pacientes: Arc<dyn RecordStore<Paciente>> =
            Arc::new(MemoryRecordStore::new(sample::pacientes()));
        Self::with_stores(medicos, pacientes, logger)
    }

    /// ストアをログ付きデコレータで包んでから組み立てる
    pub fn with_stores(
        medicos: Arc<dyn RecordStore<Medico>>,
        pacientes: Arc<dyn RecordStore<Paciente>>,
        logger: Arc<dyn Log>,
    ) -> Self {
        let medicos: Arc<dyn RecordStore<Medico>> =
            Arc::new(LoggingRecordStore::new(medicos, Arc::clone(&logger)));
        let pacientes: Arc<dyn RecordStore<Paciente>> =
            Arc::new(LoggingRecordStore::new(pacientes, Arc::clone(&logger)));
        Self {
            medicos: RecordUseCases::new(medicos),
            pacientes: RecordUseCases::new(pacientes),
            logger,
        }
    }
}

/// config.json を読む。無ければ既定値。
fn load_config(fs: &dyn FileSystem, dirs: Option<&Dirs>) -> Result<ClinicaConfig, Error> {
    let Some(dirs) = dirs else {
        return Ok(ClinicaConfig::default());
    };
    let path = dirs.config_file();
    if !fs.exists(&path) {
        return Ok(ClinicaConfig::default());
    }
    let text = fs.read_to_string(&path)?;
    ClinicaConfig::parse(&text)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
}

/// 任意の EnvResolver / FileSystem で App を組み立てる
///
/// 優先順位: `overrides`（CLI）> CLINICA_API_URL > config.json > メモリ。
pub fn wire_with(
    env: Arc<dyn EnvResolver>,
    fs: Arc<dyn FileSystem>,
    overrides: &ConfigOverrides,
) -> Result<App, Error> {
    let dirs = env.resolve_dirs().ok();
    let logger: Arc<dyn Log> = match &dirs {
        Some(d) => Arc::new(FileJsonLog::new(Arc::clone(&fs), d.log_file())),
        None => Arc::new(NoopLog),
    };

    let mut overrides = overrides.clone();
    if overrides.env_api_url.is_none() {
        overrides.env_api_url = env.api_url();
    }
    let config = load_config(fs.as_ref(), dirs.as_ref())?.with_overrides(&overrides);

    let backend = match &config.backend {
        Backend::Memory => "memory".to_string(),
        Backend::Http { base_url } => base_url.to_string(),
    };
    let _ = logger.log(
        &LogRecord::new(LogLevel::Debug, "wired")
            .layer("wiring")
            .kind("lifecycle")
            .field("backend", backend),
    );

    let app = match &config.backend {
        Backend::Memory => App::in_memory(logger),
        Backend::Http { base_url } => App::with_stores(
            Arc::new(HttpRecordStore::<Medico>::new(base_url.clone(), config.timeout)?),
            Arc::new(HttpRecordStore::<Paciente>::new(base_url.clone(), config.timeout)?),
            logger,
        ),
    };
    Ok(app)
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_clinica(overrides: &ConfigOverrides) -> Result<App, Error> {
    wire_with(Arc::new(StdEnvResolver), Arc::new(StdFileSystem), overrides)
}
