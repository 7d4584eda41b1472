//! Outbound ポート: アプリが外界（FS・環境変数・ログ・レコードストア）を使うための trait

pub mod env_resolver;
pub mod fs;
pub mod log;
pub mod record_store;

pub use env_resolver::EnvResolver;
pub use fs::FileSystem;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use record_store::RecordStore;
