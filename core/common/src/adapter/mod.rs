//! アダプター（外界の I/O を trait で抽象化した実装）
//!
//! usecase はポートの trait 経由でのみファイル・環境変数・バックエンドに触れる。
//! 実装は標準実装（Std* / Http* / Memory*）やテスト用のモックを注入する。

pub mod file_json_log;
pub mod http_record_store;
pub mod logging_record_store;
pub mod memory_record_store;
pub mod std_env_resolver;
pub mod std_fs;
pub mod wire;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use http_record_store::HttpRecordStore;
pub use logging_record_store::LoggingRecordStore;
pub use memory_record_store::MemoryRecordStore;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use wire::WireRecord;
