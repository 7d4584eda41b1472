//! 読み書きをログに記録する RecordStore のラッパ

use crate::domain::{Record, RecordId};
use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord, RecordStore};
use std::sync::Arc;

pub struct LoggingRecordStore<R: Record> {
    inner: Arc<dyn RecordStore<R>>,
    log: Arc<dyn Log>,
}

impl<R: Record> LoggingRecordStore<R> {
    pub fn new(inner: Arc<dyn RecordStore<R>>, log: Arc<dyn Log>) -> Self {
        Self { inner, log }
    }

    fn record(&self, level: LogLevel, message: &str, operation: &str) -> LogRecord {
        LogRecord::new(level, message)
            .layer("adapter")
            .kind("store")
            .field("resource", R::KIND.resource())
            .field("operation", operation)
    }

    /// 失敗もログに残してからそのまま返す
    fn trace<T>(&self, operation: &str, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(e) = &result {
            let _ = self.log.log(
                &self
                    .record(LogLevel::Error, "store operation failed", operation)
                    .field("error", e.to_string()),
            );
        }
        result
    }
}

impl<R: Record> RecordStore<R> for LoggingRecordStore<R> {
    fn snapshot(&self) -> Result<Vec<R>, Error> {
        let out = self.trace("snapshot", self.inner.snapshot())?;
        let _ = self.log.log(
            &self
                .record(LogLevel::Info, "record read", "snapshot")
                .field("count", out.len()),
        );
        Ok(out)
    }

    fn find(&self, id: RecordId) -> Result<R, Error> {
        let out = self.trace("find", self.inner.find(id))?;
        let _ = self.log.log(
            &self
                .record(LogLevel::Info, "record read", "find")
                .field("id", id.get()),
        );
        Ok(out)
    }

    fn save(&self, record: R) -> Result<R, Error> {
        let operation = if record.id().is_some() { "update" } else { "create" };
        let out = self.trace(operation, self.inner.save(record))?;
        let _ = self.log.log(
            &self
                .record(LogLevel::Info, "record write", operation)
                .field("id", out.id().map(RecordId::get)),
        );
        Ok(out)
    }

    fn deactivate(&self, id: RecordId) -> Result<(), Error> {
        self.trace("deactivate", self.inner.deactivate(id))?;
        let _ = self.log.log(
            &self
                .record(LogLevel::Info, "record write", "deactivate")
                .field("id", id.get()),
        );
        Ok(())
    }
}
