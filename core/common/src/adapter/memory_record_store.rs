//! メモリ上の RecordStore 実装（モックデータ用）
//!
//! プロセス終了で消える。永続化はしない。

use crate::domain::{Record, RecordId};
use crate::error::Error;
use crate::ports::outbound::RecordStore;
use std::sync::{Mutex, MutexGuard};

pub struct MemoryRecordStore<R: Record> {
    records: Mutex<Vec<R>>,
}

impl<R: Record> MemoryRecordStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<R>>, Error> {
        self.records
            .lock()
            .map_err(|_| Error::system("record store lock poisoned"))
    }

    fn not_found(id: RecordId) -> Error {
        Error::not_found(format!("{} {}", R::KIND.noun(), id))
    }
}

impl<R: Record> Default for MemoryRecordStore<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R: Record> RecordStore<R> for MemoryRecordStore<R> {
    fn snapshot(&self) -> Result<Vec<R>, Error> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, record: R) -> Result<R, Error> {
        let mut records = self.lock()?;
        match record.id() {
            Some(id) => {
                let slot = records
                    .iter_mut()
                    .find(|r| r.id() == Some(id))
                    .ok_or_else(|| Self::not_found(id))?;
                *slot = record.clone();
                Ok(record)
            }
            None => {
                let next = records
                    .iter()
                    .filter_map(|r| r.id())
                    .map(RecordId::get)
                    .max()
                    .unwrap_or(0)
                    + 1;
                let mut created = record;
                created.assign_id(RecordId::new(next));
                created.set_active(true);
                records.push(created.clone());
                Ok(created)
            }
        }
    }

    fn deactivate(&self, id: RecordId) -> Result<(), Error> {
        let mut records = self.lock()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| Self::not_found(id))?;
        slot.set_active(false);
        Ok(())
    }
}
