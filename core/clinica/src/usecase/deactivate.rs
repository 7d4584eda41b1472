//! 論理削除のユースケース

use std::sync::Arc;

use common::domain::{Record, RecordId};
use common::error::Error;
use common::ports::outbound::RecordStore;

pub struct DeactivateRecordUseCase<R: Record> {
    store: Arc<dyn RecordStore<R>>,
}

impl<R: Record> DeactivateRecordUseCase<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>) -> Self {
        Self { store }
    }

    /// 無効化し、無効化後のレコードを返す（確認メッセージ用）
    pub fn deactivate(&self, id: RecordId) -> Result<R, Error> {
        let mut record = self.store.find(id)?;
        self.store.deactivate(id)?;
        record.set_active(false);
        Ok(record)
    }
}
