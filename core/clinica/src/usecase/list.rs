//! 一覧のユースケース

use std::sync::Arc;

use common::domain::{Record, RecordId};
use common::error::Error;
use common::list::{derive_sections, Section};
use common::ports::outbound::RecordStore;

pub struct ListRecordsUseCase<R: Record> {
    store: Arc<dyn RecordStore<R>>,
}

impl<R: Record> ListRecordsUseCase<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>) -> Self {
        Self { store }
    }

    /// ストアの全件を取り、検索・グループ化したセクションを返す
    pub fn list(&self, query: &str) -> Result<Vec<Section<R>>, Error> {
        let records = self.store.snapshot()?;
        Ok(derive_sections(&records, query))
    }

    /// 1 件取得（無効化済みも返す）
    pub fn find(&self, id: RecordId) -> Result<R, Error> {
        self.store.find(id)
    }
}
