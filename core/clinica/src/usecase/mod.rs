//! ユースケース（一覧・編集・論理削除）
//!
//! どれも `RecordStore<R>` を `Arc<dyn ...>` で受け取り、医師・患者で共通に使う。

pub(crate) mod deactivate;
pub(crate) mod edit;
pub(crate) mod list;

use std::sync::Arc;

use common::domain::Record;
use common::ports::outbound::RecordStore;

pub(crate) use deactivate::DeactivateRecordUseCase;
pub(crate) use edit::{apply_assignment, apply_assignments, EditRecordUseCase};
pub(crate) use list::ListRecordsUseCase;

/// 1 種別分のユースケース一式（同じストアを共有する）
pub struct RecordUseCases<R: Record> {
    pub list: ListRecordsUseCase<R>,
    pub edit: EditRecordUseCase<R>,
    pub deactivate: DeactivateRecordUseCase<R>,
}

impl<R: Record> RecordUseCases<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>) -> Self {
        Self {
            list: ListRecordsUseCase::new(Arc::clone(&store)),
            edit: EditRecordUseCase::new(Arc::clone(&store)),
            deactivate: DeactivateRecordUseCase::new(store),
        }
    }
}
