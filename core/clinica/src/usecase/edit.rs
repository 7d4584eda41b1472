//! 作成・編集のユースケース
//!
//! フォームの状態は `FormEditor` が持つ。ここではストアからの読み込みと保存だけを行う。

use std::sync::Arc;

use common::domain::{FieldName, Record, RecordId};
use common::error::Error;
use common::form::{FormEditor, SubmitOutcome};
use common::ports::outbound::RecordStore;

pub struct EditRecordUseCase<R: Record> {
    store: Arc<dyn RecordStore<R>>,
}

impl<R: Record> EditRecordUseCase<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>) -> Self {
        Self { store }
    }

    /// id なしは新規作成フォーム、ありは既存レコードで初期化したフォーム
    pub fn open(&self, id: Option<RecordId>) -> Result<FormEditor<R>, Error> {
        let existing = id.map(|id| self.store.find(id)).transpose()?;
        Ok(FormEditor::new(existing))
    }

    /// 開いているフォームを別の入力で開き直す（同じ入力なら下書きを保持）
    pub fn reopen(&self, form: &mut FormEditor<R>, id: Option<RecordId>) -> Result<bool, Error> {
        let existing = id.map(|id| self.store.find(id)).transpose()?;
        Ok(form.sync(existing.as_ref()))
    }

    /// 検証に通った下書きだけをストアへ保存する
    pub fn submit(&self, form: &mut FormEditor<R>) -> Result<SubmitOutcome<R>, Error> {
        form.submit(|draft| self.store.save(draft))
    }
}

/// `campo=valor` を 1 件フォームへ適用し、対象フィールドを返す
pub fn apply_assignment<R: Record>(
    form: &mut FormEditor<R>,
    assignment: &str,
) -> Result<R::Field, Error> {
    let (name, value) = assignment.split_once('=').ok_or_else(|| {
        Error::invalid_argument(format!("Expected campo=valor, got '{}'", assignment))
    })?;
    let field = R::Field::parse(name.trim()).ok_or_else(|| {
        let names: Vec<&str> = R::FIELDS.iter().map(|f| f.as_str()).collect();
        Error::invalid_argument(format!(
            "Unknown field '{}' for {}. Fields: {}",
            name.trim(),
            R::KIND.noun(),
            names.join(", ")
        ))
    })?;
    let value = normalize_choice::<R>(field, value)?;
    form.set_field(field, value);
    Ok(field)
}

/// 複数の `campo=valor` を順に適用する（最初の不正で止まる）
pub fn apply_assignments<R: Record>(
    form: &mut FormEditor<R>,
    assignments: &[String],
) -> Result<(), Error> {
    for a in assignments {
        apply_assignment(form, a)?;
    }
    Ok(())
}

/// 選択式フィールドは選択肢のどれか（大文字小文字は無視）に揃える
fn normalize_choice<R: Record>(field: R::Field, value: &str) -> Result<String, Error> {
    let choices = R::choices(field);
    if choices.is_empty() {
        return Ok(value.to_string());
    }
    let wanted = value.trim().to_lowercase();
    choices
        .iter()
        .find(|c| c.to_lowercase() == wanted)
        .map(|c| c.to_string())
        .ok_or_else(|| {
            Error::invalid_argument(format!(
                "Invalid {}: '{}'. Options: {}",
                field.label(),
                value,
                choices.join(", ")
            ))
        })
}
