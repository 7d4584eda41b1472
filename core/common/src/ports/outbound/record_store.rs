//! レコードストア Outbound ポート
//!
//! 一覧・フォームはこの trait 経由でのみレコードを読み書きする。
//! 住所のネスト形との変換は実装側（HTTP アダプタ）の責務。

use crate::domain::{Record, RecordId};
use crate::error::Error;

/// 医師・患者のストア（モック配列または REST バックエンド）
pub trait RecordStore<R: Record>: Send + Sync {
    /// 現在の全レコード（無効化済みを含む、フラット形）
    fn snapshot(&self) -> Result<Vec<R>, Error>;

    /// ID で 1 件取得。見つからなければ `Error::NotFound`。
    fn find(&self, id: RecordId) -> Result<R, Error> {
        self.snapshot()?
            .into_iter()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| Error::not_found(format!("{} {}", R::KIND.noun(), id)))
    }

    /// `id` が無ければ新規作成（ID 採番・有効化）、あれば ID で置き換える
    fn save(&self, record: R) -> Result<R, Error>;

    /// 論理削除（`ativo = false`）。レコード自体は残る。
    fn deactivate(&self, id: RecordId) -> Result<(), Error>;
}
