//! 作成・編集フォームの状態管理（下書き・必須項目チェック・送信）
//!
//! 下書きは常にフラット形のレコード `R` そのもの。
//! 検証エラーは値として返し、`Error` にはしない。

use std::collections::BTreeMap;

use crate::domain::{Record, RecordKind};

/// 必須項目が空のときのメッセージ
pub const REQUIRED_FIELD_MESSAGE: &str = "Campo Obrigatório";

/// フィールドごとの検証エラー
pub type FieldErrors<F> = BTreeMap<F, &'static str>;

/// 利用者に見せる通知（タイトル + 本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    fn saved(kind: RecordKind, editing: bool) -> Self {
        if editing {
            Self {
                title: "Sucesso",
                message: format!("Dados do {} atualizados.", kind.noun()),
            }
        } else {
            Self {
                title: "Cadastro Concluído",
                message: format!("Novo {} cadastrado com sucesso!", kind.noun()),
            }
        }
    }

    fn rejected() -> Self {
        Self {
            title: "Erro",
            message: "Por favor, preencha todos os campos obrigatórios.".to_string(),
        }
    }
}

/// 呼び出し側への画面遷移の指示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// 直前の画面へ戻る
    Back,
}

/// 送信結果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<R> {
    /// 保存済み（ストアが返したレコード）
    Saved { record: R, notice: Notice },
    /// 必須項目不足。何も保存していない。
    Rejected { notice: Notice },
}

impl<R> SubmitOutcome<R> {
    pub fn notice(&self) -> &Notice {
        match self {
            Self::Saved { notice, .. } | Self::Rejected { notice } => notice,
        }
    }

    /// 保存できた場合のみ Back
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::Saved { .. } => Some(Navigation::Back),
            Self::Rejected { .. } => None,
        }
    }
}

/// 1 件分のフォーム
#[derive(Debug, Clone)]
pub struct FormEditor<R: Record> {
    /// 初期化に使った既存レコード（None なら新規作成）
    seed: Option<R>,
    draft: R,
    errors: FieldErrors<R::Field>,
}

impl<R: Record> FormEditor<R> {
    /// 既存レコードがあれば編集モード、なければ新規作成モード
    pub fn new(existing: Option<R>) -> Self {
        let draft = existing.clone().unwrap_or_else(R::blank);
        Self {
            seed: existing,
            draft,
            errors: BTreeMap::new(),
        }
    }

    /// 入力レコードが変わっていれば下書きとエラーを作り直す。変わっていなければ何もしない。
    ///
    /// 戻り値は作り直したかどうか。
    pub fn sync(&mut self, existing: Option<&R>) -> bool {
        if self.seed.as_ref() == existing {
            return false;
        }
        *self = Self::new(existing.cloned());
        true
    }

    pub fn draft(&self) -> &R {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.seed.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            R::KIND.edit_title()
        } else {
            R::KIND.create_title()
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Concluir Edição"
        } else {
            "Concluir Cadastro"
        }
    }

    pub fn errors(&self) -> &FieldErrors<R::Field> {
        &self.errors
    }

    pub fn error(&self, field: R::Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// 1 フィールドを上書きし、そのフィールドのエラーだけを消す
    pub fn set_field(&mut self, field: R::Field, value: impl Into<String>) {
        self.draft.set_field(field, value.into());
        self.errors.remove(&field);
    }

    /// 必須項目を検証し、エラーを丸ごと作り直す
    pub fn validate(&mut self) -> bool {
        self.errors = R::REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|f| self.draft.field(*f).trim().is_empty())
            .map(|f| (f, REQUIRED_FIELD_MESSAGE))
            .collect();
        self.errors.is_empty()
    }

    /// 検証に通れば下書きをそのまま `save` に渡す
    ///
    /// `save` の失敗はそのまま返す（下書きは保持される）。
    pub fn submit<E>(
        &mut self,
        save: impl FnOnce(R) -> Result<R, E>,
    ) -> Result<SubmitOutcome<R>, E> {
        if !self.validate() {
            return Ok(SubmitOutcome::Rejected {
                notice: Notice::rejected(),
            });
        }
        let record = save(self.draft.clone())?;
        Ok(SubmitOutcome::Saved {
            record,
            notice: Notice::saved(R::KIND, self.is_editing()),
        })
    }

    /// 下書きを破棄して戻る
    pub fn cancel(self) -> Navigation {
        Navigation::Back
    }
}
