//! クリニック管理の共通ライブラリ
//!
//! 医師・患者レコードの型、一覧のセクション導出、フォームの検証、
//! レコードストアのポートとアダプタを提供する。

/// エラーハンドリング
pub mod error;

/// レコード型（医師・患者）と Newtype
pub mod domain;

/// 一覧（検索・頭文字グループ化）
pub mod list;

/// 作成・編集フォーム
pub mod form;

/// config.json と上書き
pub mod config;

pub mod ports;

pub mod adapter;
