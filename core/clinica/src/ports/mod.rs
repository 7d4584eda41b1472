//! ポート定義（Inbound のみ。Outbound は common に集約）

pub mod inbound;
