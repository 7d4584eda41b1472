//! ドメイン型（Command enum）

pub mod command;
