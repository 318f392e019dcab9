//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Template index {index} out of range for '{category}' (len {len})")]
    IndexOutOfRange {
        category: String,
        index: usize,
        len: usize,
    },

    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
