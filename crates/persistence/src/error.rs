//! # Persistence Errors
//!
//! Error types cho tầng lưu trữ, wrapping IO và serde_json errors.
//!
//! Lưu ý: lỗi chỉ phát sinh khi *ghi*. Đọc file thiếu/hỏng trả về
//! collection rỗng theo contract của Record Store.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias cho PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;
