//! # Error Module
//!
//! Định nghĩa các domain errors cho Apexbank core sử dụng thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// Các lỗi validation thuần túy, không liên quan đến storage hay nghiệp vụ
/// ở tầng trên.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Amount must be positive: {0}")]
    InvalidAmount(i64),

    #[error("PIN must be exactly 4 digits")]
    InvalidPin,

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("Minimum balance of {floor} required, transaction would leave {resulting}")]
    BelowMinimumBalance { floor: i64, resulting: i64 },
}

/// Result type alias với CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Kiểm tra có phải lỗi insufficient funds không
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, CoreError::InsufficientFunds { .. })
    }

    /// Kiểm tra có phải lỗi vi phạm số dư tối thiểu không
    pub fn is_below_minimum(&self) -> bool {
        matches!(self, CoreError::BelowMinimumBalance { .. })
    }
}

/// Validate số tiền giao dịch (phải dương).
pub fn validate_amount(amount: i64) -> CoreResult<()> {
    if amount <= 0 {
        return Err(CoreError::InvalidAmount(amount));
    }
    Ok(())
}

/// Validate định dạng PIN: đúng 4 chữ số thập phân.
pub fn validate_pin_format(pin: &str) -> CoreResult<()> {
    if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidPin);
    }
    Ok(())
}
