//! Business layer errors
//!
//! Typed failures for every expected business-rule violation. The
//! presentation layer renders these as user-facing error dialogs; none
//! of them indicates a bug or an unrecoverable fault.

use apexbank_core::CoreError;
use apexbank_persistence::PersistenceError;
use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Account errors ===
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Invalid username or password")]
    AuthFailed,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // === Transfer errors ===
    #[error("Cannot send money to your own account")]
    SelfTransfer,

    #[error("Cannot request money from your own account")]
    SelfRequest,

    // === Request errors ===
    #[error("Request not found or already settled: {0}")]
    RequestNotFound(String),

    // === Authorization ===
    #[error("Transaction failed! Incorrect PIN.")]
    PinRejected,

    // === Wrapped errors ===
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias with BusinessError
pub type BusinessResult<T> = Result<T, BusinessError>;

impl BusinessError {
    /// Is this a not-found class error (account or request)?
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BusinessError::AccountNotFound(_) | BusinessError::RequestNotFound(_)
        )
    }

    /// Did the operation fail on the PIN confirmation step?
    pub fn is_pin_rejected(&self) -> bool {
        matches!(self, BusinessError::PinRejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BusinessError::DuplicateUsername("alice".to_string());
        assert_eq!(err.to_string(), "Username already exists: alice");

        let err = BusinessError::AuthFailed;
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: BusinessError = CoreError::InvalidAmount(-5).into();
        assert_eq!(err.to_string(), "Amount must be positive: -5");
    }

    #[test]
    fn test_error_checks() {
        assert!(BusinessError::AccountNotFound("x".into()).is_not_found());
        assert!(BusinessError::RequestNotFound("x".into()).is_not_found());
        assert!(BusinessError::PinRejected.is_pin_rejected());
        assert!(!BusinessError::SelfTransfer.is_not_found());
    }
}
