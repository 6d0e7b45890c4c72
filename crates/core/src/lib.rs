//! # Apexbank Core
//!
//! Định nghĩa các domain types cho Apexbank - ngân hàng mô phỏng một người dùng:
//! Account, TransactionEntry, MoneyRequest và các hằng số tiền tệ.
//!
//! Crate này không chứa I/O: mọi thao tác đọc/ghi nằm ở tầng persistence,
//! mọi nghiệp vụ nằm ở tầng business.

pub mod account;
pub mod error;
pub mod money;
pub mod request;
pub mod transaction;

pub use account::Account;
pub use error::{validate_amount, validate_pin_format, CoreError, CoreResult};
pub use money::{
    format_currency, wealth_message, CURRENCY, DEFAULT_STARTING_BALANCE, MINIMUM_BALANCE,
};
pub use request::{MoneyRequest, RequestStatus};
pub use transaction::{TransactionEntry, TxKind, TxStatus};
