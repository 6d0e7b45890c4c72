//! # Account Module
//!
//! Định nghĩa Account - bản ghi tài khoản người dùng.
//!
//! Account được lưu trong map `username -> Account`, vì vậy username
//! không nằm trong bản ghi mà là key của store (giống file `users.json`).

use crate::error::{CoreError, CoreResult};
use crate::money::MINIMUM_BALANCE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bản ghi tài khoản.
///
/// - `password`: credential dạng chuỗi (không mã hóa - mô phỏng)
/// - `pin`: đúng 4 chữ số, xác nhận trước mọi giao dịch trừ tiền
/// - `balance`: số dư i64, đơn vị USD nguyên
/// - `account_no`: số tài khoản 6 chữ số, duy nhất toàn hệ thống
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub password: String,
    pub pin: String,
    pub balance: i64,
    pub account_no: String,
}

impl Account {
    /// Tạo Account mới với số dư khởi tạo mặc định
    pub fn new(password: &str, pin: &str, account_no: &str) -> Self {
        Self {
            password: password.to_string(),
            pin: pin.to_string(),
            balance: crate::money::DEFAULT_STARTING_BALANCE,
            account_no: account_no.to_string(),
        }
    }

    /// Kiểm tra một khoản trừ tiền có hợp lệ với số dư hiện tại không.
    ///
    /// Thứ tự kiểm tra: vượt số dư trước, rồi mới tới sàn số dư tối thiểu.
    pub fn check_debit(&self, amount: i64) -> CoreResult<()> {
        if amount > self.balance {
            return Err(CoreError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        if self.balance - amount < MINIMUM_BALANCE {
            return Err(CoreError::BelowMinimumBalance {
                floor: MINIMUM_BALANCE,
                resulting: self.balance - amount,
            });
        }
        Ok(())
    }

    /// So khớp credential đăng nhập (exact match)
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} (balance: {})",
            self.account_no,
            crate::money::format_currency(self.balance)
        )
    }
}
