//! # Transaction Module
//!
//! Định nghĩa TransactionEntry - bản ghi lịch sử giao dịch append-only.
//! Mỗi chuyển khoản ghi hai bản ghi (một cho mỗi phía) để từng tài khoản
//! có lịch sử độc lập, tự chứa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Loại giao dịch - tập đóng, tag phải khớp nguyên văn với log cũ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    #[serde(rename = "Deposit")]
    Deposit,
    #[serde(rename = "Withdrawal")]
    Withdrawal,
    #[serde(rename = "Send")]
    Send,
    #[serde(rename = "Receive (Send)")]
    ReceiveSend,
    #[serde(rename = "Send (Request)")]
    SendRequest,
    #[serde(rename = "Receive (Request)")]
    ReceiveRequest,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Deposit => "Deposit",
            TxKind::Withdrawal => "Withdrawal",
            TxKind::Send => "Send",
            TxKind::ReceiveSend => "Receive (Send)",
            TxKind::SendRequest => "Send (Request)",
            TxKind::ReceiveRequest => "Receive (Request)",
        }
    }

    /// Giao dịch này là tiền ra khỏi tài khoản?
    pub fn is_outflow(&self) -> bool {
        matches!(
            self,
            TxKind::Withdrawal | TxKind::Send | TxKind::SendRequest
        )
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trạng thái của một bản ghi giao dịch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    #[serde(rename = "Success")]
    Success,
    #[serde(rename = "Failed")]
    Failed,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Success => "Success",
            TxStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Một dòng lịch sử giao dịch. Bất biến sau khi append.
///
/// `amount` có dấu: âm = tiền ra, dương = tiền vào.
/// `target_acc_no` là tài khoản đối ứng (nếu là chuyển khoản).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub timestamp: DateTime<Utc>,
    pub account_no: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: i64,
    pub status: TxStatus,
    pub target_acc_no: Option<String>,
}

impl TransactionEntry {
    /// Tạo bản ghi mới với timestamp hiện tại, status Success
    pub fn new(account_no: &str, kind: TxKind, amount: i64, target_acc_no: Option<&str>) -> Self {
        Self {
            timestamp: Utc::now(),
            account_no: account_no.to_string(),
            kind,
            amount,
            status: TxStatus::Success,
            target_acc_no: target_acc_no.map(str::to_string),
        }
    }
}
