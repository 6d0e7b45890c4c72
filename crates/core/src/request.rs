//! # Request Module
//!
//! Định nghĩa MoneyRequest - yêu cầu "pull payment": người requester xin
//! tiền từ tài khoản source, chờ source chấp thuận (kèm PIN) hoặc từ chối.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trạng thái vòng đời của một MoneyRequest.
///
/// `pending` chuyển sang đúng một trạng thái kết thúc; trạng thái kết thúc
/// không bao giờ được mở lại.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Denied => "denied",
        }
    }

    /// Trạng thái kết thúc (approved/denied) - không thể thay đổi nữa
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Yêu cầu chuyển tiền pull-payment.
///
/// Invariant: requester khác source (kiểm tra lúc tạo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRequest {
    pub request_id: String,
    pub requester_acc_no: String,
    pub requester_username: String,
    pub source_acc_no: String,
    pub source_username: String,
    pub amount: i64,
    pub timestamp: DateTime<Utc>,
    pub status: RequestStatus,
}

impl MoneyRequest {
    /// Tạo request mới ở trạng thái pending
    pub fn new(
        request_id: &str,
        requester_acc_no: &str,
        requester_username: &str,
        source_acc_no: &str,
        source_username: &str,
        amount: i64,
    ) -> Self {
        Self {
            request_id: request_id.to_string(),
            requester_acc_no: requester_acc_no.to_string(),
            requester_username: requester_username.to_string(),
            source_acc_no: source_acc_no.to_string(),
            source_username: source_username.to_string(),
            amount,
            timestamp: Utc::now(),
            status: RequestStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
