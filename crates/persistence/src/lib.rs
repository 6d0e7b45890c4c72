//! # Apexbank Persistence
//!
//! Tầng lưu trữ cho Apexbank - ba store JSON phẳng, độc lập với nhau:
//!
//! ```text
//! <data-dir>/users.json             username -> Account
//! <data-dir>/transactions.log       Vec<TransactionEntry> (append-only)
//! <data-dir>/pending_requests.json  request_id -> MoneyRequest
//! ```
//!
//! Mỗi thao tác ghi là load-all rồi save-all (overwrite toàn bộ file).
//! File thiếu hoặc hỏng được coi là collection rỗng, không bao giờ làm
//! crash caller. Thiết kế này giả định đúng một process ghi tại một thời
//! điểm - nhiều writer đồng thời sẽ mất cập nhật (lost update).

pub mod error;
pub mod log;
pub mod store;

pub use error::{PersistenceError, PersistenceResult};
pub use log::TransactionLog;
pub use store::JsonStore;

use apexbank_core::{Account, MoneyRequest};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Map tài khoản: username -> Account
pub type AccountMap = BTreeMap<String, Account>;

/// Map yêu cầu chuyển tiền: request_id -> MoneyRequest
pub type RequestMap = BTreeMap<String, MoneyRequest>;

/// Thư mục dữ liệu - resolve đường dẫn cho cả ba store.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store tài khoản (`users.json`)
    pub fn accounts(&self) -> JsonStore<AccountMap> {
        JsonStore::new(self.root.join("users.json"))
    }

    /// Log giao dịch (`transactions.log`)
    pub fn transactions(&self) -> TransactionLog {
        TransactionLog::new(self.root.join("transactions.log"))
    }

    /// Store yêu cầu chuyển tiền (`pending_requests.json`)
    pub fn requests(&self) -> JsonStore<RequestMap> {
        JsonStore::new(self.root.join("pending_requests.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apexbank_core::Account;
    use tempfile::tempdir;

    #[test]
    fn test_data_dir_paths() {
        let data = DataDir::new("data");
        assert!(data.accounts().path().ends_with("users.json"));
        assert!(data.requests().path().ends_with("pending_requests.json"));
    }

    #[test]
    fn test_account_map_roundtrip() {
        let dir = tempdir().unwrap();
        let data = DataDir::new(dir.path());

        let mut accounts = AccountMap::new();
        accounts.insert("alice".to_string(), Account::new("pw", "1234", "123456"));

        data.accounts().save(&accounts).unwrap();
        let loaded = data.accounts().load();
        assert_eq!(loaded, accounts);
        assert_eq!(loaded["alice"].account_no, "123456");
    }
}
