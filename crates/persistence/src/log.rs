//! Transaction Log - lịch sử giao dịch append-only trên JsonStore.
//!
//! Thứ tự chèn (không phải sort key) định nghĩa thứ tự thời gian:
//! truy vấn hiển thị đảo ngược list, truy vấn "last N" lấy từ cuối.

use crate::error::PersistenceResult;
use crate::store::JsonStore;
use apexbank_core::TransactionEntry;
use std::path::Path;

/// Log giao dịch toàn hệ thống, filter được theo tài khoản.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    store: JsonStore<Vec<TransactionEntry>>,
}

impl TransactionLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Append một bản ghi: load toàn bộ log, push, save lại.
    /// Nội dung không phải sequence được coi là log rỗng.
    pub fn append(&self, entry: TransactionEntry) -> PersistenceResult<()> {
        let mut entries = self.store.load();
        entries.push(entry);
        self.store.save(&entries)
    }

    /// Append nhiều bản ghi trong một lần save
    pub fn append_all(&self, new_entries: Vec<TransactionEntry>) -> PersistenceResult<()> {
        let mut entries = self.store.load();
        entries.extend(new_entries);
        self.store.save(&entries)
    }

    /// Toàn bộ lịch sử của một tài khoản, mới nhất trước (cho hiển thị)
    pub fn for_account(&self, account_no: &str) -> Vec<TransactionEntry> {
        let mut entries: Vec<TransactionEntry> = self
            .store
            .load()
            .into_iter()
            .filter(|entry| entry.account_no == account_no)
            .collect();
        entries.reverse();
        entries
    }

    /// `n` giao dịch gần nhất của một tài khoản, mới nhất trước
    pub fn recent(&self, account_no: &str, n: usize) -> Vec<TransactionEntry> {
        let mut entries = self.for_account(account_no);
        entries.truncate(n);
        entries
    }
}
