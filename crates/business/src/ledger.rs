//! Ledger - account records and balance-changing operations
//!
//! The Ledger exclusively owns account records; it is the only component
//! that mutates balances. Both sides of a transfer are mutated in one
//! in-memory map and persisted in a single save, so a debit can never be
//! written without its matching credit.

use crate::error::{BusinessError, BusinessResult};
use crate::pin::{verify_pin, PinEntry};
use apexbank_core::{
    format_currency, validate_amount, validate_pin_format, Account, CoreError, TransactionEntry,
    TxKind,
};
use apexbank_persistence::{AccountMap, DataDir, JsonStore, TransactionLog};
use rand::Rng;

/// Outcome of a successful balance-changing operation.
#[derive(Debug, Clone)]
pub struct TransactionReceipt {
    pub kind: TxKind,
    pub amount: i64,
    pub new_balance: i64,
    /// Counterparty account number, for transfers
    pub counterparty: Option<String>,
}

/// Account ledger over the flat account store and the transaction log.
///
/// Operations re-read the authoritative store on entry; no account state
/// is cached across calls.
pub struct Ledger {
    accounts: JsonStore<AccountMap>,
    log: TransactionLog,
}

impl Ledger {
    pub fn new(data: &DataDir) -> Self {
        Self {
            accounts: data.accounts(),
            log: data.transactions(),
        }
    }

    // === Account lifecycle ===

    /// Open a new account with the default starting balance.
    ///
    /// Fails on a taken username or a malformed PIN; the generated
    /// 6-digit account number is collision-checked against all accounts.
    pub fn create_account(
        &self,
        username: &str,
        password: &str,
        pin: &str,
    ) -> BusinessResult<Account> {
        let mut accounts = self.accounts.load();

        if accounts.contains_key(username) {
            return Err(BusinessError::DuplicateUsername(username.to_string()));
        }
        validate_pin_format(pin)?;

        let account_no = generate_account_number(&accounts);
        let account = Account::new(password, pin, &account_no);
        accounts.insert(username.to_string(), account.clone());
        self.accounts.save(&accounts)?;

        tracing::info!(username, account_no, "account created");
        Ok(account)
    }

    /// Credential check against freshly reloaded state.
    ///
    /// Unknown username and wrong password both map to `AuthFailed`.
    pub fn authenticate(&self, username: &str, password: &str) -> BusinessResult<Account> {
        let accounts = self.accounts.load();
        match accounts.get(username) {
            Some(account) if account.verify_password(password) => Ok(account.clone()),
            _ => Err(BusinessError::AuthFailed),
        }
    }

    // === Read helpers ===

    /// Current record for a username
    pub fn get_account(&self, username: &str) -> BusinessResult<Account> {
        self.accounts
            .load()
            .get(username)
            .cloned()
            .ok_or_else(|| BusinessError::AccountNotFound(username.to_string()))
    }

    /// Current balance for a username
    pub fn balance_of(&self, username: &str) -> BusinessResult<i64> {
        Ok(self.get_account(username)?.balance)
    }

    /// Resolve an account by its 6-digit account number
    pub fn find_by_account_no(&self, account_no: &str) -> Option<(String, Account)> {
        self.accounts
            .load()
            .into_iter()
            .find(|(_, account)| account.account_no == account_no)
    }

    /// Full history for an account, newest first
    pub fn history(&self, account_no: &str) -> Vec<TransactionEntry> {
        self.log.for_account(account_no)
    }

    /// Last `n` entries for an account, newest first
    pub fn recent(&self, account_no: &str, n: usize) -> Vec<TransactionEntry> {
        self.log.recent(account_no, n)
    }

    // === Balance operations ===

    /// Deposit funds. Requires PIN confirmation; logs one Deposit entry.
    pub fn deposit(
        &self,
        username: &str,
        amount: i64,
        pin_entry: &mut dyn PinEntry,
    ) -> BusinessResult<TransactionReceipt> {
        validate_amount(amount)?;

        let mut accounts = self.accounts.load();
        let account = accounts
            .get_mut(username)
            .ok_or_else(|| BusinessError::AccountNotFound(username.to_string()))?;

        let pin = account.pin.clone();
        if !verify_pin(pin_entry, "Enter PIN for Deposit", &pin) {
            return Err(BusinessError::PinRejected);
        }

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(CoreError::InvalidAmount(amount))?;
        let receipt = TransactionReceipt {
            kind: TxKind::Deposit,
            amount,
            new_balance: account.balance,
            counterparty: None,
        };
        let account_no = account.account_no.clone();

        self.accounts.save(&accounts)?;
        self.log
            .append(TransactionEntry::new(&account_no, TxKind::Deposit, amount, None))?;

        tracing::info!(username, amount, "deposit");
        Ok(receipt)
    }

    /// Withdraw funds. Requires PIN; rejects debits that exceed the
    /// balance or breach the minimum-balance floor. Logs one Withdrawal
    /// entry with a negative amount.
    pub fn withdraw(
        &self,
        username: &str,
        amount: i64,
        pin_entry: &mut dyn PinEntry,
    ) -> BusinessResult<TransactionReceipt> {
        validate_amount(amount)?;

        let mut accounts = self.accounts.load();
        let account = accounts
            .get_mut(username)
            .ok_or_else(|| BusinessError::AccountNotFound(username.to_string()))?;

        let pin = account.pin.clone();
        if !verify_pin(pin_entry, "Enter PIN for Withdrawal", &pin) {
            return Err(BusinessError::PinRejected);
        }
        account.check_debit(amount)?;

        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or(CoreError::InvalidAmount(amount))?;
        let receipt = TransactionReceipt {
            kind: TxKind::Withdrawal,
            amount,
            new_balance: account.balance,
            counterparty: None,
        };
        let account_no = account.account_no.clone();

        self.accounts.save(&accounts)?;
        self.log.append(TransactionEntry::new(
            &account_no,
            TxKind::Withdrawal,
            -amount,
            None,
        ))?;

        tracing::info!(username, amount, "withdrawal");
        Ok(receipt)
    }

    /// Send funds to another account, resolved by account number.
    ///
    /// Debit and credit land in one save; two complementary log entries
    /// cross-reference each other's account number.
    pub fn transfer(
        &self,
        from_username: &str,
        to_account_no: &str,
        amount: i64,
        pin_entry: &mut dyn PinEntry,
    ) -> BusinessResult<TransactionReceipt> {
        validate_amount(amount)?;

        let (to_username, _) = self
            .find_by_account_no(to_account_no)
            .ok_or_else(|| BusinessError::AccountNotFound(to_account_no.to_string()))?;
        if to_username == from_username {
            return Err(BusinessError::SelfTransfer);
        }

        let sender = self.get_account(from_username)?;
        let prompt = format!(
            "Enter PIN to Authorize Send of {}",
            format_currency(amount)
        );
        if !verify_pin(pin_entry, &prompt, &sender.pin) {
            return Err(BusinessError::PinRejected);
        }

        self.execute_transfer(
            from_username,
            &to_username,
            amount,
            TxKind::Send,
            TxKind::ReceiveSend,
        )
    }

    /// Double-entry transfer between two usernames: validate the debit,
    /// mutate both balances in one map, save once, log both sides.
    ///
    /// Callers have already authorized the debit (PIN) and resolved both
    /// parties; funds checks run again here against reloaded state.
    pub(crate) fn execute_transfer(
        &self,
        from_username: &str,
        to_username: &str,
        amount: i64,
        debit_kind: TxKind,
        credit_kind: TxKind,
    ) -> BusinessResult<TransactionReceipt> {
        let mut accounts = self.accounts.load();

        let from = accounts
            .get(from_username)
            .ok_or_else(|| BusinessError::AccountNotFound(from_username.to_string()))?;
        from.check_debit(amount)?;
        let from_acc_no = from.account_no.clone();

        let debited = from
            .balance
            .checked_sub(amount)
            .ok_or(CoreError::InvalidAmount(amount))?;

        let to = accounts
            .get(to_username)
            .ok_or_else(|| BusinessError::AccountNotFound(to_username.to_string()))?;
        let to_acc_no = to.account_no.clone();
        let credited = to
            .balance
            .checked_add(amount)
            .ok_or(CoreError::InvalidAmount(amount))?;

        // All checks passed; mutate both sides, then one save
        if let Some(from) = accounts.get_mut(from_username) {
            from.balance = debited;
        }
        if let Some(to) = accounts.get_mut(to_username) {
            to.balance = credited;
        }
        let new_balance = debited;
        self.accounts.save(&accounts)?;

        self.log.append_all(vec![
            TransactionEntry::new(&from_acc_no, debit_kind, -amount, Some(&to_acc_no)),
            TransactionEntry::new(&to_acc_no, credit_kind, amount, Some(&from_acc_no)),
        ])?;

        tracing::info!(
            from = from_username,
            to = to_username,
            amount,
            kind = %debit_kind,
            "transfer"
        );
        Ok(TransactionReceipt {
            kind: debit_kind,
            amount,
            new_balance,
            counterparty: Some(to_acc_no),
        })
    }
}

/// Uniform random 6-digit account number, regenerated on collision.
fn generate_account_number(accounts: &AccountMap) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let account_no = rng.gen_range(100_000..=999_999).to_string();
        if !accounts
            .values()
            .any(|account| account.account_no == account_no)
        {
            return account_no;
        }
    }
}
