//! Money-request workflow - pull payments awaiting approval
//!
//! A requester asks a source account to push funds. The request sits in
//! `pending` until the source account holder approves (with PIN) or
//! denies it. Approval re-enters the Ledger for the actual transfer;
//! this module never mutates balances directly.

use crate::error::{BusinessError, BusinessResult};
use crate::ledger::{Ledger, TransactionReceipt};
use crate::pin::{verify_pin, PinEntry};
use apexbank_core::{
    format_currency, validate_amount, MoneyRequest, RequestStatus, TxKind,
};
use apexbank_persistence::{DataDir, JsonStore, RequestMap};
use chrono::Utc;
use rand::Rng;

/// Pull-payment request service over the request store and the Ledger.
pub struct RequestService<'a> {
    requests: JsonStore<RequestMap>,
    ledger: &'a Ledger,
}

impl<'a> RequestService<'a> {
    pub fn new(data: &DataDir, ledger: &'a Ledger) -> Self {
        Self {
            requests: data.requests(),
            ledger,
        }
    }

    /// Create a pending request asking `source_acc_no` to send funds to
    /// the requester. No money moves and no PIN is asked at this stage.
    pub fn create(
        &self,
        requester_username: &str,
        source_acc_no: &str,
        amount: i64,
    ) -> BusinessResult<MoneyRequest> {
        validate_amount(amount)?;

        let (source_username, _) = self
            .ledger
            .find_by_account_no(source_acc_no)
            .ok_or_else(|| BusinessError::AccountNotFound(source_acc_no.to_string()))?;
        if source_username == requester_username {
            return Err(BusinessError::SelfRequest);
        }
        let requester = self.ledger.get_account(requester_username)?;

        let mut requests = self.requests.load();
        let request_id = generate_request_id(&requests);
        let request = MoneyRequest::new(
            &request_id,
            &requester.account_no,
            requester_username,
            source_acc_no,
            &source_username,
            amount,
        );
        requests.insert(request_id.clone(), request.clone());
        self.requests.save(&requests)?;

        tracing::info!(
            request_id,
            requester = requester_username,
            source = source_username,
            amount,
            "money request created"
        );
        Ok(request)
    }

    /// All pending requests addressed to `source_acc_no`, in storage order.
    pub fn pending_for(&self, source_acc_no: &str) -> Vec<MoneyRequest> {
        self.requests
            .load()
            .into_values()
            .filter(|request| request.source_acc_no == source_acc_no && request.is_pending())
            .collect()
    }

    /// Look up a single request by ID
    pub fn get(&self, request_id: &str) -> Option<MoneyRequest> {
        self.requests.load().get(request_id).cloned()
    }

    /// Approve a pending request: the approver (the request's source
    /// account holder) is debited, the requester credited, and the
    /// request flips to `approved`.
    ///
    /// A request that is absent, already terminal, or not addressed to
    /// the approver fails with `RequestNotFound`, so replaying an
    /// approval can never transfer twice.
    ///
    /// The ledger save and the request-status save are two separate
    /// writes; a crash between them leaves a transferred amount with a
    /// still-pending request. Accepted single-writer inconsistency
    /// window, matching the on-disk layout this store inherits.
    pub fn approve(
        &self,
        request_id: &str,
        approver_username: &str,
        pin_entry: &mut dyn PinEntry,
    ) -> BusinessResult<TransactionReceipt> {
        let mut requests = self.requests.load();
        let approver = self.ledger.get_account(approver_username)?;

        let request = requests
            .get(request_id)
            .filter(|request| request.is_pending())
            .filter(|request| request.source_acc_no == approver.account_no)
            .cloned()
            .ok_or_else(|| BusinessError::RequestNotFound(request_id.to_string()))?;

        approver.check_debit(request.amount)?;

        let prompt = format!(
            "Enter YOUR PIN to send {}",
            format_currency(request.amount)
        );
        if !verify_pin(pin_entry, &prompt, &approver.pin) {
            return Err(BusinessError::PinRejected);
        }

        let (requester_username, _) = self
            .ledger
            .find_by_account_no(&request.requester_acc_no)
            .ok_or_else(|| BusinessError::AccountNotFound(request.requester_acc_no.clone()))?;

        let receipt = self.ledger.execute_transfer(
            approver_username,
            &requester_username,
            request.amount,
            TxKind::SendRequest,
            TxKind::ReceiveRequest,
        )?;

        if let Some(stored) = requests.get_mut(request_id) {
            stored.status = RequestStatus::Approved;
        }
        self.requests.save(&requests)?;

        tracing::info!(request_id, approver = approver_username, "request approved");
        Ok(receipt)
    }

    /// Deny a pending request. No balance effect, no PIN.
    ///
    /// Like `approve`, only the request's source account holder may
    /// settle it; anyone else gets `RequestNotFound`.
    pub fn deny(&self, request_id: &str, approver_username: &str) -> BusinessResult<MoneyRequest> {
        let mut requests = self.requests.load();
        let approver = self.ledger.get_account(approver_username)?;

        let request = requests
            .get_mut(request_id)
            .filter(|request| request.is_pending())
            .filter(|request| request.source_acc_no == approver.account_no)
            .ok_or_else(|| BusinessError::RequestNotFound(request_id.to_string()))?;
        request.status = RequestStatus::Denied;
        let denied = request.clone();

        self.requests.save(&requests)?;

        tracing::info!(request_id, "request denied");
        Ok(denied)
    }
}

/// Time-seeded request ID with a 3-digit random suffix, collision-checked.
fn generate_request_id(requests: &RequestMap) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let request_id = format!("req_{}{}", Utc::now().timestamp(), rng.gen_range(100..1000));
        if !requests.contains_key(&request_id) {
            return request_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::ScriptedPin;
    use apexbank_core::{CoreError, DEFAULT_STARTING_BALANCE};
    use tempfile::tempdir;

    struct Fixture {
        _dir: tempfile::TempDir,
        ledger: Ledger,
        data: DataDir,
    }

    fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let ledger = Ledger::new(&data);
        ledger.create_account("alice", "pw", "1234").unwrap();
        ledger.create_account("bob", "pw", "5678").unwrap();
        Fixture {
            _dir: dir,
            ledger,
            data,
        }
    }

    #[test]
    fn test_create_request_pending() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        let bob = f.ledger.get_account("bob").unwrap();

        let request = service.create("alice", &bob.account_no, 3_000).unwrap();
        assert!(request.is_pending());
        assert!(request.request_id.starts_with("req_"));
        assert_eq!(request.source_username, "bob");

        let pending = service.pending_for(&bob.account_no);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].request_id, request.request_id);

        // Nothing pending for the requester's own account
        let alice = f.ledger.get_account("alice").unwrap();
        assert!(service.pending_for(&alice.account_no).is_empty());
    }

    #[test]
    fn test_create_request_validation() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        let alice = f.ledger.get_account("alice").unwrap();
        let bob = f.ledger.get_account("bob").unwrap();

        assert!(matches!(
            service.create("alice", &bob.account_no, 0),
            Err(BusinessError::Core(CoreError::InvalidAmount(0)))
        ));
        assert!(matches!(
            service.create("alice", &bob.account_no, -10),
            Err(BusinessError::Core(CoreError::InvalidAmount(-10)))
        ));
        assert!(matches!(
            service.create("alice", &alice.account_no, 100),
            Err(BusinessError::SelfRequest)
        ));
        assert!(matches!(
            service.create("alice", "000000", 100),
            Err(BusinessError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_approve_transfers_and_flips_status() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        let bob = f.ledger.get_account("bob").unwrap();

        let request = service.create("alice", &bob.account_no, 3_000).unwrap();
        let receipt = service
            .approve(&request.request_id, "bob", &mut ScriptedPin::correct("5678"))
            .unwrap();

        assert_eq!(receipt.kind, TxKind::SendRequest);
        assert_eq!(receipt.new_balance, DEFAULT_STARTING_BALANCE - 3_000);
        assert_eq!(f.ledger.balance_of("alice").unwrap(), DEFAULT_STARTING_BALANCE + 3_000);
        assert_eq!(f.ledger.balance_of("bob").unwrap(), DEFAULT_STARTING_BALANCE - 3_000);

        let stored = service.get(&request.request_id).unwrap();
        assert_eq!(stored.status, RequestStatus::Approved);

        // Both sides logged with request kinds
        let alice = f.ledger.get_account("alice").unwrap();
        let received = f.ledger.history(&alice.account_no);
        assert_eq!(received[0].kind, TxKind::ReceiveRequest);
        assert_eq!(received[0].amount, 3_000);
        let sent = f.ledger.history(&bob.account_no);
        assert_eq!(sent[0].kind, TxKind::SendRequest);
        assert_eq!(sent[0].amount, -3_000);
    }

    #[test]
    fn test_approve_replay_rejected_without_second_transfer() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        let bob = f.ledger.get_account("bob").unwrap();

        let request = service.create("alice", &bob.account_no, 3_000).unwrap();
        service
            .approve(&request.request_id, "bob", &mut ScriptedPin::correct("5678"))
            .unwrap();

        let err = service
            .approve(&request.request_id, "bob", &mut ScriptedPin::correct("5678"))
            .unwrap_err();
        assert!(matches!(err, BusinessError::RequestNotFound(_)));
        assert_eq!(f.ledger.balance_of("bob").unwrap(), DEFAULT_STARTING_BALANCE - 3_000);
    }

    #[test]
    fn test_approve_by_wrong_account_rejected() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        let bob = f.ledger.get_account("bob").unwrap();

        let request = service.create("alice", &bob.account_no, 3_000).unwrap();
        // alice is the requester, not the source; she cannot approve
        let err = service
            .approve(&request.request_id, "alice", &mut ScriptedPin::correct("1234"))
            .unwrap_err();
        assert!(matches!(err, BusinessError::RequestNotFound(_)));
        assert!(service.get(&request.request_id).unwrap().is_pending());
    }

    #[test]
    fn test_approve_insufficient_funds_keeps_request_pending() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        let bob = f.ledger.get_account("bob").unwrap();

        let request = service
            .create("alice", &bob.account_no, DEFAULT_STARTING_BALANCE * 2)
            .unwrap();
        let err = service
            .approve(&request.request_id, "bob", &mut ScriptedPin::correct("5678"))
            .unwrap_err();
        assert!(matches!(
            err,
            BusinessError::Core(CoreError::InsufficientFunds { .. })
        ));
        assert!(service.get(&request.request_id).unwrap().is_pending());
        assert_eq!(f.ledger.balance_of("bob").unwrap(), DEFAULT_STARTING_BALANCE);
    }

    #[test]
    fn test_approve_pin_rejection_keeps_request_pending() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        let bob = f.ledger.get_account("bob").unwrap();

        let request = service.create("alice", &bob.account_no, 3_000).unwrap();
        let err = service
            .approve(&request.request_id, "bob", &mut ScriptedPin::cancelled())
            .unwrap_err();
        assert!(err.is_pin_rejected());
        assert!(service.get(&request.request_id).unwrap().is_pending());
        assert_eq!(f.ledger.balance_of("bob").unwrap(), DEFAULT_STARTING_BALANCE);
    }

    #[test]
    fn test_deny_terminal_without_balance_effect() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        let bob = f.ledger.get_account("bob").unwrap();

        let request = service.create("alice", &bob.account_no, 3_000).unwrap();
        let denied = service.deny(&request.request_id, "bob").unwrap();
        assert_eq!(denied.status, RequestStatus::Denied);
        assert_eq!(f.ledger.balance_of("bob").unwrap(), DEFAULT_STARTING_BALANCE);
        assert!(service.pending_for(&bob.account_no).is_empty());

        // Terminal states are never reopened
        assert!(matches!(
            service.deny(&request.request_id, "bob"),
            Err(BusinessError::RequestNotFound(_))
        ));
        assert!(matches!(
            service.approve(&request.request_id, "bob", &mut ScriptedPin::correct("5678")),
            Err(BusinessError::RequestNotFound(_))
        ));
    }

    #[test]
    fn test_deny_unknown_request() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        assert!(matches!(
            service.deny("req_does_not_exist", "bob"),
            Err(BusinessError::RequestNotFound(_))
        ));
    }

    #[test]
    fn test_deny_by_wrong_account_rejected() {
        let f = fixture();
        let service = RequestService::new(&f.data, &f.ledger);
        let bob = f.ledger.get_account("bob").unwrap();

        let request = service.create("alice", &bob.account_no, 3_000).unwrap();
        // Neither the requester nor a third account may settle it
        f.ledger.create_account("carol", "pw", "9999").unwrap();
        for user in ["alice", "carol"] {
            let err = service.deny(&request.request_id, user).unwrap_err();
            assert!(matches!(err, BusinessError::RequestNotFound(_)));
        }
        assert!(service.get(&request.request_id).unwrap().is_pending());
    }
}
