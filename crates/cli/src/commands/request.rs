//! Money-request commands: create, list, approve, deny

use anyhow::Result;
use apexbank_business::{Ledger, RequestService};
use apexbank_core::format_currency;
use apexbank_persistence::DataDir;

use crate::commands::print_result;
use crate::pin::StdinPin;
use crate::Credentials;

/// Create a pull-payment request against another account
pub fn create(
    data: &DataDir,
    ledger: &Ledger,
    credentials: &Credentials,
    source_account: &str,
    amount: i64,
) -> Result<()> {
    ledger.authenticate(&credentials.user, &credentials.password)?;
    let service = RequestService::new(data, ledger);
    let request = service.create(&credentials.user, source_account, amount)?;

    println!("✅ Request sent!");
    println!("   Request ID: {}", request.request_id);
    println!(
        "   Your request for {} has been sent to {}. They will see it when they log in.",
        format_currency(request.amount),
        request.source_username
    );
    Ok(())
}

/// List pending requests addressed to the caller
pub fn list(data: &DataDir, ledger: &Ledger, credentials: &Credentials) -> Result<()> {
    let account = ledger.authenticate(&credentials.user, &credentials.password)?;
    let service = RequestService::new(data, ledger);
    let pending = service.pending_for(&account.account_no);

    if pending.is_empty() {
        println!("You have no pending requests.");
        return Ok(());
    }

    println!(
        "{:<22} {:<12} {:<16} {:>16}",
        "Request ID", "Date", "From", "Amount"
    );
    for request in pending {
        println!(
            "{:<22} {:<12} {:<16} {:>16}",
            request.request_id,
            request.timestamp.format("%Y-%m-%d"),
            request.requester_username,
            format_currency(request.amount),
        );
    }
    Ok(())
}

/// Approve a pending request addressed to the caller
pub fn approve(
    data: &DataDir,
    ledger: &Ledger,
    credentials: &Credentials,
    request_id: &str,
) -> Result<()> {
    ledger.authenticate(&credentials.user, &credentials.password)?;
    let service = RequestService::new(data, ledger);
    let receipt = service.approve(request_id, &credentials.user, &mut StdinPin)?;
    print_result("Request approved and money sent!", receipt.new_balance);
    Ok(())
}

/// Deny a pending request
pub fn deny(
    data: &DataDir,
    ledger: &Ledger,
    credentials: &Credentials,
    request_id: &str,
) -> Result<()> {
    ledger.authenticate(&credentials.user, &credentials.password)?;
    let service = RequestService::new(data, ledger);
    service.deny(request_id, &credentials.user)?;
    println!("✅ The money request has been denied.");
    Ok(())
}
