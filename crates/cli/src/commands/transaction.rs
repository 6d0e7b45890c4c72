//! Balance operations: deposit, withdraw, send

use anyhow::Result;
use apexbank_business::Ledger;
use apexbank_core::format_currency;

use crate::commands::print_result;
use crate::pin::StdinPin;
use crate::Credentials;

/// Deposit funds into the caller's account
pub fn deposit(ledger: &Ledger, credentials: &Credentials, amount: i64) -> Result<()> {
    ledger.authenticate(&credentials.user, &credentials.password)?;
    let receipt = ledger.deposit(&credentials.user, amount, &mut StdinPin)?;
    print_result(
        &format!("Deposit Successful! Amount: {}", format_currency(amount)),
        receipt.new_balance,
    );
    Ok(())
}

/// Withdraw funds from the caller's account
pub fn withdraw(ledger: &Ledger, credentials: &Credentials, amount: i64) -> Result<()> {
    ledger.authenticate(&credentials.user, &credentials.password)?;
    let receipt = ledger.withdraw(&credentials.user, amount, &mut StdinPin)?;
    print_result(
        &format!("Withdrawal Successful! Amount: {}", format_currency(amount)),
        receipt.new_balance,
    );
    Ok(())
}

/// Send funds to another account by account number
pub fn send(
    ledger: &Ledger,
    credentials: &Credentials,
    to_account: &str,
    amount: i64,
) -> Result<()> {
    ledger.authenticate(&credentials.user, &credentials.password)?;
    let receipt = ledger.transfer(&credentials.user, to_account, amount, &mut StdinPin)?;
    print_result(
        &format!(
            "Sent {} to account {}",
            format_currency(amount),
            to_account
        ),
        receipt.new_balance,
    );
    Ok(())
}
