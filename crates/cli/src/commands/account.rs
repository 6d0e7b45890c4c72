//! Account commands: signup, login, balance, history

use anyhow::Result;
use apexbank_business::Ledger;
use apexbank_core::format_currency;

use crate::Credentials;

/// Create a new account
pub fn signup(ledger: &Ledger, username: &str, password: &str, pin: &str) -> Result<()> {
    let account = ledger.create_account(username, password, pin)?;
    println!("✅ Account created!");
    println!("   Username:   {}", username);
    println!("   Account No: {}", account.account_no);
    println!("   Balance:    {}", format_currency(account.balance));
    Ok(())
}

/// Verify credentials and show account details
pub fn login(ledger: &Ledger, credentials: &Credentials) -> Result<()> {
    let account = ledger.authenticate(&credentials.user, &credentials.password)?;
    println!("✅ Welcome, {}", credentials.user);
    println!("   Account No: {}", account.account_no);
    println!("   Balance:    {}", format_currency(account.balance));
    Ok(())
}

/// Show the current balance
pub fn balance(ledger: &Ledger, credentials: &Credentials) -> Result<()> {
    let account = ledger.authenticate(&credentials.user, &credentials.password)?;
    println!("{}", format_currency(account.balance));
    Ok(())
}

/// Print transaction history, most recent first
pub fn history(ledger: &Ledger, credentials: &Credentials) -> Result<()> {
    let account = ledger.authenticate(&credentials.user, &credentials.password)?;
    let entries = ledger.history(&account.account_no);

    if entries.is_empty() {
        println!("No transactions recorded yet.");
        return Ok(());
    }

    println!(
        "{:<20} {:<18} {:>16} {:<10} {:<8}",
        "Date/Time", "Type", "Amount", "Target", "Status"
    );
    for entry in entries {
        println!(
            "{:<20} {:<18} {:>16} {:<10} {:<8}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.kind.to_string(),
            format_currency(entry.amount),
            entry.target_acc_no.as_deref().unwrap_or("-"),
            entry.status.to_string(),
        );
    }
    Ok(())
}
