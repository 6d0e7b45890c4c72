//! CLI command handlers

pub mod account;
pub mod chat;
pub mod request;
pub mod transaction;

use apexbank_core::{format_currency, wealth_message};

/// Render a success line plus the optional wealth-tier flavor message
/// for the resulting balance.
pub fn print_result(message: &str, new_balance: i64) {
    println!("✅ {}", message);
    println!("   Balance: {}", format_currency(new_balance));
    if let Some(flavor) = wealth_message(new_balance) {
        println!("   {}", flavor);
    }
}
