//! Stdin-backed PIN prompt for the CLI

use apexbank_business::PinEntry;
use std::io::{self, BufRead, Write};

/// Reads one PIN attempt per prompt from stdin.
/// An empty line or EOF counts as abandoning the prompt.
pub struct StdinPin;

impl PinEntry for StdinPin {
    fn read_pin(&mut self, prompt: &str, attempts_left: u32) -> Option<String> {
        print!("{} (Attempts left: {}): ", prompt, attempts_left);
        io::stdout().flush().ok()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok()?;
        let pin = line.trim();
        if pin.is_empty() {
            return None;
        }
        Some(pin.to_string())
    }
}
