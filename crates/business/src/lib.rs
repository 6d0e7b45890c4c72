//! # Apexbank Business
//!
//! Business logic layer - the Ledger and the money-request workflow.
//!
//! Every state-changing operation follows the same shape:
//! load-all from the authoritative store, validate, mutate in memory,
//! save-all, then append to the transaction log. Nothing is cached
//! between operations; each call re-reads persisted state.

pub mod error;
pub mod ledger;
pub mod pin;
pub mod requests;

pub use error::{BusinessError, BusinessResult};
pub use ledger::{Ledger, TransactionReceipt};
pub use pin::{verify_pin, PinEntry, ScriptedPin, MAX_PIN_ATTEMPTS};
pub use requests::RequestService;
