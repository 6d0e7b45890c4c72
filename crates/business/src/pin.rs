//! PIN confirmation boundary
//!
//! Every balance-debiting or transfer-initiating operation confirms the
//! initiating user's 4-digit PIN before touching state. The prompt itself
//! lives behind the `PinEntry` trait so the core stays UI-agnostic: the
//! CLI supplies a stdin prompt, tests supply a scripted one.

use std::collections::VecDeque;

/// Maximum PIN attempts before the enclosing operation aborts
pub const MAX_PIN_ATTEMPTS: u32 = 3;

/// A source of PIN input (one attempt per call).
///
/// Returning `None` means the user abandoned the prompt; the enclosing
/// operation aborts immediately without consuming further attempts.
pub trait PinEntry {
    fn read_pin(&mut self, prompt: &str, attempts_left: u32) -> Option<String>;
}

/// Drive up to [`MAX_PIN_ATTEMPTS`] attempts against the correct PIN.
///
/// Succeeds on the first match. Cancellation or exhausting all attempts
/// yields `false`; the caller must not mutate any state in that case.
pub fn verify_pin(entry: &mut dyn PinEntry, prompt: &str, correct_pin: &str) -> bool {
    for attempts_left in (1..=MAX_PIN_ATTEMPTS).rev() {
        match entry.read_pin(prompt, attempts_left) {
            None => return false,
            Some(pin) if pin == correct_pin => return true,
            Some(_) => {
                tracing::warn!(attempts_left = attempts_left - 1, "PIN mismatch");
            }
        }
    }
    false
}

/// Scripted PIN source for tests: pops one canned answer per attempt.
/// An exhausted script behaves like a cancelled prompt.
#[derive(Debug, Default)]
pub struct ScriptedPin {
    answers: VecDeque<Option<String>>,
}

impl ScriptedPin {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
        }
    }

    /// A script that answers correctly on the first attempt
    pub fn correct(pin: &str) -> Self {
        Self::new([Some(pin)])
    }

    /// A script that cancels the prompt immediately
    pub fn cancelled() -> Self {
        Self::new::<_, String>([None])
    }
}

impl PinEntry for ScriptedPin {
    fn read_pin(&mut self, _prompt: &str, _attempts_left: u32) -> Option<String> {
        self.answers.pop_front().flatten()
    }
}
