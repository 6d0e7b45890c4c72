//! Intent router - fixed banking intents, recognized locally
//!
//! Pure classification over the lowercased message. Balance and history
//! questions are answered from read-only ledger state, transactional
//! verbs get a canned refusal, and everything else is delegated to the
//! generation backend.

use crate::ollama::{AssistantError, OllamaClient};
use crate::ASSISTANT_NAME;
use apexbank_core::{format_currency, TransactionEntry};

/// Words that mark a message as asking the assistant to move money
const TRANSACTIONAL_VERBS: [&str; 6] =
    ["send", "deposit", "withdraw", "transfer", "request", "move money"];

/// Words that mark a balance-adjacent money question, unless a
/// transactional verb is present
const MONEY_VERBS: [&str; 3] = ["send", "deposit", "withdraw"];

const HISTORY_TERMS: [&str; 4] = ["history", "transactions", "statement", "past activity"];

/// Recognized banking intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Balance inquiry, answered from the ledger
    Balance,
    /// History/statement inquiry, answered from the transaction log
    History,
    /// Any transactional verb - always refused
    TransactionRefusal,
    /// Everything else - delegated to the generation backend
    General,
}

/// Classify a free-text message into one of the fixed intents.
pub fn classify(message: &str) -> Intent {
    let message = message.to_lowercase();

    let asks_money = message.contains("money")
        && !MONEY_VERBS.iter().any(|verb| message.contains(verb));
    if message.contains("balance") || asks_money {
        return Intent::Balance;
    }

    if HISTORY_TERMS.iter().any(|term| message.contains(term)) {
        return Intent::History;
    }

    if TRANSACTIONAL_VERBS.iter().any(|verb| message.contains(verb)) {
        return Intent::TransactionRefusal;
    }

    Intent::General
}

/// Read-only account context the router answers from.
#[derive(Debug, Clone)]
pub struct AssistantContext {
    pub balance: i64,
    /// Recent log entries, newest first
    pub recent: Vec<TransactionEntry>,
}

/// Produce the assistant's reply for a message.
///
/// Local intents never touch the backend; `General` messages go to the
/// client and every backend failure maps to a distinct diagnostic line.
pub fn respond(message: &str, context: &AssistantContext, client: &OllamaClient) -> String {
    match classify(message) {
        Intent::Balance => balance_reply(context),
        Intent::History => history_reply(context),
        Intent::TransactionRefusal => refusal_reply(),
        Intent::General => match client.generate(message) {
            Ok(answer) => format!("{}: {}", ASSISTANT_NAME, answer),
            Err(error) => {
                tracing::warn!(error = %error, "assistant backend failure");
                diagnostic_reply(&error, client.model())
            }
        },
    }
}

fn balance_reply(context: &AssistantContext) -> String {
    format!(
        "{}: Your current balance is {}. For security, I cannot execute transfers.",
        ASSISTANT_NAME,
        format_currency(context.balance)
    )
}

fn history_reply(context: &AssistantContext) -> String {
    if context.recent.is_empty() {
        return format!(
            "{}: I checked the logs, and there is no transaction history recorded for this account yet.",
            ASSISTANT_NAME
        );
    }

    let shown = context.recent.len().min(3);
    let mut reply = format!(
        "{}: Here are your last {} transactions:\n",
        ASSISTANT_NAME, shown
    );
    for entry in context.recent.iter().take(shown) {
        let direction = if entry.amount < 0 || entry.kind.is_outflow() {
            "sent/withdrawn"
        } else {
            "received/deposited"
        };
        reply.push_str(&format!(
            "  - {}: {} {} ({})\n",
            entry.timestamp.format("%Y-%m-%d"),
            format_currency(entry.amount.abs()),
            direction,
            entry.kind
        ));
    }
    reply
}

fn refusal_reply() -> String {
    format!(
        "{}: For strict security policies, I cannot directly initiate or complete transactions. \
         Please use the dedicated banking commands.",
        ASSISTANT_NAME
    )
}

fn diagnostic_reply(error: &AssistantError, model: &str) -> String {
    match error {
        AssistantError::Unreachable => format!(
            "{}: Connection Error. Please ensure Ollama is running.",
            ASSISTANT_NAME
        ),
        AssistantError::ModelNotFound(_) => format!(
            "{}: Model Error (404). The model {} may not be installed.",
            ASSISTANT_NAME, model
        ),
        AssistantError::Http(status) => format!(
            "{}: An HTTP error occurred: status {}.",
            ASSISTANT_NAME, status
        ),
        AssistantError::Unexpected(detail) => format!(
            "{}: An unexpected error occurred: {}.",
            ASSISTANT_NAME, detail
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apexbank_core::TxKind;

    #[test]
    fn test_classify_balance() {
        assert_eq!(classify("what is my balance?"), Intent::Balance);
        assert_eq!(classify("How much MONEY do I have"), Intent::Balance);
        // "move money" carries no send/deposit/withdraw, so the balance
        // branch wins over the refusal branch
        assert_eq!(classify("please move money for me"), Intent::Balance);
    }

    #[test]
    fn test_classify_money_with_transactional_verb_is_refused() {
        // "send money" must not leak into the balance branch
        assert_eq!(classify("send money to bob"), Intent::TransactionRefusal);
        assert_eq!(classify("deposit money please"), Intent::TransactionRefusal);
    }

    #[test]
    fn test_classify_history() {
        assert_eq!(classify("show my transaction history"), Intent::History);
        assert_eq!(classify("give me a statement"), Intent::History);
        assert_eq!(classify("past activity?"), Intent::History);
    }

    #[test]
    fn test_classify_refusal() {
        for msg in [
            "send 100 to bob",
            "withdraw everything",
            "transfer funds",
            "request cash from alice",
        ] {
            assert_eq!(classify(msg), Intent::TransactionRefusal, "{msg}");
        }
    }

    #[test]
    fn test_classify_general() {
        assert_eq!(classify("what is compound interest?"), Intent::General);
        assert_eq!(classify("hello"), Intent::General);
    }

    #[test]
    fn test_balance_reply_formats_currency() {
        let context = AssistantContext {
            balance: 501_000,
            recent: vec![],
        };
        let reply = balance_reply(&context);
        assert!(reply.contains("USD 501,000.00"));
        assert!(reply.starts_with("Arna:"));
    }

    #[test]
    fn test_history_reply_empty() {
        let context = AssistantContext {
            balance: 0,
            recent: vec![],
        };
        assert!(history_reply(&context).contains("no transaction history"));
    }

    #[test]
    fn test_history_reply_caps_at_three() {
        let recent: Vec<TransactionEntry> = (0..5)
            .map(|i| TransactionEntry::new("111111", TxKind::Deposit, 100 + i, None))
            .collect();
        let context = AssistantContext {
            balance: 0,
            recent,
        };
        let reply = history_reply(&context);
        assert!(reply.contains("last 3 transactions"));
        assert_eq!(reply.matches("received/deposited").count(), 3);
    }

    #[test]
    fn test_history_reply_direction() {
        let context = AssistantContext {
            balance: 0,
            recent: vec![TransactionEntry::new(
                "111111",
                TxKind::Send,
                -2_000,
                Some("222222"),
            )],
        };
        let reply = history_reply(&context);
        assert!(reply.contains("sent/withdrawn"));
        assert!(reply.contains("USD 2,000.00"));
        assert!(reply.contains("(Send)"));
    }

    #[test]
    fn test_diagnostic_replies_are_distinct() {
        let unreachable = diagnostic_reply(&AssistantError::Unreachable, "qwen2.5");
        let missing = diagnostic_reply(&AssistantError::ModelNotFound("qwen2.5".into()), "qwen2.5");
        let http = diagnostic_reply(&AssistantError::Http(500), "qwen2.5");
        let other = diagnostic_reply(&AssistantError::Unexpected("boom".into()), "qwen2.5");

        assert!(unreachable.contains("Ollama is running"));
        assert!(missing.contains("404"));
        assert!(http.contains("500"));
        assert!(other.contains("boom"));
        let all = [&unreachable, &missing, &http, &other];
        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
