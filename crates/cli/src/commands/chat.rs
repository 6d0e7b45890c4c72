//! Assistant command: one-shot chat message

use anyhow::Result;
use apexbank_assistant::{respond, AssistantConfig, AssistantContext, OllamaClient};
use apexbank_business::Ledger;

use crate::Credentials;

/// Ask the banking assistant one question and print the reply.
///
/// Balance/history intents are answered locally from ledger state;
/// everything else goes to the Ollama endpoint.
pub fn ask(
    ledger: &Ledger,
    credentials: &Credentials,
    message: &str,
    model: &str,
    api_url: &str,
) -> Result<()> {
    let account = ledger.authenticate(&credentials.user, &credentials.password)?;

    let context = AssistantContext {
        balance: account.balance,
        recent: ledger.recent(&account.account_no, 3),
    };
    let client = OllamaClient::new(AssistantConfig {
        api_url: api_url.to_string(),
        model: model.to_string(),
        ..AssistantConfig::default()
    })?;

    println!("You: {}", message);
    println!("{}", respond(message, &context, &client));
    Ok(())
}
