//! # Apexbank Assistant
//!
//! Chat-style banking assistant. A fixed set of banking intents is
//! recognized locally and answered from read-only ledger state; anything
//! else is forwarded to a local Ollama endpoint. The assistant never
//! mutates accounts, logs, or requests, and a failing backend degrades to
//! a diagnostic chat message instead of crashing the session.

pub mod intent;
pub mod ollama;

pub use intent::{classify, respond, AssistantContext, Intent};
pub use ollama::{AssistantConfig, AssistantError, OllamaClient};

/// Display name the assistant signs its replies with
pub const ASSISTANT_NAME: &str = "Arna";
