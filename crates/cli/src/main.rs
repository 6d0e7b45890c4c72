//! Apexbank CLI - banking operations from the command line
//!
//! Usage:
//! ```bash
//! apexbank signup alice secret 1234
//! apexbank deposit --user alice --password secret 1000
//! apexbank send --user alice --password secret 654321 2000
//! apexbank request --user alice --password secret 654321 3000
//! apexbank approve --user bob --password hunter2 req_1700000000123
//! apexbank chat --user alice --password secret "what is my balance?"
//! ```
//!
//! The CLI is the presentation collaborator: it authenticates, reads the
//! PIN from stdin when an operation requires confirmation, and renders
//! typed business errors as plain messages.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use apexbank_business::Ledger;
use apexbank_persistence::DataDir;

mod commands;
mod pin;

use commands::{account, chat, request, transaction};

/// Apexbank - a single-user desktop banking simulator core
#[derive(Parser)]
#[command(name = "apexbank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding the account, log, and request stores
    #[arg(long, default_value = "data", global = true)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Credentials every logged-in command takes
#[derive(clap::Args)]
pub struct Credentials {
    /// Username
    #[arg(long, short)]
    pub user: String,
    /// Password
    #[arg(long, short)]
    pub password: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account
    Signup {
        username: String,
        password: String,
        /// 4-digit transaction PIN
        pin: String,
    },

    /// Verify credentials and show account details
    Login {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Show the current balance
    Balance {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Deposit funds (asks for PIN)
    Deposit {
        #[command(flatten)]
        credentials: Credentials,
        /// Amount in whole USD
        amount: i64,
    },

    /// Withdraw funds (asks for PIN)
    Withdraw {
        #[command(flatten)]
        credentials: Credentials,
        /// Amount in whole USD
        amount: i64,
    },

    /// Send funds to another account (asks for PIN)
    Send {
        #[command(flatten)]
        credentials: Credentials,
        /// Recipient 6-digit account number
        to_account: String,
        /// Amount in whole USD
        amount: i64,
    },

    /// Show transaction history, most recent first
    History {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Request money from another account (pull payment)
    Request {
        #[command(flatten)]
        credentials: Credentials,
        /// Source 6-digit account number to request from
        source_account: String,
        /// Amount in whole USD
        amount: i64,
    },

    /// List pending money requests addressed to you
    Requests {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Approve a pending money request (asks for PIN)
    Approve {
        #[command(flatten)]
        credentials: Credentials,
        /// Request ID
        request_id: String,
    },

    /// Deny a pending money request
    Deny {
        #[command(flatten)]
        credentials: Credentials,
        /// Request ID
        request_id: String,
    },

    /// Ask the banking assistant a question
    Chat {
        #[command(flatten)]
        credentials: Credentials,
        /// The message to send
        message: String,
        /// Ollama model for general questions
        #[arg(long, default_value = "qwen2.5")]
        model: String,
        /// Ollama generate endpoint
        #[arg(long, default_value = "http://localhost:11434/api/generate")]
        api_url: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let data = DataDir::new(&cli.data_dir);
    let ledger = Ledger::new(&data);

    match cli.command {
        Commands::Signup {
            username,
            password,
            pin,
        } => account::signup(&ledger, &username, &password, &pin),

        Commands::Login { credentials } => account::login(&ledger, &credentials),

        Commands::Balance { credentials } => account::balance(&ledger, &credentials),

        Commands::Deposit {
            credentials,
            amount,
        } => transaction::deposit(&ledger, &credentials, amount),

        Commands::Withdraw {
            credentials,
            amount,
        } => transaction::withdraw(&ledger, &credentials, amount),

        Commands::Send {
            credentials,
            to_account,
            amount,
        } => transaction::send(&ledger, &credentials, &to_account, amount),

        Commands::History { credentials } => account::history(&ledger, &credentials),

        Commands::Request {
            credentials,
            source_account,
            amount,
        } => request::create(&data, &ledger, &credentials, &source_account, amount),

        Commands::Requests { credentials } => request::list(&data, &ledger, &credentials),

        Commands::Approve {
            credentials,
            request_id,
        } => request::approve(&data, &ledger, &credentials, &request_id),

        Commands::Deny {
            credentials,
            request_id,
        } => request::deny(&data, &ledger, &credentials, &request_id),

        Commands::Chat {
            credentials,
            message,
            model,
            api_url,
        } => chat::ask(&ledger, &credentials, &message, &model, &api_url),
    }
}
