//! # Courier CLI
//!
//! Command-line driver for the signed webhook submission pipeline.
//!
//! Reads a push request (document, attachment URLs, endpoint config) as
//! JSON from a file or stdin, runs the pipeline once, and prints the
//! outcome payload as JSON. This is the transport boundary the core leaves
//! external: validation failures and downstream failures map to distinct
//! exit codes so callers can tell client faults from service faults.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use courier_core::{
    ClientBuildError, ClientConfig, CourierClient, CourierError, DocumentSubmitter, PushFailure,
    PushRequest,
};
use tracing::info;

// ============================================================================
// CLI Structure
// ============================================================================

/// Courier CLI - signed document submission to a webhook receiving service
#[derive(Parser)]
#[command(name = "courier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Submit a business document and its attachments under signed webhook requests")]
pub struct Cli {
    /// Push request JSON file (reads stdin when omitted)
    #[arg(short, long, env = "COURIER_INPUT")]
    pub input: Option<PathBuf>,

    /// Logging level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    pub json_logs: bool,

    /// Include diagnostic detail in failure output
    #[arg(long)]
    pub debug_detail: bool,

    /// Timeout in seconds for each outbound call
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Require valid TLS certificates on outbound calls
    #[arg(long)]
    pub verify_certs: bool,
}

/// Errors the CLI reports to the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Client construction failed: {0}")]
    Client(#[from] ClientBuildError),

    #[error("Push failed: {0}")]
    Push(#[from] CourierError),

    #[error("Failed to render output: {message}")]
    Output { message: String },
}

// ============================================================================
// Entry Point
// ============================================================================

/// Parse arguments, run the pipeline once, and print the outcome.
pub async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let request = load_request(cli.input.as_deref())?;

    info!(
        document_id = %request.document_data.document_id,
        "starting push"
    );

    let config = ClientConfig::default()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_accept_invalid_certs(!cli.verify_certs);
    let client = CourierClient::new(config)?;
    let submitter = DocumentSubmitter::new(&client);

    match submitter.submit(&request).await {
        Ok(outcome) => {
            println!("{}", render_json(&outcome)?);
            Ok(())
        }
        Err(error) => {
            let failure = PushFailure::from_error(&error, cli.debug_detail);
            println!("{}", render_json(&failure)?);
            Err(CliError::Push(error))
        }
    }
}

/// Read and parse the push request from a file, or stdin when no path is
/// given.
pub fn load_request(input: Option<&Path>) -> Result<PushRequest, CliError> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    serde_json::from_str(&raw).map_err(|e| CliError::InvalidInput {
        message: e.to_string(),
    })
}

fn render_json(value: &impl serde::Serialize) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Output {
        message: e.to_string(),
    })
}

fn init_tracing(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    let result = if cli.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    // A subscriber installed by the embedding process wins
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
