use courier_cli::{run_cli, CliError};
use tracing::error;

#[tokio::main]
async fn main() {
    // Run CLI and handle errors
    if let Err(e) = run_cli().await {
        error!("CLI error: {}", e);

        // Exit with appropriate code based on error type
        let exit_code = match e {
            CliError::InvalidInput { .. } => 1,
            CliError::Io(_) => 2,
            CliError::Client(_) => 3,
            CliError::Push(ref push) if push.is_client_fault() => 4,
            CliError::Push(_) => 5,
            CliError::Output { .. } => 6,
        };

        std::process::exit(exit_code);
    }
}
