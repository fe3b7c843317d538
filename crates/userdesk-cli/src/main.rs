//! # Userdesk
//!
//! Command-line front end for the user directory API.

use std::process::ExitCode;
use userdesk_cli::cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let (action, context) = cli::start()?;
    action.execute(&context).await
}
