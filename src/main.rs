// ghfeed: show a GitHub user's recent activity.
// Parses arguments, sets up logging, and runs one fetch-and-render pass.

mod activity;
mod app;
mod cache;
mod cli;
mod error;
mod github;

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use log::debug;

use crate::cli::Cli;
use crate::github::GitHubClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::parse_ordered() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage problems exit 1; --help and --version are not failures.
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            let _ = e.print();
            return code;
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    debug!("{:?}", cli);

    let client = match GitHubClient::new(Duration::from_secs(cli.timeout)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    match app::run(&cli, client, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
