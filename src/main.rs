//! vaultgrep - grep through Ansible Vault encrypted files.

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vaultgrep::cli::output;
use vaultgrep::cli::search::EXIT_CANCELLED;
use vaultgrep::cli::{execute, Cli};
use vaultgrep::core::constants::LOG_ENV;
use vaultgrep::core::report::CancelToken;
use vaultgrep::error::{Error, SearchError, SecretError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("vaultgrep=debug")
        } else {
            EnvFilter::new("vaultgrep=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    output::init_colors();

    // First Ctrl-C stops dispatching new files, a second one exits at once.
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if handler_token.is_cancelled() {
            std::process::exit(EXIT_CANCELLED);
        }
        handler_token.cancel();
    }) {
        debug!(error = %e, "cannot install Ctrl-C handler");
    }

    match execute(cli, cancel) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let suggestion = match &e {
                Error::Search(SearchError::InvalidPattern(_)) => {
                    Some("use -F to search for a literal string")
                }
                Error::Secret(SecretError::PromptFailed(_)) => {
                    Some("pass --vault-password-file or set ANSIBLE_VAULT_PASSWORD_FILE")
                }
                _ => None,
            };

            output::error(&e.to_string());
            if let Some(hint) = suggestion {
                output::hint(hint);
            }
            std::process::exit(1);
        }
    }
}
