pub mod cli;
pub mod core;
pub mod server;

use crate::core::RateTable;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Run the HTTP server, optionally overriding the configured bind address.
    Serve { bind: Option<String> },
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Currencies,
}

/// Loads configuration and the rate table once, then runs `command` against them.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = AppConfig::resolve(config_path)?;
    debug!("Loaded config: {config:#?}");

    let rates = Arc::new(RateTable::load(config.dataset_path())?);

    match command {
        AppCommand::Serve { bind } => {
            let bind_address = bind.as_deref().unwrap_or(&config.server.bind_address);
            info!("fxconv server starting on {bind_address}");
            server::bind_and_serve(bind_address, rates).await
        }
        AppCommand::Convert { amount, from, to } => {
            cli::convert::print_conversion(&amount, &from, &to, &rates)
        }
        AppCommand::Currencies => {
            println!("{}", cli::convert::display_currencies(&rates));
            Ok(())
        }
    }
}
