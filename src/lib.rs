pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::convert::{ConvertArgs, ConvertRequest};
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert(ConvertArgs),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let output = execute(command, config_path).await?;
    print!("{output}");
    Ok(())
}

/// Runs a command and returns what it would print.
pub async fn execute(command: AppCommand, config_path: Option<&str>) -> Result<String> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(base_url = %config.provider.base_url, defaults = ?config.defaults, "Loaded config");

    match command {
        AppCommand::Convert(args) => {
            let request = ConvertRequest::resolve(args, &config)?;
            let mut converter =
                providers::ExchangeRatesConverter::new(&request.base_url, &request.access_key);
            if let Some(timeout) = request.timeout {
                converter = converter.with_timeout(timeout);
            }
            cli::convert::convert(&converter, &request).await
        }
    }
}
