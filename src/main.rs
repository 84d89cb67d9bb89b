use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fxconv::cli::convert::ConvertArgs;
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount into another currency
    Convert(ConvertCommand),
}

#[derive(Args)]
struct ConvertCommand {
    /// Access key of the exchange rate service
    #[arg(long, alias = "API_KEY", value_parser = NonEmptyStringValueParser::new())]
    api_key: Option<String>,

    /// Currency to convert from
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    from: Option<String>,

    /// Currency to convert to
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    currency: Option<String>,

    /// Amount to convert
    #[arg(long, allow_negative_numbers = true)]
    amount: Option<i64>,
}

impl From<ConvertCommand> for ConvertArgs {
    fn from(cmd: ConvertCommand) -> ConvertArgs {
        ConvertArgs {
            api_key: cmd.api_key,
            from: cmd.from,
            to: cmd.currency,
            amount: cmd.amount,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => fxconv::cli::setup::setup_at_path(path),
            None => fxconv::cli::setup::setup(),
        },
        Some(Commands::Convert(cmd)) => {
            fxconv::run_command(
                fxconv::AppCommand::Convert(cmd.into()),
                cli.config_path.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
