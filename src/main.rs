use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use profitshare::core::log::init_logging;

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

impl From<Commands> for profitshare::AppCommand {
    fn from(cmd: Commands) -> profitshare::AppCommand {
        match cmd {
            Commands::Add { name, shares } => profitshare::AppCommand::Add { name, shares },
            Commands::Update {
                position,
                name,
                shares,
            } => profitshare::AppCommand::Update {
                position,
                name,
                shares,
            },
            Commands::Delete { position } => profitshare::AppCommand::Delete { position },
            Commands::List => profitshare::AppCommand::List,
            Commands::Profit { text } => profitshare::AppCommand::Profit { text },
            Commands::Calc { profit } => profitshare::AppCommand::Calc { profit },
            Commands::Reset => profitshare::AppCommand::Reset,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration, at --config-path if given
    Setup,
    /// Add a shareholder
    Add {
        /// Shareholder name
        name: String,
        /// Number of shares
        #[arg(allow_hyphen_values = true)]
        shares: String,
    },
    /// Replace the shareholder at a position
    Update {
        /// Position as shown by `list`, starting at 1
        position: usize,
        name: String,
        #[arg(allow_hyphen_values = true)]
        shares: String,
    },
    /// Remove the shareholder at a position
    Delete {
        /// Position as shown by `list`, starting at 1
        position: usize,
    },
    /// List shareholders and the declared total profit
    List,
    /// Declare the total profit
    Profit {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Calculate each shareholder's percentage and profit
    Calc {
        /// Total profit to split, defaults to the declared one
        #[arg(short, long, allow_hyphen_values = true)]
        profit: Option<String>,
    },
    /// Remove all shareholders and the declared profit
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => profitshare::cli::setup::run(cli.config_path.as_deref()),
        Some(cmd) => profitshare::run_command(cmd.into(), cli.config_path.as_deref()),
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
