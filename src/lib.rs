pub mod cli;
pub mod core;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::session::{SavePolicy, Session};
use crate::store::JsonFileStore;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Commands understood by [`run_command`]. Positions are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Add {
        name: String,
        shares: String,
    },
    Update {
        position: usize,
        name: String,
        shares: String,
    },
    Delete {
        position: usize,
    },
    List,
    Profit {
        text: String,
    },
    Calc {
        profit: Option<String>,
    },
    Reset,
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Opens a session over the configured ledger document. Every successful
/// mutation is written back before the command returns.
pub fn open_session(config: &AppConfig) -> Result<Session<JsonFileStore>> {
    let store = JsonFileStore::in_dir(config.default_data_path()?);
    let path = store.path().display().to_string();
    Session::open(store, SavePolicy::OnMutation)
        .with_context(|| format!("Failed to load ledger from {path}"))
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Profit share starting...");

    let config = load_config(config_path)?;
    let mut session = open_session(&config)?;
    debug!("Using ledger at {}", session.store().path().display());

    let output = match command {
        AppCommand::Add { name, shares } => cli::ledger::add(&mut session, &name, &shares)?,
        AppCommand::Update {
            position,
            name,
            shares,
        } => cli::ledger::update(&mut session, position, &name, &shares)?,
        AppCommand::Delete { position } => cli::ledger::delete(&mut session, position)?,
        AppCommand::List => cli::ledger::render_ledger(session.ledger(), config.decimals),
        AppCommand::Profit { text } => cli::ledger::set_profit(&mut session, &text)?,
        AppCommand::Calc { profit } => {
            cli::calc::run(&session, profit.as_deref(), config.decimals)?
        }
        AppCommand::Reset => cli::ledger::reset(&mut session)?,
    };

    println!("{output}");
    Ok(())
}
