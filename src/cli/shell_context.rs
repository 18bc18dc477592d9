use chrono::{Datelike, NaiveDate};

use crate::{
    config::{Config, ConfigManager},
    entry::parse_date,
    ledger::Ledger,
    storage::{ledger_warnings, JsonStore, LedgerStore},
    time::{Clock, FixedClock, SystemClock},
};

use super::core::CliError;
use super::output;
use super::registry::CommandRegistry;

/// Pins "today" for reproducible script runs.
pub const TODAY_ENV: &str = "FINCAL_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Session state shared by every command handler.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: Box<dyn LedgerStore>,
    pub config_manager: Option<ConfigManager>,
    pub config: Config,
    pub ledger: Ledger,
    pub clock: Box<dyn Clock>,
    /// First day of the month currently displayed.
    pub month: NaiveDate,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Opens the configured data directory under `$FINCAL_HOME`.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let data_dir = config_manager.data_dir(&config);
        let store = JsonStore::with_default_balance(&data_dir, config.default_starting_balance)?;
        tracing::info!(data_dir = %data_dir.display(), "opening ledger store");
        let mut context = Self::with_parts(mode, Box::new(store), config, clock_from_env())?;
        context.config_manager = Some(config_manager);
        Ok(context)
    }

    /// Builds a session over an explicit store, used by tests and embedders.
    pub fn with_parts(
        mode: CliMode,
        store: Box<dyn LedgerStore>,
        config: Config,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let ledger = store.load_ledger()?;
        for warning in ledger_warnings(&ledger) {
            output::warning(&warning);
        }
        if mode == CliMode::Script || !config.ui_color_enabled {
            colored::control::set_override(false);
        }
        let month = first_of_month(clock.today());
        Ok(Self {
            mode,
            registry: super::commands::registry(),
            store,
            config_manager: None,
            config,
            ledger,
            clock,
            month,
            last_command: None,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        format!("fincal [{}]> ", self.month.format("%Y-%m"))
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn clock_from_env() -> Box<dyn Clock> {
    match std::env::var(TODAY_ENV) {
        Ok(raw) => match parse_date(&raw) {
            Ok(date) => Box::new(FixedClock(date)),
            Err(err) => {
                tracing::warn!(%err, "ignoring {TODAY_ENV}");
                Box::new(SystemClock)
            }
        },
        Err(_) => Box::new(SystemClock),
    }
}
