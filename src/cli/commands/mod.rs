pub mod calendar;
pub mod config;
pub mod system;
pub mod transaction;

use crate::entry::parse_date;

use super::core::CommandError;
use super::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(calendar::definitions());
    commands.extend(transaction::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for entry in all_definitions() {
        registry.register(entry);
    }
    registry
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

pub(crate) fn date_arg(args: &[&str], index: usize, usage: &str) -> Result<chrono::NaiveDate, CommandError> {
    let raw = args.get(index).ok_or_else(|| usage_error(usage))?;
    Ok(parse_date(raw)?)
}
