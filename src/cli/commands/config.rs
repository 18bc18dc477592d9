use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{format_amount, info, section, success};
use crate::cli::registry::CommandEntry;
use crate::entry::parse_balance;

const USAGE: &str = "config [color on|off | week sunday|monday | default-balance <amount>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new("config", "Show or change preferences", USAGE, cmd_config)]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let config = &context.config;
            section("Configuration");
            info(format!("  color           : {}", on_off(config.ui_color_enabled)));
            info(format!("  week            : starts {}", config.week_start()));
            info(format!(
                "  default-balance : {}",
                format_amount(config.default_starting_balance)
            ));
            if let Some(dir) = &config.data_dir {
                info(format!("  data-dir        : {}", dir.display()));
            }
            return Ok(());
        }
        [key, value] => apply(context, &key.to_lowercase(), value)?,
        _ => return Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
    context.persist_config()?;
    success("Configuration saved");
    Ok(())
}

fn apply(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let config = &mut context.config;
    match (key, value.to_lowercase().as_str()) {
        ("color", "on") => config.ui_color_enabled = true,
        ("color", "off") => config.ui_color_enabled = false,
        ("week", "sunday") => config.week_starts_on_monday = false,
        ("week", "monday") => config.week_starts_on_monday = true,
        ("default-balance", raw) => {
            config.default_starting_balance = parse_balance(raw)?;
        }
        _ => return Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
    if context.mode == crate::cli::core::CliMode::Interactive {
        colored::control::set_override(context.config.ui_color_enabled);
    }
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
