use chrono::{Datelike, Months, NaiveDate};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{info, money};
use crate::cli::registry::CommandEntry;
use crate::cli::render::{render_day, render_month};
use crate::cli::shell_context::first_of_month;
use crate::entry::parse_date;
use crate::ledger::{balance_on, month_view, transactions_on};

use super::{date_arg, usage_error};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("show", "Render a month with daily balances", "show [YYYY-MM]", cmd_show),
        CommandEntry::new("next", "Show the following month", "next", cmd_next),
        CommandEntry::new("prev", "Show the previous month", "prev", cmd_prev),
        CommandEntry::new("today", "Jump back to the current month", "today", cmd_today),
        CommandEntry::new("day", "List transactions on a date", "day <YYYY-MM-DD>", cmd_day),
        CommandEntry::new("balance", "Balance at the end of a date", "balance <YYYY-MM-DD>", cmd_balance),
    ]
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(raw) = args.first() {
        context.month = parse_month(raw)?;
    }
    print_month(context)
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.month = context
        .month
        .checked_add_months(Months::new(1))
        .ok_or_else(|| CommandError::InvalidArguments("no month after this one".into()))?;
    print_month(context)
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.month = context
        .month
        .checked_sub_months(Months::new(1))
        .ok_or_else(|| CommandError::InvalidArguments("no month before this one".into()))?;
    print_month(context)
}

fn cmd_today(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.month = first_of_month(context.today());
    print_month(context)
}

fn cmd_day(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let date = date_arg(args, 0, "day <YYYY-MM-DD>")?;
    let transactions = transactions_on(&context.ledger, date);
    let balance = balance_on(&context.ledger, date);
    info(render_day(date, &transactions, balance));
    Ok(())
}

fn cmd_balance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let date = date_arg(args, 0, "balance <YYYY-MM-DD>")?;
    info(format!("Balance on {date}: {}", money(balance_on(&context.ledger, date))));
    Ok(())
}

fn print_month(context: &ShellContext) -> CommandResult {
    let view = month_view(&context.ledger, context.month.year(), context.month.month())?;
    info(render_month(&view, context.config.week_start(), context.today()));
    Ok(())
}

fn parse_month(raw: &str) -> Result<NaiveDate, CommandError> {
    if raw.trim().is_empty() {
        return Err(usage_error("show [YYYY-MM]"));
    }
    parse_date(&format!("{}-01", raw.trim()))
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a YYYY-MM month")))
}
