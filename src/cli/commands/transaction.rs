use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{format_amount, info, money, render_table, success};
use crate::cli::registry::CommandEntry;
use crate::entry::{parse_balance, parse_date, TransactionDraft};
use crate::ledger::next_occurrence;

use super::usage_error;

const ADD_USAGE: &str = "add <YYYY-MM-DD> <description> <amount> [expense|income] [recurrence]";
const EDIT_USAGE: &str =
    "edit <id> <YYYY-MM-DD> <description> <amount> [expense|income] [recurrence]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Create a transaction", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Replace a transaction by id", EDIT_USAGE, cmd_edit),
        CommandEntry::new("remove", "Delete a transaction by id", "remove <id>", cmd_remove),
        CommandEntry::new("list", "List every transaction", "list", cmd_list),
        CommandEntry::new(
            "starting",
            "Show or set the starting balance",
            "starting [amount]",
            cmd_starting,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = draft_from_args(TransactionDraft::default(), args, ADD_USAGE)?;
    let transaction = draft.into_transaction()?;
    let short = transaction.id.short();
    let id = context.ledger.add_transaction(transaction)?;
    if let Err(err) = context.persist_transactions() {
        let _ = context.ledger.remove_transaction(id);
        return Err(err);
    }
    tracing::info!(%id, "transaction added");
    success(format!("Added transaction {short}"));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (prefix, rest) = args.split_first().ok_or_else(|| usage_error(EDIT_USAGE))?;
    let existing = context.ledger.find_by_prefix(prefix)?;
    let id = existing.id;
    let draft = draft_from_args(TransactionDraft::from_transaction(existing), rest, EDIT_USAGE)?;
    let replacement = draft.into_replacement(id)?;
    let previous = context.ledger.replace_transaction(replacement)?;
    if let Err(err) = context.persist_transactions() {
        let _ = context.ledger.replace_transaction(previous);
        return Err(err);
    }
    tracing::info!(%id, "transaction replaced");
    success(format!("Updated transaction {}", id.short()));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let prefix = args.first().ok_or_else(|| usage_error("remove <id>"))?;
    let id = context.ledger.find_by_prefix(prefix)?.id;
    let removed = context.ledger.remove_transaction(id)?;
    if let Err(err) = context.persist_transactions() {
        let _ = context.ledger.add_transaction(removed);
        return Err(err);
    }
    tracing::info!(%id, "transaction removed");
    success(format!("Removed `{}`", removed.description));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.ledger.transactions.is_empty() {
        info("No transactions yet. Use `add` to create one.");
        return Ok(());
    }
    let today = context.today();
    let mut transactions: Vec<_> = context.ledger.transactions.iter().collect();
    transactions.sort_by(|a, b| {
        a.anchor_date
            .cmp(&b.anchor_date)
            .then_with(|| a.description.cmp(&b.description))
    });
    let rows: Vec<Vec<String>> = transactions
        .into_iter()
        .map(|txn| {
            vec![
                txn.id.short(),
                txn.anchor_date.to_string(),
                txn.description.clone(),
                format_amount(txn.amount),
                txn.recurrence.label().to_string(),
                next_occurrence(txn, today)
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    info(render_table(
        &["id", "date", "description", "amount", "repeats", "next"],
        &rows,
    ));
    Ok(())
}

fn cmd_starting(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        info(format!("Starting balance: {}", money(context.ledger.starting_balance)));
        return Ok(());
    };
    let balance = parse_balance(raw)?;
    let previous = context.ledger.starting_balance;
    context.ledger.set_starting_balance(balance);
    if let Err(err) = context.persist_starting_balance() {
        context.ledger.set_starting_balance(previous);
        return Err(err);
    }
    success(format!("Starting balance set to {}", format_amount(balance)));
    Ok(())
}

/// Fills `base` from positional arguments `<date> <description> <amount>`
/// followed by optional `expense`/`income` and recurrence words in any order.
fn draft_from_args(
    mut draft: TransactionDraft,
    args: &[&str],
    usage: &str,
) -> Result<TransactionDraft, CommandError> {
    let [date, description, amount, options @ ..] = args else {
        return Err(usage_error(usage));
    };
    draft.date = Some(parse_date(date)?);
    draft.description = description.to_string();
    draft.amount = amount.to_string();
    for option in options {
        match option.to_ascii_lowercase().as_str() {
            "expense" => draft.is_expense = true,
            "income" => draft.is_expense = false,
            other => draft.recurrence = other.parse()?,
        }
    }
    Ok(draft)
}
