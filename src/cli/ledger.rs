//! Registry commands: add, update, delete, list, profit and reset.
//!
//! Positions shown to and typed by the user start at 1.
use super::ui;
use crate::core::registry::Ledger;
use crate::core::session::Session;
use crate::store::LedgerStore;
use anyhow::{Context, Result, anyhow};
use comfy_table::Cell;

fn to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Positions start at 1, got {position}"))
}

pub fn add<S: LedgerStore>(session: &mut Session<S>, name: &str, shares: &str) -> Result<String> {
    session
        .add(name, shares)
        .with_context(|| format!("Failed to add shareholder '{name}'"))?;
    Ok(format!(
        "Added {} at position {}",
        name.trim(),
        session.ledger().len()
    ))
}

pub fn update<S: LedgerStore>(
    session: &mut Session<S>,
    position: usize,
    name: &str,
    shares: &str,
) -> Result<String> {
    let index = to_index(position)?;
    session
        .update(index, name, shares)
        .with_context(|| format!("Failed to update shareholder at position {position}"))?;
    Ok(format!("Updated position {position}: {}", name.trim()))
}

pub fn delete<S: LedgerStore>(session: &mut Session<S>, position: usize) -> Result<String> {
    let index = to_index(position)?;
    let removed = session
        .delete(index)
        .with_context(|| format!("Failed to delete shareholder at position {position}"))?;
    Ok(format!("Deleted {} (position {position})", removed.name))
}

pub fn set_profit<S: LedgerStore>(session: &mut Session<S>, text: &str) -> Result<String> {
    session
        .set_total_profit(text)
        .context("Failed to set total profit")?;
    Ok(format!("Total profit set to '{text}'"))
}

pub fn reset<S: LedgerStore>(session: &mut Session<S>) -> Result<String> {
    session.reset().context("Failed to reset ledger")?;
    Ok("All data has been reset.".to_string())
}

/// Renders the registry as a table followed by the declared profit.
pub fn render_ledger(ledger: &Ledger, decimals: usize) -> String {
    if ledger.is_empty() {
        return ui::style_text("No shareholders yet.", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Shareholder"),
        ui::header_cell("Shares"),
    ]);
    for (i, record) in ledger.records().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&record.name),
            ui::number_cell(record.shares, decimals),
        ]);
    }

    let profit = ledger.total_profit();
    let profit_display = if profit.is_empty() {
        ui::style_text("not set", ui::StyleType::Subtle)
    } else {
        profit.as_str().to_string()
    };

    format!(
        "{table}\n\n{} {}",
        ui::style_text("Total Profit:", ui::StyleType::TotalLabel),
        profit_display
    )
}
