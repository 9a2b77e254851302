use super::ui;
use crate::core::allocation::AllocationOutcome;
use crate::core::session::Session;
use crate::store::LedgerStore;
use anyhow::{Context, Result};
use comfy_table::Cell;

impl AllocationOutcome {
    pub fn display_as_table(&self, decimals: usize) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Shareholder"),
            ui::header_cell("Shares"),
            ui::header_cell("Percentage"),
            ui::header_cell("Profit"),
        ]);

        for allocation in &self.allocations {
            table.add_row(vec![
                Cell::new(&allocation.name),
                ui::number_cell(allocation.shares, decimals),
                ui::format_percentage_cell(allocation.percent, decimals),
                ui::profit_cell(allocation.profit_share, decimals),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Profit Allocation", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{} {}\n{} {}",
            ui::style_text("Total Shares:", ui::StyleType::TotalLabel),
            ui::style_text(
                &format!("{:.decimals$}", self.total_shares),
                ui::StyleType::TotalValue
            ),
            ui::style_text("Total Profit:", ui::StyleType::TotalLabel),
            ui::style_text(
                &format!("{:.decimals$}", self.total_profit),
                ui::StyleType::TotalValue
            ),
        ));
        output
    }
}

/// Allocates `profit` if given, the declared profit otherwise.
pub fn run<S: LedgerStore>(
    session: &Session<S>,
    profit: Option<&str>,
    decimals: usize,
) -> Result<String> {
    let outcome = match profit {
        Some(text) => session.allocate(text),
        None => session.allocate_declared(),
    }
    .context("Failed to calculate profits")?;

    Ok(outcome.display_as_table(decimals))
}
