use super::ui;
use crate::core::flag::flag_url;
use crate::core::rates::{RateProvider, RateTable};
use anyhow::{Context, Result};
use comfy_table::Cell;

pub fn display_as_table(table: &RateTable) -> String {
    let mut output_table = ui::new_styled_table();
    output_table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (per 1 {})", table.base)),
        ui::header_cell("Flag"),
    ]);

    for (code, rate) in table.iter() {
        output_table.add_row(vec![
            Cell::new(code),
            ui::rate_cell(rate),
            Cell::new(flag_url(code)),
        ]);
    }

    let mut output = format!(
        "Exchange rates: {}\n\n",
        ui::style_text(&table.base, ui::StyleType::Title)
    );
    output.push_str(&output_table.to_string());

    if let Some(updated) = table.last_updated {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!("Last updated {}", updated.format("%Y-%m-%d %H:%M UTC")),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

pub async fn run(rates: &dyn RateProvider) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rates...");
    let result = rates.fetch_rates().await;
    pb.finish_and_clear();

    let table = result.context("Failed to fetch exchange rates")?;
    println!("{}", display_as_table(&table));
    Ok(())
}
