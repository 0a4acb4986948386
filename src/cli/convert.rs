use super::ui;
use crate::core::{ConversionRequest, ConversionResult, RateTable, convert};
use anyhow::Result;
use comfy_table::Cell;
use tracing::debug;

impl ConversionResult {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::bordered_table(&["Amount", "Converted", "Rate", "Description"]);

        table.add_row(vec![
            ui::number_cell(format!("{} {}", self.amount, self.from)),
            ui::highlight_cell(format!("{:.2} {}", self.converted_amount, self.to)),
            ui::number_cell(format!("{:.6}", self.rate)),
            Cell::new(&self.description),
        ]);

        let title = format!("{} → {}", self.from, self.to);
        let footer = format!("{} currencies available", self.available_currencies);
        format!(
            "{}\n\n{table}\n{}",
            ui::paint(&title, ui::Tone::Heading),
            ui::paint(&footer, ui::Tone::Muted)
        )
    }
}

pub fn display_currencies(rates: &RateTable) -> String {
    let mut table = ui::bordered_table(&["Code", "Rate (per USD)", "Effective", "Description"]);

    for record in rates.sorted_records() {
        table.add_row(vec![
            Cell::new(&record.currency_code),
            ui::number_cell(format!("{:.6}", record.rate)),
            Cell::new(&record.effective_date),
            Cell::new(&record.description),
        ]);
    }

    let title = ui::paint("Exchange Rates", ui::Tone::Heading);
    let total = ui::paint(&rates.len().to_string(), ui::Tone::Positive);
    format!("{title}\n\n{table}\nCurrencies: {total}")
}

/// Validates and converts, returning the rendered result table.
pub fn run(amount: &str, from: &str, to: &str, rates: &RateTable) -> Result<String> {
    let request = ConversionRequest::parse(Some(amount), Some(from), Some(to))?;
    debug!(?request, "Converting");

    let result = convert(request.amount, &request.from, &request.to, rates)?;
    Ok(result.display_as_table())
}

pub fn print_conversion(amount: &str, from: &str, to: &str, rates: &RateTable) -> Result<()> {
    println!("{}", run(amount, from, to, rates)?);
    Ok(())
}
