use std::io::Write;

use roundfill_core::HistoricalDay;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render_history<W: Write>(
    out: &mut W,
    days: &[HistoricalDay],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(days)?
            } else {
                serde_json::to_string(days)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => render_table(out, days)?,
    }

    Ok(())
}

fn render_table<W: Write>(out: &mut W, days: &[HistoricalDay]) -> Result<(), CliError> {
    writeln!(out, "{:<10}  {:>9}  {:>9}  {:<6}", "date", "open", "close", "result")?;
    for day in days {
        let marker = if day.is_consistent() { "" } else { "  (!)" };
        writeln!(
            out,
            "{:<10}  {:>9.2}  {:>9.2}  {:<6}{marker}",
            day.date.to_string(),
            day.open,
            day.close,
            day.result.as_str(),
        )?;
    }
    writeln!(out, "{} day(s)", days.len())?;
    Ok(())
}
