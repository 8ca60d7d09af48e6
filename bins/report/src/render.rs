//! Table output.

use ledgerlens_core::table::DataTable;
use ledgerlens_shared::{AppError, AppResult, OutputFormat};

/// Renders a table in the requested format.
pub fn render(table: &DataTable, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Tsv => Ok(tsv(table)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(table).map_err(|e| AppError::Parse(e.to_string()))
        }
    }
}

fn tsv(table: &DataTable) -> String {
    let mut out = String::new();
    for row in table {
        let line: Vec<String> = row
            .iter()
            .map(|cell| cell.to_string().replace(['\t', '\n'], " "))
            .collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}
