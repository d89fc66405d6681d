// src/specs/conversion.rs
//
// Conversion page: only the account's "Total (...)" row matters.

use crate::core::Table;
use crate::model::ConversionReport;

use super::locate::{find_total_row, resolve_display_name};

const MIN_CELLS: usize = 10;
const COL_PAID: usize = 4;
const COL_CANCELLED: usize = 5;
const COL_TOTAL: usize = 6;
const COL_PERCENT: usize = 9;

pub fn extract(html: Option<&str>, configured_name: &str) -> ConversionReport {
    match html.and_then(Table::parse_first) {
        Some(table) => from_table(&table, configured_name),
        None => {
            logw!("Conversion: no table, using defaults");
            ConversionReport::default()
        }
    }
}

pub fn from_table(table: &Table, configured_name: &str) -> ConversionReport {
    let resolved = resolve_display_name(&table.text, configured_name);
    let Some(total) = find_total_row(&table.rows, configured_name, resolved) else {
        logw!("Conversion: no total row for '{resolved}'");
        return ConversionReport::default();
    };
    if total.cells.len() < MIN_CELLS {
        logw!("Conversion: total row for '{resolved}' too short ({} cells)", total.cells.len());
        return ConversionReport::default();
    }

    let cell = |i| total.text(i).map(String::from).unwrap_or_default();
    ConversionReport {
        paid_count: cell(COL_PAID),
        cancelled_count: cell(COL_CANCELLED),
        total_count: cell(COL_TOTAL),
        conversion_percent: cell(COL_PERCENT),
    }
}
