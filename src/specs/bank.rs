// src/specs/bank.rs
//
// Bank statement uploads: latest date per trader and overall.

use chrono::NaiveDate;

use crate::config::consts::STATEMENT_DATE_FMT;
use crate::core::Table;
use crate::model::BankStatementReport;

const MIN_CELLS: usize = 10;
const COL_TRADER: usize = 3;
const COL_UPLOADED: usize = 9;

pub fn extract(html: Option<&str>) -> BankStatementReport {
    match html.and_then(Table::parse_first) {
        Some(table) => from_table(&table),
        None => {
            logw!("Bank statements: no table, using defaults");
            BankStatementReport::default()
        }
    }
}

pub fn from_table(table: &Table) -> BankStatementReport {
    let mut out = BankStatementReport::default();

    for row in table.body_rows() {
        let cells = row.data();
        if cells.len() < MIN_CELLS {
            continue;
        }
        // Unparseable dates are skipped without a trace.
        if let Some(date) = parse_statement_date(&cells[COL_UPLOADED].text) {
            out.observe(&cells[COL_TRADER].text, date);
        }
    }

    out
}

/// `"14.03.2025 10:22"` → 2025-03-14. Only the part before the first space is read.
pub fn parse_statement_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split(' ').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, STATEMENT_DATE_FMT).ok()
}
