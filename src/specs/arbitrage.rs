// src/specs/arbitrage.rs
//
// Disputed deals. Rows flagged with the `deal-disputed` class are the primary
// source; when none qualify, rows whose status column mentions arbitration are used.

use crate::core::{Cell, Table};
use crate::model::{ArbitrageReport, DisputedDeal};

pub const DISPUTED_CLASS: &str = "deal-disputed";

const MIN_CELLS: usize = 10;
const FALLBACK_MIN_CELLS: usize = 16;

const COL_ID: usize = 0;
const COL_INVOICE: usize = 1;
const COL_TRADER: usize = 3;
const COL_CURRENCY: usize = 4;
const COL_AMOUNT: usize = 7;
const COL_PAYMENT_SYSTEM: usize = 8;
const COL_KIND: usize = 9;
const COL_STATUS: usize = 15;
const COL_CREATED_AT: usize = 18;

const NO_INVOICE: &str = "N/A";
const DEFAULT_STATUS: &str = "Pending Arbitration";

pub fn extract(html: Option<&str>) -> ArbitrageReport {
    match html.and_then(Table::parse_first) {
        Some(table) => from_table(&table),
        None => {
            logw!("Arbitrage: no table, using defaults");
            ArbitrageReport::default()
        }
    }
}

pub fn from_table(table: &Table) -> ArbitrageReport {
    let mut out = ArbitrageReport::default();
    if table.body_rows().is_empty() {
        return out;
    }

    // Class lookup runs over every row, header included.
    for row in table.rows.iter().filter(|r| r.has_class(DISPUTED_CLASS)) {
        let cells = row.data();
        if cells.len() >= MIN_CELLS {
            out.push(deal_from_cells(&cells));
        }
    }

    if out.count == 0 {
        for row in table.body_rows() {
            let cells = row.data();
            if cells.len() >= FALLBACK_MIN_CELLS
                && cells[COL_STATUS].text.to_lowercase().contains("arbitration")
            {
                out.push(deal_from_cells(&cells));
            }
        }
    }

    out
}

/// `cells` must hold at least `MIN_CELLS` entries.
fn deal_from_cells(cells: &[&Cell]) -> DisputedDeal {
    let text = |i: usize| cells[i].text.clone();
    DisputedDeal {
        id: text(COL_ID),
        invoice: cells[COL_INVOICE].link.clone().unwrap_or_else(|| s!(NO_INVOICE)),
        trader: text(COL_TRADER),
        amount: text(COL_AMOUNT),
        currency: text(COL_CURRENCY),
        payment_system: text(COL_PAYMENT_SYSTEM),
        kind: text(COL_KIND),
        status: cells.get(COL_STATUS).map(|c| c.text.clone()).unwrap_or_else(|| s!(DEFAULT_STATUS)),
        created_at: cells.get(COL_CREATED_AT).map(|c| c.text.clone()).unwrap_or_default(),
    }
}
