// src/specs/speed.rs
//
// Speed page: one account summary row plus per-trader blocks.
//
//   [ "", "Total (<account>)", _, deals, mean time, arbitrage, ... ]   account total
//   [ "", "Total (<trader>)",  _, deals, ... ]                          opens trader block
//   [ _,  _, "Sell"|"Buy",     _, time, ... ]                           side split (≥7 cells)

use crate::core::Table;
use crate::model::{SpeedReport, TraderSpeed};

use super::locate::{TOTAL_PREFIX, find_total_row, resolve_display_name};

const TOTAL_MIN_CELLS: usize = 7;
const SPLIT_MIN_CELLS: usize = 7;

const COL_DEALS: usize = 3;
const COL_MEAN_TIME: usize = 4;
const COL_ARBITRAGE: usize = 5;
const COL_SIDE: usize = 2;
const COL_SIDE_TIME: usize = 4;

pub fn extract(html: Option<&str>, configured_name: &str) -> SpeedReport {
    match html.and_then(Table::parse_first) {
        Some(table) => from_table(&table, configured_name),
        None => {
            logw!("Speed: no table, using defaults");
            SpeedReport::default()
        }
    }
}

pub fn from_table(table: &Table, configured_name: &str) -> SpeedReport {
    let mut out = SpeedReport::default();

    let resolved = resolve_display_name(&table.text, configured_name);
    match find_total_row(&table.rows, configured_name, resolved) {
        Some(total) if total.cells.len() >= TOTAL_MIN_CELLS => {
            let cell = |i| total.text(i).map(String::from).unwrap_or_default();
            out.total_deals = cell(COL_DEALS);
            out.total_mean_time = cell(COL_MEAN_TIME);
            out.arbitrage_count = cell(COL_ARBITRAGE);
        }
        Some(total) => {
            logw!("Speed: total row for '{resolved}' too short ({} cells)", total.cells.len())
        }
        None => logw!("Speed: no total row for '{resolved}'"),
    }

    // Second pass: trader blocks. A header row switches the open trader;
    // rows until the next header carry that trader's Sell/Buy split.
    let mut current: Option<usize> = None;
    for row in &table.rows {
        let opens_block = row.cells.len() > 1
            && row.text(0) == Some("")
            && row.text(1).is_some_and(|t| t.contains(TOTAL_PREFIX));

        if opens_block {
            let name = trader_name(row.text(1).unwrap_or_default());
            let idx = match out.traders.iter().position(|t| t.name == name) {
                Some(i) => i,
                None => {
                    let deals = row.text(COL_DEALS).unwrap_or("0");
                    out.traders.push(TraderSpeed::new(name, deals));
                    out.traders.len() - 1
                }
            };
            current = Some(idx);
        } else if let Some(idx) = current {
            if row.cells.len() < SPLIT_MIN_CELLS {
                continue;
            }
            let time = row.text(COL_SIDE_TIME).unwrap_or_default();
            match row.text(COL_SIDE) {
                Some("Sell") => out.traders[idx].sell_time = s!(time),
                Some("Buy") => out.traders[idx].buy_time = s!(time),
                _ => {}
            }
        }
    }

    out
}

/// `Total (Jane Doe)` → `Jane Doe`.
fn trader_name(label: &str) -> String {
    let t = label.trim();
    let inner = match t.find(TOTAL_PREFIX) {
        Some(i) => &t[i + TOTAL_PREFIX.len()..],
        None => t,
    };
    s!(inner.strip_suffix(')').unwrap_or(inner).trim())
}
