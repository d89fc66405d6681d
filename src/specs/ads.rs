// src/specs/ads.rs
//
// Active listings page: one row per listing, payment method at 7, side at 9.

use crate::core::Table;
use crate::model::AdsReport;

const MIN_CELLS: usize = 10;
const COL_METHOD: usize = 7;
const COL_SIDE: usize = 9;

pub fn extract(html: Option<&str>) -> AdsReport {
    match html.and_then(Table::parse_first) {
        Some(table) => from_table(&table),
        None => {
            logw!("Ads: no table, account treated as inactive");
            AdsReport::default()
        }
    }
}

pub fn from_table(table: &Table) -> AdsReport {
    let mut out = AdsReport::default();

    for row in table.body_rows() {
        let cells = row.data();
        if cells.len() < MIN_CELLS {
            continue;
        }
        let method = &cells[COL_METHOD].text;
        match cells[COL_SIDE].text.as_str() {
            "Sell" => {
                out.sell_methods.insert(method.clone());
                out.sell_count += 1;
            }
            "Buy" => {
                out.buy_methods.insert(method.clone());
                out.buy_count += 1;
            }
            _ => {}
        }
        out.ads_count += 1;
    }

    out.is_active = out.ads_count > 0;
    out
}
