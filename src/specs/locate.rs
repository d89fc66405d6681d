// src/specs/locate.rs
//
// Cell and table text arrive whitespace-collapsed (`html::strip_tags`), so
// names from the registry are collapsed the same way before comparing.

use crate::core::Row;
use crate::core::sanitize::normalize_ws;

pub const TOTAL_PREFIX: &str = "Total (";

/// Label of a summary row for `name`, inner whitespace collapsed.
pub fn total_label(name: &str) -> String {
    join!(TOTAL_PREFIX, &normalize_ws(name), ")")
}

/// Which alias of `configured` (`|`-separated) the table actually shows.
///
/// The first trimmed, non-empty alias that occurs anywhere in `table_text` wins.
/// With no hit the configured name comes back unchanged.
pub fn resolve_display_name<'a>(table_text: &str, configured: &'a str) -> &'a str {
    configured
        .split('|')
        .map(str::trim)
        .find(|alias| !alias.is_empty() && table_text.contains(normalize_ws(alias).as_str()))
        .unwrap_or(configured)
}

/// First row having a cell that reads exactly `Total (<resolved>)` or `Total (<configured>)`.
pub fn find_total_row<'t>(rows: &'t [Row], configured: &str, resolved: &str) -> Option<&'t Row> {
    let patterns = [total_label(resolved), total_label(configured)];
    rows.iter().find(|row| {
        patterns
            .iter()
            .any(|p| row.cells.iter().any(|c| c.text == *p))
    })
}
