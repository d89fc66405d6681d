// src/core/table.rs
//
// Flat model of the first <table> on a rendered page.
// Extractors address cells by fixed offsets, so the model keeps every row and
// every cell in document order and never reshapes anything.

use super::html::{self, Scanner};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Visible text, whitespace-collapsed and trimmed.
    pub text: String,
    /// Text of the first `<a>` inside the cell, if any.
    pub link: Option<String>,
    /// `<th>` rather than `<td>`.
    pub header: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub classes: Vec<String>,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Text of cell `i` among all cells (td and th).
    pub fn text(&self, i: usize) -> Option<&str> {
        self.cells.get(i).map(|c| c.text.as_str())
    }

    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }

    /// `<td>` cells only, in order.
    pub fn data(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|c| !c.header).collect()
    }
}

/// Cell counts used by the readiness poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableProbe {
    pub rows: usize,
    pub data_cells: usize,
    pub header_cells: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
    /// All visible text of the table, tags removed.
    pub text: String,
}

impl Table {
    /// First rendered `<table>` of `doc`, or None when the page has none.
    /// Tables inside comments, scripts, styles and templates do not count.
    pub fn parse_first(doc: &str) -> Option<Table> {
        let clean = html::blank_inert(doc);
        let sc = Scanner::new(&clean);
        let (ts, te) = sc.block("table", 0)?;
        Some(Self::parse_block(&clean[ts..te]))
    }

    fn parse_block(block: &str) -> Table {
        let sc = Scanner::new(block);
        // skip our own `<table` opener so nested lookups start inside it
        let body_from = block.find('>').map(|i| i + 1).unwrap_or(0);

        let mut rows = Vec::new();
        let mut pos = body_from;
        while let Some((rs, re)) = sc.block("tr", pos) {
            rows.push(parse_row(&block[rs..re]));
            pos = re;
        }

        Table { rows, text: html::strip_tags(block) }
    }

    /// Rows after the first one (the header row on every dashboard page).
    pub fn body_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn probe(&self) -> TableProbe {
        let mut p = TableProbe { rows: self.rows.len(), ..TableProbe::default() };
        for row in &self.rows {
            for cell in &row.cells {
                if cell.header { p.header_cells += 1 } else { p.data_cells += 1 }
            }
        }
        p
    }
}

/// Probe of the first table in `doc`, None when there is no table.
pub fn probe_markup(doc: &str) -> Option<TableProbe> {
    Table::parse_first(doc).map(|t| t.probe())
}

fn parse_row(tr: &str) -> Row {
    let classes = html::attr_value(html::open_tag(tr), "class")
        .map(|v| v.split_whitespace().map(|c| c.to_string()).collect())
        .unwrap_or_default();

    let sc = Scanner::new(tr);
    let mut cells = Vec::new();
    let mut pos = tr.find('>').map(|i| i + 1).unwrap_or(0);
    while let Some((tag, cs, ce)) = sc.block_any(&["td", "th"], pos) {
        let block = &tr[cs..ce];
        let inner = html::inner_after_open_tag(block);
        cells.push(Cell {
            text: html::strip_tags(inner),
            link: link_text(inner),
            header: tag == "th",
        });
        pos = ce;
    }

    Row { classes, cells }
}

fn link_text(inner: &str) -> Option<String> {
    let sc = Scanner::new(inner);
    let (s, e) = sc.block("a", 0)?;
    Some(html::strip_tags(html::inner_after_open_tag(&inner[s..e])))
}
