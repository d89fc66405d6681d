// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use desk_report::config::consts::{
    BASE_URL_ADS, BASE_URL_BANK_STATEMENTS, BASE_URL_CONVERSION, BASE_URL_DEALS, BASE_URL_SPEED,
};
use desk_report::config::options::{RunOptions, SyncOptions, TimeParams};
use desk_report::error::RenderError;
use desk_report::render::Renderer;

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("desk_report_{name}"));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// One `<th>` header row followed by `<td>` rows. `class` may be empty.
pub fn table(headers: &[&str], rows: &[(&str, Vec<&str>)]) -> String {
    let mut out = String::from("<html><body><table class=\"table\"><thead><tr>");
    for h in headers {
        out.push_str(&format!("<th>{h}</th>"));
    }
    out.push_str("</tr></thead><tbody>");
    for (class, cells) in rows {
        if class.is_empty() {
            out.push_str("<tr>");
        } else {
            out.push_str(&format!("<tr class=\"{class}\">"));
        }
        for c in cells {
            out.push_str(&format!("<td>{c}</td>"));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table></body></html>");
    out
}

pub fn speed_page() -> String {
    table(
        &["#", "Name", "Side", "Deals", "Time", "Disputes", "Share"],
        &[
            ("", vec!["7", "Total (Acme)", "", "42", "3.5", "1", ""]),
            ("", vec!["", "Total (Jane)", "", "10", "", "", ""]),
            ("", vec!["", "", "Sell", "6", "2.1", "", ""]),
            ("", vec!["", "", "Buy", "4", "4.0", "", ""]),
            ("", vec!["", "Total (Bob)", "", "5", "", "", ""]),
            ("", vec!["", "", "Buy", "5", "7.5", "", ""]),
        ],
    )
}

pub fn ads_row<'a>(method: &'a str, side: &'a str) -> Vec<&'a str> {
    vec!["1", "x", "x", "x", "x", "x", "x", method, "x", side]
}

pub fn ads_page() -> String {
    table(
        &["ID"],
        &[
            ("", ads_row("SBP", "Sell")),
            ("", ads_row("Card", "Sell")),
            ("", ads_row("SBP", "Sell")),
            ("", ads_row("Card", "Buy")),
        ],
    )
}

pub fn conversion_page() -> String {
    table(
        &["#", "Name", "a", "b", "Paid", "Cancelled", "Total", "c", "d", "Conv"],
        &[("", vec!["7", "Total (Acme)", "", "", "80", "20", "100", "", "", "80%"])],
    )
}

pub fn disputed_row(id: &str, invoice: &str) -> Vec<String> {
    let mut v: Vec<String> = (0..10).map(|i| format!("c{i}")).collect();
    v[0] = id.to_string();
    v[1] = format!("<a href=\"/invoice/{invoice}\">{invoice}</a>");
    v
}

pub fn arbitrage_page() -> String {
    let a = disputed_row("101", "INV-1");
    let b = disputed_row("102", "INV-2");
    table(
        &["ID"],
        &[
            ("deal deal-disputed", a.iter().map(String::as_str).collect()),
            ("deal", (0..10).map(|_| "plain").collect()),
            ("deal-disputed", b.iter().map(String::as_str).collect()),
        ],
    )
}

pub fn bank_row<'a>(trader: &'a str, when: &'a str) -> Vec<&'a str> {
    vec!["1", "x", "x", trader, "x", "x", "x", "x", "x", when]
}

pub fn bank_page() -> String {
    table(
        &["ID"],
        &[
            ("", bank_row("Jane", "01.03.2025 10:00")),
            ("", bank_row("Bob", "05.03.2025 09:30")),
            ("", bank_row("Jane", "03.03.2025 12:00")),
            ("", bank_row("Bob", "not a date")),
        ],
    )
}

/// Serves canned markup by base URL and records every navigation.
#[derive(Clone, Default)]
pub struct FakeRenderer {
    pages: HashMap<&'static str, String>,
    /// Navigation to a URL containing this text fails.
    pub fail_when: Option<String>,
    pub visited: Arc<Mutex<Vec<String>>>,
    current: Option<String>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All five pages populated for account "Acme".
    pub fn full() -> Self {
        let mut f = Self::new();
        f.pages.insert(BASE_URL_SPEED, speed_page());
        f.pages.insert(BASE_URL_ADS, ads_page());
        f.pages.insert(BASE_URL_CONVERSION, conversion_page());
        f.pages.insert(BASE_URL_DEALS, arbitrage_page());
        f.pages.insert(BASE_URL_BANK_STATEMENTS, bank_page());
        f
    }

    pub fn with_page(mut self, base: &'static str, html: String) -> Self {
        self.pages.insert(base, html);
        self
    }

    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_when = Some(needle.to_string());
        self
    }
}

impl Renderer for FakeRenderer {
    fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        self.visited.lock().unwrap().push(url.to_string());
        if let Some(n) = &self.fail_when {
            if url.contains(n.as_str()) {
                return Err(RenderError::Transport(format!("refused {url}")));
            }
        }
        let base = url.split('?').next().unwrap_or_default();
        self.current = self.pages.get(base).cloned();
        Ok(())
    }

    fn page_source(&mut self) -> Result<Option<String>, RenderError> {
        Ok(Some(self.current.clone().unwrap_or_else(|| "<html><body></body></html>".into())))
    }
}

/// Options with fast polling and fixed windows, writing under `out_root`.
pub fn quick_options(out_root: PathBuf) -> RunOptions {
    let mut o = RunOptions::with_time(TimeParams::default());
    o.out_root = out_root;
    o.sync = SyncOptions {
        timeout: Duration::from_millis(40),
        step: Duration::from_millis(5),
        probe_wait: Duration::ZERO,
    };
    o.boot.timeout = Duration::from_millis(40);
    o.boot.step = Duration::from_millis(5);
    o
}
