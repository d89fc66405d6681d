// src/query.rs
//
// Target URLs for the five dashboard pages. Pure string building: no network,
// no validation of window values beyond passing them through.

use std::fmt;

use crate::config::consts::*;
use crate::config::options::{TimeParams, TimeWindow, WindowKind};

/// The five pages visited per account, in visiting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Speed,
    Ads,
    Conversion,
    Arbitrage,
    BankStatements,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Speed,
        ReportKind::Ads,
        ReportKind::Conversion,
        ReportKind::Arbitrage,
        ReportKind::BankStatements,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Speed => "speed",
            ReportKind::Ads => "ads",
            ReportKind::Conversion => "conversion",
            ReportKind::Arbitrage => "arbitrage",
            ReportKind::BankStatements => "bank statements",
        }
    }

    /// Window that drives this page, if any.
    pub fn window(self) -> Option<WindowKind> {
        match self {
            ReportKind::Speed => Some(WindowKind::Speed),
            ReportKind::Conversion => Some(WindowKind::Conversion),
            ReportKind::Arbitrage => Some(WindowKind::Arbitrage),
            ReportKind::Ads | ReportKind::BankStatements => None,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form-style encoding: unreserved chars kept, space as `+`, rest percent-escaped.
fn encode_plus(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

fn encode_pairs(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| join!(&encode_plus(k), "=", &encode_plus(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends one raw `name[]=id` pair per id.
fn push_id_array(query: &mut String, name: &str, ids: &[u32]) {
    for id in ids {
        query.push_str(&format!("&{name}[]={id}"));
    }
}

fn windowed(base: &str, window: &TimeWindow, ids: &[u32]) -> String {
    let mut query = encode_pairs(&[
        ("from_date", s!(window.from_param())),
        ("to_date", s!(window.to_param())),
        ("lines_per_page", LINES_PER_PAGE.to_string()),
    ]);
    push_id_array(&mut query, "service_provider_ids", ids);
    format!("{base}?{query}")
}

pub fn speed_url(window: &TimeWindow, ids: &[u32]) -> String {
    windowed(BASE_URL_SPEED, window, ids)
}

pub fn conversion_url(window: &TimeWindow, ids: &[u32]) -> String {
    windowed(BASE_URL_CONVERSION, window, ids)
}

pub fn ads_url(id: u32) -> String {
    let query = encode_pairs(&[
        ("service_provider_id[]", id.to_string()),
        ("status[]", ADS_STATUS_ACTIVE.to_string()),
    ]);
    format!("{BASE_URL_ADS}?{query}")
}

pub fn arbitrage_url(window: &TimeWindow, id: u32) -> String {
    let query = encode_pairs(&[
        ("from_date", s!(window.from_param())),
        ("to_date", s!(window.to_param())),
        ("fiat_id[]", DEALS_FIAT_ID.to_string()),
        ("status[]", DEALS_STATUS_DISPUTED.to_string()),
        ("service_provider[]", id.to_string()),
    ]);
    format!("{BASE_URL_DEALS}?{query}")
}

pub fn bank_statements_url(id: u32) -> String {
    let query = encode_pairs(&[("service_provider[]", id.to_string())]);
    format!("{BASE_URL_BANK_STATEMENTS}?{query}")
}

/// URL of `kind` for a single account.
pub fn url_for(kind: ReportKind, time: &TimeParams, id: u32) -> String {
    match kind {
        ReportKind::Speed => speed_url(&time.speed, &[id]),
        ReportKind::Ads => ads_url(id),
        ReportKind::Conversion => conversion_url(&time.conversion, &[id]),
        ReportKind::Arbitrage => arbitrage_url(&time.arbitrage, id),
        ReportKind::BankStatements => bank_statements_url(id),
    }
}
