// src/report.rs
//
// Eight numbered sections, one account. Pure formatting; no I/O.

use crate::config::consts::STATEMENT_DATE_FMT;
use crate::core::sanitize::strip_percent;
use crate::model::{AccountData, AdsReport, ArbitrageReport, BankStatementReport, SpeedReport};

pub const RULE_WIDTH: usize = 50;
pub const INACTIVE_MARK: &str = "**ACCOUNT INACTIVE**";
pub const NO_STATEMENTS: &str = "No statements found";

/// Full report text for one account, lines joined by `\n`, no trailing newline.
pub fn synthesize(name: &str, data: &AccountData, auto_no_incidents: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("Report for: {name}"));
    lines.push("=".repeat(RULE_WIDTH));

    speed_section(&mut lines, &data.speed);
    lines.push(active_section(&data.ads));
    lines.push(format!("3. Conversion {}%.", strip_percent(&data.conversion.conversion_percent)));
    lines.push(s!("4. -"));
    lines.push(disputes_section(&data.arbitrage));
    lines.push(s!(if auto_no_incidents { "6. No incidents found" } else { "6. -" }));
    lines.push(working_section(&data.ads));
    lines.push(format!("8. {}", format_bank_statements(&data.bank)));

    lines.join("\n")
}

fn speed_section(lines: &mut Vec<String>, speed: &SpeedReport) {
    lines.push(s!("1. Speed:"));
    lines.push(format!("- Overall: {} min. ({} deals)", speed.total_mean_time, speed.total_deals));
    for t in &speed.traders {
        lines.push(format!(
            "- {}: sell {}, buy {} ({} deals)",
            t.name, t.sell_time, t.buy_time, t.deal_count
        ));
    }
}

fn active_section(ads: &AdsReport) -> String {
    if !ads.is_active {
        return format!("2. {INACTIVE_MARK}");
    }
    let methods = |set: &std::collections::BTreeSet<String>| {
        if set.is_empty() {
            s!("-")
        } else {
            set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        }
    };
    let (sell, buy) = (methods(&ads.sell_methods), methods(&ads.buy_methods));
    format!("2. Active:\nSell - {sell}\nBuy - {buy}")
}

fn disputes_section(arb: &ArbitrageReport) -> String {
    let mut out = format!("5. Disputes - {} pcs.", arb.count);
    for d in &arb.deals {
        out.push_str(&format!("\n   ID {} (Invoice {})", d.id, d.invoice));
    }
    out
}

fn working_section(ads: &AdsReport) -> String {
    if !ads.is_active {
        return format!("7. {INACTIVE_MARK}");
    }
    let sides = match (ads.sell_count > 0, ads.buy_count > 0) {
        (true, true) => "sell and buy",
        (true, false) => "sell",
        (false, true) => "buy",
        (false, false) => "inactive",
    };
    format!("7. Account working on {sides}, {} listings", ads.ads_count)
}

/// `"<trader> - dd.mm.yyyy"` entries, latest date first, comma-joined.
/// Traders sharing a date keep the order they first appear on the page.
pub fn format_bank_statements(bank: &BankStatementReport) -> String {
    if bank.is_empty() {
        return s!(NO_STATEMENTS);
    }
    let mut entries: Vec<_> = bank.per_trader_latest.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
        .iter()
        .map(|(trader, date)| format!("{trader} - {}", date.format(STATEMENT_DATE_FMT)))
        .collect::<Vec<_>>()
        .join(", ")
}
