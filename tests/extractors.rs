// tests/extractors.rs
mod common;

use common::*;
use desk_report::model::{
    AdsReport, ArbitrageReport, BankStatementReport, ConversionReport, SpeedReport,
};
use desk_report::specs::{ads, arbitrage, bank, conversion, speed};

#[test]
fn speed_total_row_and_trader_blocks() {
    let r = speed::extract(Some(speed_page().as_str()), "Acme");
    assert_eq!(r.total_deals, "42");
    assert_eq!(r.total_mean_time, "3.5");
    assert_eq!(r.arbitrage_count, "1");

    let names: Vec<&str> = r.traders.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Jane", "Bob"]);
    assert_eq!((r.traders[0].sell_time.as_str(), r.traders[0].buy_time.as_str()), ("2.1", "4.0"));
    assert_eq!(r.traders[0].deal_count, "10");
    // Bob never sold: stays at the default
    assert_eq!((r.traders[1].sell_time.as_str(), r.traders[1].buy_time.as_str()), ("0", "7.5"));
}

#[test]
fn speed_resolves_alias_shown_in_table() {
    let r = speed::extract(Some(speed_page().as_str()), "Acme Payments | Acme");
    assert_eq!(r.total_deals, "42");
}

#[test]
fn speed_skips_tables_in_templates_and_comments() {
    let html = speed_page().replacen(
        "<body>",
        concat!(
            "<body><script type=\"text/x-template\">",
            "<table><tr><td>{{ x }}</td></tr></table></script>",
            "<!-- <table><tr><td>Total (Acme)</td><td>0</td></tr></table> -->",
        ),
        1,
    );
    let r = speed::extract(Some(html.as_str()), "Acme");
    assert_eq!(r.total_deals, "42");
    assert_eq!(r.traders.len(), 2);
}

#[test]
fn speed_without_table_or_match_is_default() {
    assert_eq!(speed::extract(None, "Acme"), SpeedReport::default());
    assert_eq!(speed::extract(Some("<p>loading</p>"), "Acme"), SpeedReport::default());

    let r = speed::extract(Some(speed_page().as_str()), "Someone Else");
    assert_eq!(r.total_deals, "0");
    // trader blocks do not depend on the account name
    assert_eq!(r.traders.len(), 2);
}

#[test]
fn speed_short_total_row_is_ignored() {
    let html = table(&["a"], &[("", vec!["1", "Total (Acme)", "", "42"])]);
    let r = speed::extract(Some(html.as_str()), "Acme");
    assert_eq!(r.total_deals, "0");
}

#[test]
fn speed_repeated_trader_keeps_first_deal_count() {
    let html = table(
        &["a"],
        &[
            ("", vec!["", "Total (Jane)", "", "10", "", "", ""]),
            ("", vec!["", "", "Sell", "", "1.0", "", ""]),
            ("", vec!["", "Total (Jane)", "", "99", "", "", ""]),
            ("", vec!["", "", "Buy", "", "2.0", "", ""]),
        ],
    );
    let r = speed::extract(Some(html.as_str()), "Acme");
    assert_eq!(r.traders.len(), 1);
    assert_eq!(r.traders[0].deal_count, "10");
    assert_eq!(r.traders[0].sell_time, "1.0");
    assert_eq!(r.traders[0].buy_time, "2.0");
}

#[test]
fn ads_methods_and_counts() {
    let r = ads::extract(Some(ads_page().as_str()));
    assert!(r.is_active);
    assert_eq!(r.ads_count, 4);
    assert_eq!(r.sell_count, 3);
    assert_eq!(r.buy_count, 1);
    assert_eq!(r.sell_methods.iter().collect::<Vec<_>>(), ["Card", "SBP"]);
    assert_eq!(r.buy_methods.iter().collect::<Vec<_>>(), ["Card"]);
}

#[test]
fn ads_header_only_or_missing_is_inactive() {
    let header_only = table(&["ID", "Method", "Side"], &[]);
    for html in [None, Some(header_only.as_str()), Some("<div/>")] {
        let r = ads::extract(html);
        assert_eq!(r, AdsReport::default());
        assert!(!r.is_active);
    }
}

#[test]
fn ads_unknown_side_still_counts_as_listing() {
    let html = table(&["ID"], &[("", ads_row("SBP", "Other")), ("", vec!["too", "short"])]);
    let r = ads::extract(Some(html.as_str()));
    assert_eq!(r.ads_count, 1);
    assert_eq!(r.sell_count + r.buy_count, 0);
    assert!(r.is_active);
}

#[test]
fn conversion_total_row() {
    let r = conversion::extract(Some(conversion_page().as_str()), "Acme");
    assert_eq!(r.paid_count, "80");
    assert_eq!(r.cancelled_count, "20");
    assert_eq!(r.total_count, "100");
    assert_eq!(r.conversion_percent, "80%");

    let none = conversion::extract(Some(conversion_page().as_str()), "Nobody");
    assert_eq!(none, ConversionReport::default());
}

#[test]
fn conversion_name_with_doubled_spaces() {
    let html = table(
        &["#", "Name", "a", "b", "Paid", "Cancelled", "Total", "c", "d", "Conv"],
        &[("", vec!["7", "Total (Acme  Pay)", "", "", "80", "20", "100", "", "", "80%"])],
    );
    let r = conversion::extract(Some(html.as_str()), "Acme  Pay");
    assert_eq!(r.paid_count, "80");
    assert_eq!(r.conversion_percent, "80%");

    let r = conversion::extract(Some(html.as_str()), "Acme Pay EU | Acme   Pay");
    assert_eq!(r.total_count, "100");
}

#[test]
fn arbitrage_disputed_rows() {
    let r = arbitrage::extract(Some(arbitrage_page().as_str()));
    assert_eq!(r.count, 2);
    assert_eq!(r.deals[0].id, "101");
    assert_eq!(r.deals[0].invoice, "INV-1");
    assert_eq!(r.deals[0].trader, "c3");
    assert_eq!(r.deals[0].amount, "c7");
    assert_eq!(r.deals[0].currency, "c4");
    assert_eq!(r.deals[0].status, "Pending Arbitration");
    assert_eq!(r.deals[0].created_at, "");
    assert_eq!(r.deals[1].invoice, "INV-2");
}

#[test]
fn arbitrage_missing_invoice_link() {
    let mut row = disputed_row("5", "x");
    row[1] = "no link".into();
    let html = table(&["ID"], &[("deal-disputed", row.iter().map(String::as_str).collect())]);
    let r = arbitrage::extract(Some(html.as_str()));
    assert_eq!(r.deals[0].invoice, "N/A");
}

#[test]
fn arbitrage_falls_back_to_status_text() {
    let mut cells: Vec<String> = (0..19).map(|i| format!("f{i}")).collect();
    cells[0] = "900".into();
    cells[15] = "Pending Arbitration Review".into();
    let other: Vec<String> = (0..16).map(|_| "Paid".to_string()).collect();
    let html = table(
        &["ID"],
        &[
            ("", cells.iter().map(String::as_str).collect()),
            ("", other.iter().map(String::as_str).collect()),
        ],
    );
    let r = arbitrage::extract(Some(html.as_str()));
    assert_eq!(r.count, 1);
    assert_eq!(r.deals[0].id, "900");
    assert_eq!(r.deals[0].status, "Pending Arbitration Review");
    assert_eq!(r.deals[0].created_at, "f18");
}

#[test]
fn arbitrage_empty_table() {
    let html = table(&["ID"], &[]);
    assert_eq!(arbitrage::extract(Some(html.as_str())), ArbitrageReport::default());
}

#[test]
fn bank_latest_per_trader() {
    let r = bank::extract(Some(bank_page().as_str()));
    assert_eq!(r.per_trader_latest.len(), 2);
    assert_eq!(r.per_trader_latest["Jane"].to_string(), "2025-03-03");
    assert_eq!(r.per_trader_latest["Bob"].to_string(), "2025-03-05");
    assert_eq!(r.overall_latest.map(|d| d.to_string()).as_deref(), Some("2025-03-05"));

    assert_eq!(bank::extract(None), BankStatementReport::default());
}
