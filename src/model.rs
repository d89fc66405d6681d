// src/model.rs
//
// One record type per report kind. `Default` is exactly the fallback the
// pipeline substitutes when a page yields nothing usable.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use indexmap::IndexMap;

/// Registry entry. `display_name` may hold several `|`-separated aliases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: u32,
    pub display_name: String,
}

impl AccountRecord {
    pub fn new(id: u32, display_name: impl Into<String>) -> Self {
        Self { id, display_name: display_name.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraderSpeed {
    pub name: String,
    pub sell_time: String,
    pub buy_time: String,
    pub deal_count: String,
}

impl TraderSpeed {
    pub fn new(name: impl Into<String>, deal_count: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sell_time: s!("0"),
            buy_time: s!("0"),
            deal_count: deal_count.into(),
        }
    }
}

/// Speed page. Numbers are kept as the dashboard prints them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeedReport {
    pub total_mean_time: String,
    pub total_deals: String,
    pub arbitrage_count: String,
    pub traders: Vec<TraderSpeed>,
}

impl Default for SpeedReport {
    fn default() -> Self {
        Self {
            total_mean_time: s!("0"),
            total_deals: s!("0"),
            arbitrage_count: s!("0"),
            traders: Vec::new(),
        }
    }
}

/// Active listings page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdsReport {
    pub sell_methods: BTreeSet<String>,
    pub buy_methods: BTreeSet<String>,
    pub sell_count: usize,
    pub buy_count: usize,
    pub ads_count: usize,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionReport {
    pub conversion_percent: String,
    pub paid_count: String,
    pub cancelled_count: String,
    pub total_count: String,
}

impl Default for ConversionReport {
    fn default() -> Self {
        Self {
            conversion_percent: s!("0"),
            paid_count: s!("0"),
            cancelled_count: s!("0"),
            total_count: s!("0"),
        }
    }
}

/// One deal under dispute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisputedDeal {
    pub id: String,
    pub invoice: String,
    pub trader: String,
    pub amount: String,
    pub currency: String,
    pub payment_system: String,
    pub kind: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArbitrageReport {
    pub count: usize,
    pub deals: Vec<DisputedDeal>,
}

impl ArbitrageReport {
    pub fn push(&mut self, deal: DisputedDeal) {
        self.deals.push(deal);
        self.count += 1;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BankStatementReport {
    /// Latest date per trader, in the order traders first appear on the page.
    pub per_trader_latest: IndexMap<String, NaiveDate>,
    pub overall_latest: Option<NaiveDate>,
}

impl BankStatementReport {
    /// Keep the later of the stored and `date` for `trader`, and for the whole set.
    pub fn observe(&mut self, trader: &str, date: NaiveDate) {
        let slot = self.per_trader_latest.entry(s!(trader)).or_insert(date);
        if date > *slot {
            *slot = date;
        }
        if self.overall_latest.is_none_or(|d| date > d) {
            self.overall_latest = Some(date);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.per_trader_latest.is_empty()
    }
}

/// Everything the synthesizer needs for one account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountData {
    pub speed: SpeedReport,
    pub ads: AdsReport,
    pub conversion: ConversionReport,
    pub arbitrage: ArbitrageReport,
    pub bank: BankStatementReport,
}
