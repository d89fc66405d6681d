// src/runner/stage.rs
//
// Per-account progress through the five pages. Strictly linear.

use std::fmt;

use crate::query::ReportKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    NotStarted,
    SpeedFetched,
    AdsFetched,
    ConversionFetched,
    ArbitrageFetched,
    BankFetched,
    ReportWritten,
}

impl Stage {
    /// Page fetched by the transition out of this stage.
    /// None for `BankFetched` (next step writes the report) and the terminal stage.
    pub fn pending_fetch(self) -> Option<ReportKind> {
        match self {
            Stage::NotStarted => Some(ReportKind::Speed),
            Stage::SpeedFetched => Some(ReportKind::Ads),
            Stage::AdsFetched => Some(ReportKind::Conversion),
            Stage::ConversionFetched => Some(ReportKind::Arbitrage),
            Stage::ArbitrageFetched => Some(ReportKind::BankStatements),
            Stage::BankFetched | Stage::ReportWritten => None,
        }
    }

    pub fn next(self) -> Stage {
        match self {
            Stage::NotStarted => Stage::SpeedFetched,
            Stage::SpeedFetched => Stage::AdsFetched,
            Stage::AdsFetched => Stage::ConversionFetched,
            Stage::ConversionFetched => Stage::ArbitrageFetched,
            Stage::ArbitrageFetched => Stage::BankFetched,
            Stage::BankFetched | Stage::ReportWritten => Stage::ReportWritten,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::ReportWritten
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
