// src/config/window.rs
//
// Default "from" instants for each time-windowed page.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use super::options::WindowKind;

fn at_hour(dt: NaiveDateTime, hour: u32) -> NaiveDateTime {
    // hour is always one of our literal constants, all < 24
    dt.date().and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
}

/// Shift-aligned start of the reporting window.
///
/// Arbitrage always looks back seven days to midnight. Speed and conversion follow
/// the shift buckets: [0,3) → yesterday 15:00, [3,8) → yesterday 17:00,
/// [8,20) → today 00:00, [20,24) → today 15:00.
pub fn default_from(now: NaiveDateTime, kind: WindowKind) -> NaiveDateTime {
    match kind {
        WindowKind::Arbitrage => at_hour(now - Duration::days(7), 0),
        WindowKind::Speed | WindowKind::Conversion => {
            let yesterday = now - Duration::days(1);
            match now.hour() {
                0..=2 => at_hour(yesterday, 15),
                3..=7 => at_hour(yesterday, 17),
                8..=19 => at_hour(now, 0),
                _ => at_hour(now, 15),
            }
        }
    }
}
