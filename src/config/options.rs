// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;

use super::consts::*;
use super::window::default_from;

/// Pages that take a time window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowKind {
    Speed,
    Conversion,
    Arbitrage,
}

/// `from`/`to` passed through to the dashboard untouched.
/// An empty `to` means "now" on the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl TimeWindow {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        let clean = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        Self { from: clean(from), to: clean(to) }
    }

    pub fn from_param(&self) -> &str {
        self.from.as_deref().unwrap_or("")
    }

    pub fn to_param(&self) -> &str {
        self.to.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeParams {
    pub speed: TimeWindow,
    pub conversion: TimeWindow,
    pub arbitrage: TimeWindow,
}

impl TimeParams {
    /// Default windows for `now`: shift-aligned `from`, empty `to`.
    pub fn defaults_at(now: NaiveDateTime) -> Self {
        let from = |k| Some(default_from(now, k).format(WINDOW_TIME_FMT).to_string());
        Self {
            speed: TimeWindow { from: from(WindowKind::Speed), to: None },
            conversion: TimeWindow { from: from(WindowKind::Conversion), to: None },
            arbitrage: TimeWindow { from: from(WindowKind::Arbitrage), to: None },
        }
    }

    pub fn get(&self, kind: WindowKind) -> &TimeWindow {
        match kind {
            WindowKind::Speed => &self.speed,
            WindowKind::Conversion => &self.conversion,
            WindowKind::Arbitrage => &self.arbitrage,
        }
    }

    pub fn get_mut(&mut self, kind: WindowKind) -> &mut TimeWindow {
        match kind {
            WindowKind::Speed => &mut self.speed,
            WindowKind::Conversion => &mut self.conversion,
            WindowKind::Arbitrage => &mut self.arbitrage,
        }
    }

    /// Pin every empty `to` to `now`.
    pub fn fill_missing_to(&mut self, now: NaiveDateTime) {
        let stamp = now.format(WINDOW_TIME_FMT).to_string();
        for w in [&mut self.speed, &mut self.conversion, &mut self.arbitrage] {
            if w.to.is_none() {
                w.to = Some(stamp.clone());
            }
        }
    }
}

/// Readiness-poll timings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncOptions {
    pub timeout: Duration,
    pub step: Duration,
    pub probe_wait: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(TABLE_TIMEOUT_SECS),
            step: Duration::from_millis(TABLE_POLL_STEP_MS),
            probe_wait: Duration::from_millis(TABLE_PROBE_WAIT_MS),
        }
    }
}

/// Resource-boot timings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootOptions {
    pub timeout: Duration,
    pub step: Duration,
}

impl Default for BootOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(BOOT_TIMEOUT_MS),
            step: Duration::from_millis(BOOT_STEP_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub time: TimeParams,
    /// Section 6 reads "No incidents found" instead of a placeholder.
    pub auto_no_incidents: bool,
    /// Parent of the per-run `reports_<stamp>` folder.
    pub out_root: PathBuf,
    pub webdriver_url: String,
    /// `host:port` of the already-running debuggable browser.
    pub debugger_address: String,
    pub sync: SyncOptions,
    pub boot: BootOptions,
}

impl RunOptions {
    pub fn with_time(time: TimeParams) -> Self {
        Self { time, ..Self::default() }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            time: TimeParams::defaults_at(chrono::Local::now().naive_local()),
            auto_no_incidents: false,
            out_root: PathBuf::from(DEFAULT_OUT_DIR),
            webdriver_url: s!(DEFAULT_WEBDRIVER_URL),
            debugger_address: format!("{DEBUGGING_HOST}:{DEBUGGING_PORT}"),
            sync: SyncOptions::default(),
            boot: BootOptions::default(),
        }
    }
}
