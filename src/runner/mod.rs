// src/runner/mod.rs
//
// Orchestrator: for each selected account, walk the five pages through one
// renderer, extract, synthesize, persist. One account failing never stops the run.

pub mod stage;
pub mod task;

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::cancel::CancelToken;
use crate::config::options::{RunOptions, TimeParams};
use crate::error::{AccountError, RunError};
use crate::file::{ReportWriter, create_run_dir};
use crate::model::{AccountData, AccountRecord};
use crate::progress::Progress;
use crate::query::{self, ReportKind};
use crate::render::Renderer;
use crate::report;
use crate::specs;
use crate::sync::{self, Snapshot, TableState};

pub use stage::Stage;
pub use task::{RunHandle, spawn};

/// What a finished (or stopped) run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub run_dir: PathBuf,
    pub total: usize,
    /// Accounts attempted, successful or not.
    pub processed: usize,
    pub written: Vec<PathBuf>,
    /// `(id, error text)` of abandoned accounts.
    pub failed: Vec<(u32, String)>,
    /// Cancellation was observed before every account was attempted.
    pub stopped: bool,
}

pub struct Orchestrator<R: Renderer> {
    renderer: R,
    options: RunOptions,
}

impl<R: Renderer> Orchestrator<R> {
    pub fn new(renderer: R, options: RunOptions) -> Self {
        Self { renderer, options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RunOptions {
        &mut self.options
    }

    pub fn time_params(&self) -> &TimeParams {
        &self.options.time
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Navigate to one page and capture it once the table has settled.
    /// Only navigation can fail; a slow or empty page still yields a snapshot.
    pub fn fetch(
        &mut self,
        kind: ReportKind,
        account: &AccountRecord,
    ) -> Result<Snapshot, AccountError> {
        let url = query::url_for(kind, &self.options.time, account.id);
        logd!("[{}] {kind}: {url}", account.id);
        self.renderer
            .navigate(&url)
            .map_err(|source| AccountError::Navigate { kind, source })?;
        let snap = sync::capture(&mut self.renderer, &self.options.sync);
        if snap.state == TableState::NotReady {
            logw!("[{}] {kind}: extracting from unsettled page", account.id);
        }
        Ok(snap)
    }

    /// Walk `NotStarted → BankFetched`, filling one record per page.
    pub fn collect(
        &mut self,
        account: &AccountRecord,
        progress: &mut dyn Progress,
    ) -> Result<AccountData, AccountError> {
        let mut data = AccountData::default();
        let mut stage = Stage::NotStarted;

        while let Some(kind) = stage.pending_fetch() {
            let snap = self.fetch(kind, account)?;
            let html = snap.html.as_deref();
            let name = account.display_name.as_str();
            match kind {
                ReportKind::Speed => {
                    data.speed = specs::speed::extract(html, name);
                    progress.log(&format!(
                        "Speed: {} deals, mean {} min., {} trader(s)",
                        data.speed.total_deals,
                        data.speed.total_mean_time,
                        data.speed.traders.len()
                    ));
                }
                ReportKind::Ads => {
                    data.ads = specs::ads::extract(html);
                    if data.ads.is_active {
                        progress.log(&format!(
                            "Ads: {} listings (sell {}, buy {})",
                            data.ads.ads_count, data.ads.sell_count, data.ads.buy_count
                        ));
                    } else {
                        progress.log("Ads: none found, account inactive");
                    }
                }
                ReportKind::Conversion => {
                    data.conversion = specs::conversion::extract(html, name);
                    progress.log(&format!("Conversion: {}", data.conversion.conversion_percent));
                }
                ReportKind::Arbitrage => {
                    data.arbitrage = specs::arbitrage::extract(html);
                    progress.log(&format!("Disputes: {}", data.arbitrage.count));
                }
                ReportKind::BankStatements => {
                    data.bank = specs::bank::extract(html);
                    let traders = data.bank.per_trader_latest.len();
                    progress.log(&format!("Bank statements: {traders} trader(s)"));
                }
            }
            stage = stage.next();
            logd!("[{}] -> {stage}", account.id);
        }

        Ok(data)
    }

    /// Full traversal for one account, ending in `ReportWritten`.
    pub fn process_account(
        &mut self,
        account: &AccountRecord,
        writer: &mut ReportWriter,
        progress: &mut dyn Progress,
    ) -> Result<PathBuf, AccountError> {
        let data = self.collect(account, progress)?;
        let text = report::synthesize(&account.display_name, &data, self.options.auto_no_incidents);
        let path = writer
            .write(&account.display_name, account.id, &text)
            .map_err(|source| AccountError::Persist { path: writer.dir().to_path_buf(), source })?;
        logf!("[{}] {} -> {}", account.id, Stage::ReportWritten, path.display());
        Ok(path)
    }

    /// Process `accounts` in order into a fresh `reports_<stamp>` folder.
    /// `cancel` is looked at once per account, before it starts.
    pub fn run(
        &mut self,
        accounts: &[AccountRecord],
        progress: &mut dyn Progress,
        cancel: &CancelToken,
    ) -> Result<RunSummary, RunError> {
        self.run_at(accounts, progress, cancel, chrono::Local::now().naive_local())
    }

    /// `run` with an explicit clock for the folder stamp.
    pub fn run_at(
        &mut self,
        accounts: &[AccountRecord],
        progress: &mut dyn Progress,
        cancel: &CancelToken,
        now: NaiveDateTime,
    ) -> Result<RunSummary, RunError> {
        let run_dir = create_run_dir(&self.options.out_root, now)
            .map_err(|source| RunError::OutputDir { path: self.options.out_root.clone(), source })?;
        logf!("Run: {} account(s) into {}", accounts.len(), run_dir.display());

        let mut writer = ReportWriter::new(&run_dir);
        let mut summary = RunSummary { run_dir, total: accounts.len(), ..RunSummary::default() };

        progress.begin(accounts.len());
        progress.log(&format!("Reports folder: {}", summary.run_dir.display()));

        for (i, account) in accounts.iter().enumerate() {
            if cancel.is_cancelled() {
                logf!("Run: stopped before account {}", account.id);
                progress.log("Stopped by operator");
                summary.stopped = true;
                break;
            }

            progress.update_status(&format!(
                "Processing {}... ({}/{})",
                account.display_name,
                i + 1,
                accounts.len()
            ));
            progress.log(&format!("{} (ID {})", account.display_name, account.id));

            match self.process_account(account, &mut writer, progress) {
                Ok(path) => {
                    progress.item_done(account.id, &account.display_name, &path);
                    summary.written.push(path);
                }
                Err(e) => {
                    loge!("[{}] {}: {e}", account.id, account.display_name);
                    progress.item_failed(account.id, &account.display_name, &e.to_string());
                    summary.failed.push((account.id, e.to_string()));
                }
            }
            summary.processed += 1;
        }

        progress.update_status(&format!("Done: {}/{}", summary.processed, summary.total));
        progress.finish();
        logf!(
            "Run: {} written, {} failed, {} skipped",
            summary.written.len(),
            summary.failed.len(),
            summary.total - summary.processed
        );
        Ok(summary)
    }
}
