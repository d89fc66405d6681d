// tests/orchestrator.rs
mod common;

use std::fs;
use std::time::Duration;

use chrono::NaiveDate;

use common::*;
use desk_report::cancel::CancelToken;
use desk_report::config::consts::{BASE_URL_ADS, BASE_URL_CONVERSION};
use desk_report::error::{AccountError, RenderError, RunError};
use desk_report::model::AccountRecord;
use desk_report::progress::{NullProgress, Progress, SharedProgress};
use desk_report::query::ReportKind;
use desk_report::runner::{self, Orchestrator, task};

fn acme() -> AccountRecord {
    AccountRecord::new(7, "Acme")
}

fn stamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(9, 30, 0).unwrap()
}

#[test]
fn one_account_end_to_end() {
    let root = tmp_dir("orch_e2e");
    let fake = FakeRenderer::full();
    let visited = fake.visited.clone();
    let mut orch = Orchestrator::new(fake, quick_options(root.clone()));

    let summary = orch.run_at(&[acme()], &mut NullProgress, &CancelToken::new(), stamp()).unwrap();

    assert_eq!(summary.run_dir, root.join("reports_20250310_093000"));
    assert_eq!(summary.processed, 1);
    assert!(summary.failed.is_empty());
    assert_eq!(summary.written, [summary.run_dir.join("Acme.txt")]);

    let text = fs::read_to_string(&summary.written[0]).unwrap();
    assert!(text.starts_with("Report for: Acme\n"));
    assert!(text.contains("- Overall: 3.5 min. (42 deals)"));
    assert!(text.contains("- Jane: sell 2.1, buy 4.0 (10 deals)"));
    assert!(text.contains("Sell - Card, SBP\nBuy - Card"));
    assert!(text.contains("3. Conversion 80%."));
    assert!(text.contains(
        "5. Disputes - 2 pcs.\n   ID 101 (Invoice INV-1)\n   ID 102 (Invoice INV-2)"
    ));
    assert!(text.contains("7. Account working on sell and buy, 4 listings"));
    assert!(text.ends_with("8. Bob - 05.03.2025, Jane - 03.03.2025"));

    // five pages, in stage order
    let visited = visited.lock().unwrap();
    assert_eq!(visited.len(), 5);
    assert!(visited[0].contains("traders-speed"));
    assert!(visited[1].contains("trader/ads"));
    assert!(visited[2].contains("trader-conversions"));
    assert!(visited[3].contains("trader/deals"));
    assert!(visited[4].contains("bank-statements"));
}

#[test]
fn empty_pages_fall_back_to_defaults() {
    let root = tmp_dir("orch_defaults");
    let mut orch = Orchestrator::new(FakeRenderer::new(), quick_options(root));
    let summary = orch.run_at(&[acme()], &mut NullProgress, &CancelToken::new(), stamp()).unwrap();
    let text = fs::read_to_string(&summary.written[0]).unwrap();
    assert!(text.contains("- Overall: 0 min. (0 deals)"));
    assert!(text.contains("2. **ACCOUNT INACTIVE**"));
    assert!(text.contains("8. No statements found"));
}

#[test]
fn navigation_failure_skips_only_that_account() {
    let root = tmp_dir("orch_fail");
    // account 13's ads page refuses to load
    let fake = FakeRenderer::full().failing_on("service_provider_id%5B%5D=13&");
    let mut orch = Orchestrator::new(fake, quick_options(root));
    let accounts = [AccountRecord::new(13, "Broken"), acme()];

    let mut progress = SharedProgress::new();
    let summary = orch.run_at(&accounts, &mut progress, &CancelToken::new(), stamp()).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.written.len(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, 13);
    assert!(summary.failed[0].1.starts_with("ads page"));

    let snap = progress.snapshot();
    assert_eq!((snap.processed, snap.succeeded, snap.failed), (2, 1, 1));
    assert!(snap.finished);
    assert!(snap.lines.iter().any(|l| l.starts_with("Failed Broken")));
}

#[test]
fn fetch_reports_failing_kind() {
    let fake = FakeRenderer::full().failing_on(BASE_URL_CONVERSION);
    let mut orch = Orchestrator::new(fake, quick_options(tmp_dir("orch_kind")));
    let err = orch.collect(&acme(), &mut NullProgress).unwrap_err();
    assert!(matches!(err, AccountError::Navigate { kind: ReportKind::Conversion, .. }));
}

#[test]
fn same_name_twice_gets_numbered() {
    let root = tmp_dir("orch_dupes");
    let mut orch = Orchestrator::new(FakeRenderer::full(), quick_options(root));
    let accounts = [AccountRecord::new(7, "Acme"), AccountRecord::new(8, "Acme!")];
    let summary = orch.run_at(&accounts, &mut NullProgress, &CancelToken::new(), stamp()).unwrap();
    let names: Vec<_> = summary
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["Acme.txt", "Acme (2).txt"]);
}

#[test]
fn cancel_is_checked_between_accounts() {
    struct StopAfterFirst(CancelToken);
    impl Progress for StopAfterFirst {
        fn item_done(&mut self, _id: u32, _name: &str, _path: &std::path::Path) {
            self.0.cancel();
        }
    }

    let cancel = CancelToken::new();
    let mut orch = Orchestrator::new(FakeRenderer::full(), quick_options(tmp_dir("orch_cancel")));
    let accounts = [AccountRecord::new(1, "One"), AccountRecord::new(2, "Two")];
    let mut progress = StopAfterFirst(cancel.clone());
    let summary = orch.run_at(&accounts, &mut progress, &cancel, stamp()).unwrap();

    assert!(summary.stopped);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.written.len(), 1);
}

#[test]
fn output_root_that_is_a_file_is_critical() {
    let root = tmp_dir("orch_badroot");
    let file = root.join("taken");
    fs::write(&file, "x").unwrap();
    let mut orch = Orchestrator::new(FakeRenderer::full(), quick_options(file));
    let err = orch.run_at(&[acme()], &mut NullProgress, &CancelToken::new(), stamp()).unwrap_err();
    assert!(matches!(err, RunError::OutputDir { .. }));
}

#[test]
fn background_run_reports_progress() {
    let root = tmp_dir("orch_task");
    let handle = task::spawn_with_probe(
        quick_options(root),
        vec![acme(), AccountRecord::new(9, "Beta")],
        || true,
        |_| Ok(FakeRenderer::full().with_page(BASE_URL_ADS, String::new())),
    );
    let summary = handle.join().unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.written.len(), 2);
    let text = fs::read_to_string(&summary.written[1]).unwrap();
    assert!(text.starts_with("Report for: Beta"));
    assert!(text.contains("7. **ACCOUNT INACTIVE**"));
}

#[test]
fn background_run_boot_timeout() {
    let handle = task::spawn_with_probe(
        quick_options(tmp_dir("orch_boot")),
        vec![acme()],
        || false,
        |_| Ok(FakeRenderer::full()),
    );
    assert!(matches!(handle.join(), Err(RunError::Render(RenderError::BootTimedOut(_)))));
}

#[test]
fn background_run_cancelled_during_boot() {
    let mut opts = quick_options(tmp_dir("orch_boot_cancel"));
    opts.boot.timeout = Duration::from_secs(10);
    let handle =
        runner::task::spawn_with_probe(opts, vec![acme()], || false, |_| Ok(FakeRenderer::full()));
    handle.cancel();
    assert!(matches!(handle.join(), Err(RunError::Render(RenderError::BootCancelled))));
}
