// src/cli.rs
use std::{
    error::Error,
    io::{self, BufRead},
    path::PathBuf,
    thread,
    time::Duration,
};

use chrono::NaiveDateTime;

use crate::config::consts::WINDOW_TIME_FMT;
use crate::config::options::{RunOptions, TimeParams, WindowKind};
use crate::progress::Progress;
use crate::registry::{Registry, RegistryPaths, Selection};
use crate::render::WebDriverRenderer;
use crate::runner;

const POLL_EVERY: Duration = Duration::from_millis(200);

/// Parsed command line.
#[derive(Clone, Debug)]
pub struct Params {
    pub registry: RegistryPaths,
    pub selection: Selection,
    pub name_filter: Option<String>,
    pub list: bool,
    pub help: bool,
    /// Pin empty window ends to the start time.
    pub set_now: bool,
    pub options: RunOptions,
}

impl Params {
    pub fn new() -> Self {
        Self {
            registry: RegistryPaths::default(),
            selection: Selection::All,
            name_filter: None,
            list: false,
            help: false,
            set_now: false,
            options: RunOptions::default(),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_args(std::env::args().skip(1))?;
    if params.help {
        eprintln!("{}", include_str!("cli_help.txt"));
        return Ok(());
    }
    execute(params)
}

pub fn execute(mut params: Params) -> Result<(), Box<dyn Error>> {
    let registry = Registry::load(params.registry.clone())?;

    if params.list {
        for rec in registry.accounts() {
            println!("{}|{}|{}", rec.id, rec.display_name, registry.group_of(rec.id));
        }
        return Ok(());
    }

    let accounts = registry.select(&params.selection, params.name_filter.as_deref());
    if accounts.is_empty() {
        println!("No accounts selected.");
        return Ok(());
    }

    if params.set_now {
        params.options.time.fill_missing_to(chrono::Local::now().naive_local());
    }
    crate::log::set_file(params.options.out_root.join(crate::log::DEFAULT_LOG_FILE));
    print_windows(&params.options.time);

    let handle = runner::spawn(params.options, accounts, |o| {
        WebDriverRenderer::connect(&o.webdriver_url, &o.debugger_address)
    });

    // "q" or "stop" on stdin asks the worker to stop after the current account.
    let cancel = handle.cancel_token();
    thread::spawn(move || {
        for line in io::stdin().lock().lines().map_while(Result::ok) {
            if matches!(line.trim(), "q" | "stop") {
                println!("Stopping after the current account...");
                cancel.cancel();
                break;
            }
        }
    });

    let mut console = ConsoleProgress::default();
    let shared = handle.shared_progress();
    let mut seen = 0;
    loop {
        let finished = handle.is_finished();
        let fresh = shared.lines_since(seen);
        seen += fresh.len();
        for line in &fresh {
            console.log(line);
        }
        console.update_status(&shared.snapshot().status);
        if finished {
            break;
        }
        thread::sleep(POLL_EVERY);
    }

    let summary = handle.join()?;
    println!(
        "{} of {} account(s) processed, {} report(s) in {}{}",
        summary.processed,
        summary.total,
        summary.written.len(),
        summary.run_dir.display(),
        if summary.stopped { " (stopped)" } else { "" }
    );
    for (id, err) in &summary.failed {
        println!("  failed {id}: {err}");
    }
    Ok(())
}

fn print_windows(time: &TimeParams) {
    for (label, kind) in [
        ("speed", WindowKind::Speed),
        ("conversion", WindowKind::Conversion),
        ("arbitrage", WindowKind::Arbitrage),
    ] {
        let w = time.get(kind);
        let to = if w.to.is_some() { w.to_param() } else { "now" };
        println!("{label:<11} {} .. {to}", w.from_param());
    }
}

/// Prints operator lines and status changes to stdout.
#[derive(Default)]
pub struct ConsoleProgress {
    last_status: String,
}

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn update_status(&mut self, msg: &str) {
        if !msg.is_empty() && msg != self.last_status {
            println!("-- {msg}");
            self.last_status = msg.to_string();
        }
    }
}

/// Flag, window, and whether it sets the `from` end.
const WINDOW_FLAGS: [(&str, WindowKind, bool); 6] = [
    ("--speed-from", WindowKind::Speed, true),
    ("--speed-to", WindowKind::Speed, false),
    ("--conversion-from", WindowKind::Conversion, true),
    ("--conversion-to", WindowKind::Conversion, false),
    ("--arbitrage-from", WindowKind::Arbitrage, true),
    ("--arbitrage-to", WindowKind::Arbitrage, false),
];

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Params, Box<dyn Error>> {
    let mut params = Params::new();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        let mut value = |what: &str| args.next().ok_or_else(|| format!("Missing value for {what}"));
        match a.as_str() {
            "--accounts" => params.registry.accounts = PathBuf::from(value(&a)?),
            "--groups" => params.registry.groups = PathBuf::from(value(&a)?),
            "--all" | "-a" => params.selection = Selection::All,
            "--ids" => params.selection = Selection::Ids(parse_ids_list(&value(&a)?)?),
            "-g" | "--group" => params.selection = Selection::Group(value(&a)?),
            "-f" | "--filter" => params.name_filter = Some(value(&a)?),
            "--list" => params.list = true,
            "--set-now" => params.set_now = true,
            "--no-incidents" => params.options.auto_no_incidents = true,
            "-o" | "--out" => params.options.out_root = PathBuf::from(value(&a)?),
            "--webdriver" => params.options.webdriver_url = value(&a)?,
            "--debugger" => params.options.debugger_address = value(&a)?,
            "--table-timeout" => {
                let secs: u64 = value(&a)?.parse()?;
                params.options.sync.timeout = Duration::from_secs(secs);
            }
            "-h" | "--help" => params.help = true,
            flag => {
                let Some(&(_, kind, from)) = WINDOW_FLAGS.iter().find(|(f, ..)| *f == flag) else {
                    return Err(format!("Unknown arg: {a}").into());
                };
                set_window(&mut params.options.time, kind, from, &value(&a)?)?;
            }
        }
    }

    Ok(params)
}

/// Empty value clears that end of the window.
fn set_window(
    time: &mut TimeParams,
    kind: WindowKind,
    from: bool,
    v: &str,
) -> Result<(), Box<dyn Error>> {
    let v = v.trim();
    let value = if v.is_empty() {
        None
    } else {
        NaiveDateTime::parse_from_str(v, WINDOW_TIME_FMT)
            .map_err(|_| format!("Bad time '{v}', expected YYYY-MM-DD HH:MM:SS"))?;
        Some(v.to_string())
    };
    let w = time.get_mut(kind);
    if from { w.from = value } else { w.to = value }
    Ok(())
}

/// `1,2,5-7` → `[1, 2, 5, 6, 7]`, sorted and deduplicated.
pub fn parse_ids_list(s: &str) -> Result<Vec<u32>, Box<dyn Error>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some(dash) = part.find('-') {
            let a: u32 = part[..dash].trim().parse()?;
            let b: u32 = part[dash + 1..].trim().parse()?;
            if a > b { return Err(format!("Invalid range: {part}").into()); }
            out.extend(a..=b);
        } else {
            out.push(part.parse()?);
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ids_with_ranges() {
        assert_eq!(parse_ids_list("5-7, 1,2,6").unwrap(), vec![1, 2, 5, 6, 7]);
        assert!(parse_ids_list("7-5").is_err());
        assert!(parse_ids_list("x").is_err());
    }

    #[test]
    fn window_flags_validate() {
        let p = parse_args(args(&[
            "--speed-from",
            "2025-01-02 15:00:00",
            "--arbitrage-to",
            "",
            "--conversion-to",
            "2025-01-03 08:00:00",
        ]))
        .unwrap();
        assert_eq!(p.options.time.speed.from.as_deref(), Some("2025-01-02 15:00:00"));
        assert_eq!(p.options.time.arbitrage.to, None);
        assert_eq!(p.options.time.conversion.to.as_deref(), Some("2025-01-03 08:00:00"));
        assert!(parse_args(args(&["--speed-from", "yesterday"])).is_err());
        assert!(parse_args(args(&["--speed-until", "x"])).is_err());
        assert!(parse_args(args(&["--arbitrage-from"])).is_err());
    }

    #[test]
    fn selection_flags() {
        let p = parse_args(args(&["-g", "Night shift", "-f", "acme", "--no-incidents"])).unwrap();
        assert_eq!(p.selection, Selection::Group(s!("Night shift")));
        assert_eq!(p.name_filter.as_deref(), Some("acme"));
        assert!(p.options.auto_no_incidents);
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["--ids"])).is_err());
    }
}
