// src/sync.rs
//
// Waiting for an asynchronously rendered data table.
// Whatever the outcome, the caller still gets the markup that is on screen:
// a slow page degrades to partial or empty data, never to an error.

use std::thread;
use std::time::Instant;

use crate::config::consts::EMPTY_TABLE_MIN_HEADERS;
use crate::config::options::SyncOptions;
use crate::core::TableProbe;
use crate::render::Renderer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableState {
    /// Header plus at least one data row.
    Ready,
    /// Fully drawn header, no data: the page has nothing to show.
    Empty,
    /// Timed out while the table was still missing or skeletal.
    NotReady,
}

/// Rendered page as captured after the readiness poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub state: TableState,
    pub html: Option<String>,
}

/// Ready/Empty verdict for one probe, None to keep polling.
pub fn classify(p: &TableProbe) -> Option<TableState> {
    if p.rows > 1 && p.data_cells > 0 {
        Some(TableState::Ready)
    } else if p.header_cells > EMPTY_TABLE_MIN_HEADERS {
        Some(TableState::Empty)
    } else {
        None
    }
}

/// Poll `renderer` until its first table is ready or provably empty,
/// or until `opts.timeout` elapses.
pub fn await_table<R: Renderer + ?Sized>(renderer: &mut R, opts: &SyncOptions) -> TableState {
    let start = Instant::now();
    let mut probes = 0u32;

    while start.elapsed() < opts.timeout {
        probes += 1;
        match renderer.probe_table(opts.probe_wait) {
            Ok(Some(p)) => {
                if let Some(state) = classify(&p) {
                    logd!("Sync: {state:?} after {probes} probe(s) {p:?}");
                    return state;
                }
            }
            Ok(None) => {}
            Err(e) => logd!("Sync: probe error (ignored): {e}"),
        }
        thread::sleep(opts.step);
    }

    logw!("Sync: table not ready after {:.1}s ({probes} probes)", opts.timeout.as_secs_f64());
    TableState::NotReady
}

/// Readiness poll followed by a markup grab. A failed grab yields `html: None`.
pub fn capture<R: Renderer + ?Sized>(renderer: &mut R, opts: &SyncOptions) -> Snapshot {
    let state = await_table(renderer, opts);
    let html = match renderer.page_source() {
        Ok(h) => h,
        Err(e) => {
            loge!("Sync: page source unavailable: {e}");
            None
        }
    };
    Snapshot { state, html }
}
