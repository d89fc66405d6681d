// src/render/boot.rs
//
// Waiting for the render resource (a debuggable browser) to come up.
// Starting it is someone else's job; we only poll until it answers.

use std::net::{TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};

use crate::cancel::CancelToken;
use crate::config::options::BootOptions;
use crate::progress::Progress;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
/// Progress line every this many steps.
const LOG_EVERY: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BootOutcome {
    Ready(Duration),
    Cancelled,
    TimedOut,
}

/// True when something accepts TCP connections at `addr` (`host:port`).
pub fn port_open(addr: &str) -> bool {
    let Ok(mut addrs) = addr.to_socket_addrs() else {
        return false;
    };
    addrs.any(|a| TcpStream::connect_timeout(&a, CONNECT_TIMEOUT).is_ok())
}

/// Poll `probe` every `opts.step` until it succeeds, `opts.timeout` elapses,
/// or `cancel` is raised. An already-running resource is Ready immediately.
pub fn await_ready(
    mut probe: impl FnMut() -> bool,
    cancel: &CancelToken,
    opts: BootOptions,
    mut progress: Option<&mut dyn Progress>,
) -> BootOutcome {
    let start = Instant::now();
    if probe() {
        return BootOutcome::Ready(Duration::ZERO);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Waiting for browser (max {:.0}s)...", opts.timeout.as_secs_f64()));
    }

    let mut i = 0u32;
    while start.elapsed() < opts.timeout {
        if cancel.is_cancelled() {
            logf!("Boot: cancelled after {:.1}s", start.elapsed().as_secs_f64());
            return BootOutcome::Cancelled;
        }
        thread::sleep(opts.step);
        if probe() {
            let took = start.elapsed();
            logf!("Boot: ready after {:.1}s", took.as_secs_f64());
            return BootOutcome::Ready(took);
        }
        i += 1;
        if i % LOG_EVERY == 0 {
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!(
                    "Waiting... ({:.0}/{:.0}s)",
                    start.elapsed().as_secs_f64(),
                    opts.timeout.as_secs_f64()
                ));
            }
        }
    }

    logw!("Boot: not ready after {:.1}s", opts.timeout.as_secs_f64());
    BootOutcome::TimedOut
}
