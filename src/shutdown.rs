//! OS signal handling
//!
//! SIGQUIT, SIGTERM and SIGINT stop the process. SIGHUP is received and
//! logged but otherwise ignored (there is nothing to reload).

use futures::{Stream, StreamExt};
use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::info;

pub const HANDLED_SIGNALS: [i32; 4] = [SIGHUP, SIGQUIT, SIGTERM, SIGINT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    Shutdown,
    Ignore,
}

pub fn classify_signal(signal: i32) -> SignalAction {
    match signal {
        SIGQUIT | SIGTERM | SIGINT => SignalAction::Shutdown,
        _ => SignalAction::Ignore,
    }
}

pub fn signal_name(signal: i32) -> &'static str {
    match signal {
        SIGHUP => "SIGHUP",
        SIGQUIT => "SIGQUIT",
        SIGTERM => "SIGTERM",
        SIGINT => "SIGINT",
        _ => "unknown",
    }
}

pub fn register_signals() -> std::io::Result<Signals> {
    Signals::new(HANDLED_SIGNALS)
}

/// Block until a terminating signal arrives; returns it.
/// `None` if the signal stream ends first.
pub async fn wait_for_shutdown<S>(signals: S) -> Option<i32>
where
    S: Stream<Item = i32>,
{
    let mut signals = std::pin::pin!(signals);
    while let Some(signal) = signals.next().await {
        info!("Received signal {} ({})", signal_name(signal), signal);
        match classify_signal(signal) {
            SignalAction::Shutdown => return Some(signal),
            SignalAction::Ignore => info!("Ignoring {}", signal_name(signal)),
        }
    }
    None
}
