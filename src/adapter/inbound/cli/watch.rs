//! Handler for the `watch` command.
//!
//! Redraws the position on a fixed cadence. Keyboard input is line based:
//! `r` + Enter refreshes immediately, `q` + Enter or Ctrl-C quits.

use std::future::Future;
use std::io::BufRead;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use super::command::WatchArgs;
use super::{output, view};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_provider;
use crate::infrastructure::config::{Config, DisplayConfig};
use crate::port::inbound::position::PositionFeed;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// What a line of keyboard input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Refresh,
    Quit,
}

fn parse_action(line: &str) -> Option<Action> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "r" | "refresh" => Some(Action::Refresh),
        "q" | "quit" | "exit" => Some(Action::Quit),
        _ => None,
    }
}

/// Forward stdin lines from a detached thread. The channel closes on EOF.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Keep the position on screen until the user quits.
///
/// # Errors
///
/// Returns an error only if the provider cannot be built. Fetch failures
/// are shown as warnings and the loop keeps going.
pub async fn execute(config: &Config, args: &WatchArgs) -> Result<()> {
    let provider = build_provider(&config.provider)?;
    let interval = Duration::from_secs(args.interval.max(1));
    run(&provider, &config.display, interval, args.cycles).await;
    Ok(())
}

/// Drive any feed on a timer until Ctrl-C. Returns the number of cycles drawn.
pub async fn run<F>(
    feed: &F,
    display: &DisplayConfig,
    interval: Duration,
    cycles: Option<u64>,
) -> u64
where
    F: PositionFeed + ?Sized,
{
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };
    run_until(feed, display, interval, cycles, ctrl_c).await
}

/// Drive any feed on a timer until `shutdown` resolves.
///
/// `shutdown` is created once for the whole loop and also races each fetch,
/// so a request in flight is abandoned as soon as it fires.
pub async fn run_until<F, S>(
    feed: &F,
    display: &DisplayConfig,
    interval: Duration,
    cycles: Option<u64>,
    shutdown: S,
) -> u64
where
    F: PositionFeed + ?Sized,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut input = spawn_stdin_reader();
    let mut input_open = true;
    let mut drawn = 0u64;

    loop {
        let forced = tokio::select! {
            () = &mut shutdown => break,
            _ = ticker.tick() => false,
            line = input.recv(), if input_open => match line.as_deref().map(parse_action) {
                Some(Some(Action::Refresh)) => {
                    ticker.reset();
                    true
                }
                Some(Some(Action::Quit)) => break,
                Some(None) => continue,
                None => {
                    debug!("stdin closed, keyboard refresh disabled");
                    input_open = false;
                    continue;
                }
            },
        };

        let request = async {
            if forced {
                feed.refresh_now().await
            } else {
                feed.get_position().await
            }
        };
        let outcome = tokio::select! {
            () = &mut shutdown => {
                debug!("Shutdown during fetch, request abandoned");
                break;
            }
            outcome = request => outcome,
        };

        redraw(interval, forced);
        match outcome {
            Ok(record) => view::render(&record, display),
            Err(outcome) => view::render_unavailable(&outcome),
        }

        drawn += 1;
        if cycles.is_some_and(|max| drawn >= max) {
            break;
        }
    }

    drawn
}

fn redraw(interval: Duration, forced: bool) {
    if output::is_json() || output::is_quiet() {
        return;
    }
    if output::stdout_is_terminal() {
        print!("{CLEAR_SCREEN}");
    }
    output::header(env!("CARGO_PKG_VERSION"));
    let reason = if forced { "manual refresh" } else { "scheduled" };
    output::note(&format!(
        "{reason}; next update in {}s",
        interval.as_secs()
    ));
    output::hint("r + Enter to refresh now, q + Enter or Ctrl-C to quit");
}
