//! Driver task: owns one controller and runs it in real time.
//!
//! A `tokio::time::interval` feeds elapsed time into the controller; commands
//! arrive over a bounded `mpsc` channel. Both are multiplexed with
//! `tokio::select!` on a single task, so the controller never sees concurrent
//! access.

use std::path::PathBuf;

use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::{BingoError, GameController, GameEvent};
use crate::protocol::{DriverCommand, DriverOutput, LogRecord};
use crate::types::TICK_MS;

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Clock resolution of the driver loop
    pub tick_ms: u32,
    /// Append every event as a JSON line here
    pub event_log_path: Option<PathBuf>,
    pub max_pending_commands: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            event_log_path: None,
            max_pending_commands: 64,
        }
    }
}

impl DriverConfig {
    pub fn from_env() -> Self {
        use std::env;

        let tick_ms = env::var("BINGO_TICK_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);

        let event_log_path = env::var("BINGO_EVENT_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            tick_ms,
            event_log_path,
            ..Self::default()
        }
    }
}

/// Apply one command to the controller
fn apply<R: Rng>(controller: &mut GameController<R>, command: DriverCommand) -> Result<(), BingoError> {
    match command {
        DriverCommand::StartRound { seed } => controller.start_round(seed).map(drop),
        DriverCommand::Mark { col, row } => controller.mark(col, row).map(drop),
        DriverCommand::SetAutoMark { enabled } => {
            controller.set_auto_mark(enabled);
            Ok(())
        }
        DriverCommand::Claim => controller.claim().map(drop),
        DriverCommand::Cancel { round } => {
            let handle = round
                .or_else(|| controller.current_handle())
                .ok_or(BingoError::RoundNotActive)?;
            controller.cancel_round(handle)
        }
        DriverCommand::PlayAgain => controller.play_again().map(drop),
        DriverCommand::Shutdown => Ok(()),
    }
}

/// Background writer for the JSON-lines event log
fn spawn_event_log(path: PathBuf) -> (mpsc::UnboundedSender<LogRecord>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<LogRecord>();
    let handle = tokio::spawn(async move {
        use tokio::fs::OpenOptions;
        use tokio::io::AsyncWriteExt;

        let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(f) => f,
            Err(err) => {
                warn!(path = %path.display(), %err, "event log unavailable");
                return;
            }
        };

        let mut buf: Vec<u8> = Vec::with_capacity(512);
        while let Some(rec) = rx.recv().await {
            buf.clear();
            if serde_json::to_writer(&mut buf, &rec).is_err() {
                continue;
            }
            buf.push(b'\n');
            if file.write_all(&buf).await.is_err() {
                break;
            }
        }

        let _ = file.flush().await;
    });
    (tx, handle)
}

/// Run `controller` until `Shutdown` or until either channel closes.
///
/// Returns the controller so callers can inspect the final state.
pub async fn run_driver<R: Rng>(
    mut controller: GameController<R>,
    config: DriverConfig,
    mut cmd_rx: mpsc::Receiver<DriverCommand>,
    out_tx: mpsc::UnboundedSender<DriverOutput>,
) -> anyhow::Result<GameController<R>> {
    let log = config.event_log_path.clone().map(spawn_event_log);
    let started = Instant::now();
    let mut seq: u64 = 0;

    let mut ticker = tokio::time::interval(Duration::from_millis(u64::from(config.tick_ms.max(1))));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    info!(tick_ms = config.tick_ms, log = ?config.event_log_path, "driver started");

    loop {
        let mut stop = false;
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let elapsed = now.duration_since(last).as_millis().min(u128::from(u32::MAX)) as u32;
                // Keep the sub-millisecond remainder for the next tick.
                last += Duration::from_millis(u64::from(elapsed));
                controller.advance(elapsed);
            }
            cmd = cmd_rx.recv() => match cmd {
                None | Some(DriverCommand::Shutdown) => stop = true,
                Some(command) => {
                    debug!(command = command.name(), "driver command");
                    if let Err(error) = apply(&mut controller, command) {
                        let _ = out_tx.send(DriverOutput::Rejected { command, error });
                    }
                }
            },
        }

        for event in controller.drain_events() {
            if let Some((tx, _)) = log.as_ref() {
                seq += 1;
                let _ = tx.send(LogRecord {
                    seq,
                    ts: started.elapsed().as_millis() as u64,
                    event,
                });
            }
            let _ = out_tx.send(DriverOutput::Event { event });
        }

        if stop || out_tx.is_closed() {
            break;
        }
    }

    let _ = out_tx.send(DriverOutput::Stopped);
    if let Some((tx, handle)) = log {
        drop(tx);
        let _ = handle.await;
    }
    info!("driver stopped");
    Ok(controller)
}

/// Events after which a headless run has nothing more to show
pub fn is_final(event: &GameEvent) -> bool {
    event.ends_round() || matches!(event, GameEvent::CallsExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_config_from_env() {
        std::env::set_var("BINGO_TICK_MS", "0");
        std::env::set_var("BINGO_EVENT_LOG", "  ");
        let config = DriverConfig::from_env();
        std::env::remove_var("BINGO_TICK_MS");
        std::env::remove_var("BINGO_EVENT_LOG");

        assert_eq!(config.tick_ms, TICK_MS);
        assert_eq!(config.event_log_path, None);
    }

    #[test]
    fn test_is_final() {
        assert!(is_final(&GameEvent::CallsExhausted));
        let round = GameController::new(crate::core::EngineConfig::default())
            .start_round(5)
            .unwrap();
        assert!(is_final(&GameEvent::RoundAbandoned { round }));
        assert!(!is_final(&GameEvent::ClaimRejected));
        assert!(!is_final(&GameEvent::ElapsedTick { seconds: 4 }));
    }
}
