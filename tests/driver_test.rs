use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tui_bingo::core::{BingoError, EngineConfig, FixedReward, GameController, GameEvent};
use tui_bingo::driver::{is_final, run_driver, DriverCommand, DriverConfig, DriverOutput};
use tui_bingo::types::RoundPhase;

type Spawned = (
    mpsc::Sender<DriverCommand>,
    mpsc::UnboundedReceiver<DriverOutput>,
    JoinHandle<anyhow::Result<GameController<StdRng>>>,
);

fn controller(countdown_secs: u32) -> GameController<StdRng> {
    let config = EngineConfig {
        countdown_secs,
        ..EngineConfig::default()
    };
    GameController::with_rng(config, StdRng::seed_from_u64(11)).with_reward_policy(FixedReward(250))
}

fn spawn(controller: GameController<StdRng>, config: DriverConfig) -> Spawned {
    let (cmd_tx, cmd_rx) = mpsc::channel::<DriverCommand>(64);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<DriverOutput>();
    let handle = tokio::spawn(run_driver(controller, config, cmd_rx, out_tx));
    (cmd_tx, out_rx, handle)
}

fn driver_config() -> DriverConfig {
    DriverConfig {
        tick_ms: 100,
        ..DriverConfig::default()
    }
}

async fn recv_event_until(
    out_rx: &mut mpsc::UnboundedReceiver<DriverOutput>,
    mut done: impl FnMut(&GameEvent) -> bool,
) -> Vec<GameEvent> {
    let mut seen = Vec::new();
    while let Some(out) = out_rx.recv().await {
        if let DriverOutput::Event { event } = out {
            seen.push(event);
            if done(&event) {
                break;
            }
        }
    }
    seen
}

#[tokio::test(start_paused = true)]
async fn cancel_with_pending_call_never_calls_a_number() {
    let (cmd_tx, mut out_rx, handle) = spawn(controller(0), driver_config());

    cmd_tx.send(DriverCommand::StartRound { seed: 9 }).await.unwrap();
    recv_event_until(&mut out_rx, |e| matches!(e, GameEvent::RoundActive { .. })).await;

    // First call is due at 2000 ms.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    cmd_tx.send(DriverCommand::Cancel { round: None }).await.unwrap();
    let events = recv_event_until(&mut out_rx, |e| matches!(e, GameEvent::RoundAbandoned { .. })).await;
    assert!(!events.iter().any(|e| matches!(e, GameEvent::NumberCalled { .. })));

    tokio::time::sleep(Duration::from_secs(60)).await;
    cmd_tx.send(DriverCommand::Shutdown).await.unwrap();

    let mut rest = Vec::new();
    while let Some(out) = out_rx.recv().await {
        rest.push(out);
    }
    assert!(rest.iter().all(|o| !matches!(o.event(), Some(GameEvent::NumberCalled { .. }))));
    assert!(matches!(rest.last(), Some(DriverOutput::Stopped)));

    let controller = handle.await.unwrap().unwrap();
    assert_eq!(controller.phase(), RoundPhase::Abandoned);
    assert!(controller.round().unwrap().called().is_empty());
}

#[tokio::test(start_paused = true)]
async fn auto_marked_round_runs_to_a_win() {
    let mut c = controller(3);
    c.set_auto_mark(true);
    let (cmd_tx, mut out_rx, handle) = spawn(c, driver_config());

    cmd_tx.send(DriverCommand::StartRound { seed: 42 }).await.unwrap();
    let events = recv_event_until(&mut out_rx, is_final).await;

    let ticks: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::CountdownTick { seconds_left } => Some(*seconds_left),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![2, 1, 0]);

    match events.last() {
        Some(GameEvent::Won { reward, cells, .. }) => {
            assert_eq!(*reward, 250);
            assert_eq!(cells.len(), 5);
        }
        other => panic!("expected a win, got {other:?}"),
    }

    drop(cmd_tx);
    let controller = handle.await.unwrap().unwrap();
    assert_eq!(controller.phase(), RoundPhase::Won);
    assert_eq!(controller.ledger().stats().games_won, 1);
}

#[tokio::test(start_paused = true)]
async fn rejected_commands_are_reported() {
    let (cmd_tx, mut out_rx, handle) = spawn(controller(0), driver_config());

    cmd_tx.send(DriverCommand::Claim).await.unwrap();
    cmd_tx.send(DriverCommand::StartRound { seed: 500 }).await.unwrap();
    cmd_tx.send(DriverCommand::Shutdown).await.unwrap();

    let mut rejected = Vec::new();
    while let Some(out) = out_rx.recv().await {
        if let DriverOutput::Rejected { command, error } = &out {
            let json = serde_json::to_value(&out).unwrap();
            assert_eq!(json["type"], "rejected");
            assert!(json["error"].is_string());
            rejected.push((*command, error.clone()));
        }
    }

    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[0], (DriverCommand::Claim, BingoError::RoundNotActive));
    assert!(matches!(rejected[1].1, BingoError::InvalidSeed { seed: 500, .. }));
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn event_log_writes_json_lines() {
    let path = std::env::temp_dir().join(format!("tui-bingo-events-{}.jsonl", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let config = DriverConfig {
        tick_ms: 10,
        event_log_path: Some(path.clone()),
        ..DriverConfig::default()
    };
    let (cmd_tx, mut out_rx, handle) = spawn(controller(0), config);
    cmd_tx.send(DriverCommand::StartRound { seed: 42 }).await.unwrap();
    recv_event_until(&mut out_rx, |e| matches!(e, GameEvent::RoundActive { .. })).await;
    cmd_tx.send(DriverCommand::Shutdown).await.unwrap();
    handle.await.unwrap().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert!(records.len() >= 2);
    assert_eq!(records[0]["seq"], 1);
    assert_eq!(records[0]["event"]["type"], "round_started");
    assert_eq!(records[0]["event"]["seed"], 42);
    assert_eq!(records[1]["event"]["type"], "round_active");

    let _ = std::fs::remove_file(&path);
}
