//! Terminal bingo runner (default binary).
//!
//! The default mode is the interactive TUI: crossterm input and the
//! framebuffer renderer around a `GameController`, advanced by wall-clock
//! time on a fixed tick. `headless` runs one auto-marked round on the async
//! driver and prints every event as a JSON line.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tui_bingo::core::{Credits, EngineConfig, GameController, GameEvent, RoundSnapshot};
use tui_bingo::driver::{is_final, Driver, DriverCommand, DriverConfig, DriverOutput};
use tui_bingo::input::{handle_key_event, handle_seed_key, should_quit, SeedKey, UiAction};
use tui_bingo::mock::{MockStats, StatsProvider};
use tui_bingo::term::{
    CardOverlay, CardView, FrameBuffer, LeaderboardEntry, PickerView, PlayerExtras, SeedInput, TerminalRenderer,
    Viewport,
};
use tui_bingo::types::{CellPos, PlayerAction, RoundPhase, CARD_SIZE, TICK_MS};

#[derive(Parser)]
#[command(name = "tui-bingo")]
#[command(about = "Single-player bingo in the terminal")]
#[command(version)]
struct Cli {
    /// Countdown before the first call, in seconds
    #[arg(long, global = true)]
    countdown: Option<u32>,

    /// Write logs to this file (TUI mode logs nothing otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one auto-marked round and print events as JSON lines
    Headless {
        /// Room number (card seed)
        #[arg(long)]
        seed: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = EngineConfig::from_env();
    if let Some(secs) = cli.countdown {
        config.countdown_secs = secs;
    }

    match cli.command {
        Some(Commands::Headless { seed }) => {
            init_logging(cli.log_file.as_deref(), true)?;
            run_headless(config, seed)
        }
        None => {
            init_logging(cli.log_file.as_deref(), false)?;
            run_tui(config)
        }
    }
}

fn init_logging(log_file: Option<&std::path::Path>, stderr_fallback: bool) -> Result<()> {
    let filter = || EnvFilter::try_from_env("BINGO_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None if stderr_fallback => {
            tracing_subscriber::registry()
                .with(filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        // The alternate screen owns stdout and stderr.
        None => {}
    }
    Ok(())
}

fn run_headless(config: EngineConfig, seed: i64) -> Result<()> {
    let mut controller = GameController::new(config);
    controller.set_auto_mark(true);
    // Only the round's own events go out.
    controller.drain_events().for_each(drop);

    let mut driver = Driver::start(controller, DriverConfig::from_env())?;
    anyhow::ensure!(
        driver.send(DriverCommand::StartRound { seed }),
        "driver rejected the start command"
    );

    let mut failed = None;
    while let Some(out) = driver.recv_blocking() {
        println!("{}", serde_json::to_string(&out)?);
        match &out {
            DriverOutput::Event { event } if is_final(event) => break,
            DriverOutput::Rejected { error, .. } => {
                failed = Some(error.to_string());
                break;
            }
            DriverOutput::Stopped => break,
            DriverOutput::Event { .. } => {}
        }
    }

    let controller = driver.shutdown()?;
    let stats = controller.ledger().stats();
    tracing::info!(balance = %stats.balance, won = stats.games_won, "headless round finished");

    match failed {
        Some(error) => anyhow::bail!(error),
        None => Ok(()),
    }
}

fn run_tui(config: EngineConfig) -> Result<()> {
    let mut mock = MockStats::new();
    let ledger = mock.ledger();
    let extras = mock.extras();
    let leaderboard = mock.leaderboard();
    let mut controller = GameController::new(config).with_ledger(ledger);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut controller, extras, &leaderboard);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

enum Screen {
    Picker,
    Card,
}

/// Status line with an expiry
struct Toast {
    text: String,
    until: Instant,
}

impl Toast {
    const TTL: Duration = Duration::from_millis(2500);

    fn show(slot: &mut Option<Toast>, text: impl Into<String>) {
        *slot = Some(Toast {
            text: text.into(),
            until: Instant::now() + Self::TTL,
        });
    }
}

/// Fixed wallet top-up on the picker
const DEPOSIT: Credits = Credits::units(100);

fn run(
    term: &mut TerminalRenderer,
    controller: &mut GameController,
    extras: PlayerExtras,
    leaderboard: &[LeaderboardEntry],
) -> Result<()> {
    let card_view = CardView::default();
    let mut screen = Screen::Picker;
    let mut seed_input = SeedInput::with_range(controller.config().seed_range.clone());
    let mut picker_message: Option<String> = None;
    let mut cursor = (0u8, 0u8);
    let mut toast: Option<Toast> = None;

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = RoundSnapshot::default();
    let mut last_size = (0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != last_size {
            term.invalidate();
            last_size = (w, h);
        }
        let viewport = Viewport::new(w, h);
        match screen {
            Screen::Picker => {
                let view = PickerView {
                    input: &seed_input,
                    message: picker_message.as_deref(),
                    ledger: controller.ledger(),
                    extras: Some(extras),
                    leaderboard,
                };
                view.render_into(viewport, &mut fb);
            }
            Screen::Card => {
                controller.snapshot_into(&mut snap);
                let overlay = CardOverlay {
                    cursor: CellPos::at(cursor.0, cursor.1),
                    message: toast.as_ref().map(|t| t.text.as_str()),
                };
                card_view.render_into(&snap, &overlay, viewport, &mut fb);
            }
        }
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    return Ok(());
                }

                match screen {
                    Screen::Picker => match handle_seed_key(key) {
                        Some(SeedKey::Digit(d)) => seed_input.push_digit(d),
                        Some(SeedKey::Backspace) => seed_input.backspace(),
                        Some(SeedKey::Confirm) => match seed_input.seed() {
                            Some(seed) => match controller.start_round(seed) {
                                Ok(_) => {
                                    picker_message = None;
                                    seed_input.clear();
                                    cursor = (0, 0);
                                    screen = Screen::Card;
                                }
                                Err(e) => picker_message = Some(e.to_string()),
                            },
                            None => picker_message = Some(seed_input.hint()),
                        },
                        Some(SeedKey::Deposit) => {
                            controller.ledger_mut().deposit(DEPOSIT);
                            picker_message = None;
                        }
                        None => {}
                    },
                    Screen::Card => match handle_key_event(key) {
                        Some(UiAction::Cursor(m)) => cursor = m.apply(cursor, CARD_SIZE as u8),
                        Some(UiAction::Mark) => {
                            if let Err(e) = controller.mark(cursor.0, cursor.1) {
                                Toast::show(&mut toast, e.to_string());
                            }
                        }
                        Some(UiAction::Player(action)) => match action {
                            PlayerAction::ToggleAutoMark => {
                                controller.toggle_auto_mark();
                            }
                            PlayerAction::Claim => {
                                // ClaimRejected / Won produce the toast.
                                let _ = controller.claim();
                            }
                            PlayerAction::PlayAgain => {
                                if let Err(e) = controller.play_again() {
                                    Toast::show(&mut toast, e.to_string());
                                }
                                cursor = (0, 0);
                            }
                            PlayerAction::Leave => {
                                if let Some(handle) = controller.current_handle() {
                                    let _ = controller.cancel_round(handle);
                                }
                                toast = None;
                                screen = Screen::Picker;
                            }
                        },
                        None => {}
                    },
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed = last_tick.elapsed();
            last_tick = Instant::now();
            controller.advance(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));

            for event in controller.drain_events() {
                if let Some(text) = toast_text(&event) {
                    Toast::show(&mut toast, text);
                }
            }
            if toast.as_ref().is_some_and(|t| Instant::now() >= t.until) {
                toast = None;
            }
        }

        if matches!(screen, Screen::Card) && controller.phase() == RoundPhase::Idle {
            screen = Screen::Picker;
        }
    }
}

fn toast_text(event: &GameEvent) -> Option<String> {
    match *event {
        GameEvent::NumberCalled { number, letter } => Some(format!("{}-{} called!", letter.as_char(), number)),
        GameEvent::AutoMarkChanged { enabled } => Some(
            if enabled {
                "Auto-mark enabled!"
            } else {
                "Auto-mark disabled"
            }
            .to_string(),
        ),
        GameEvent::Won { reward, .. } => Some(format!("BINGO! You won {reward} credits!")),
        GameEvent::ClaimRejected => Some("No valid Bingo pattern found!".to_string()),
        GameEvent::CallsExhausted => Some("All numbers have been called".to_string()),
        GameEvent::RoundActive { .. } => Some("Game started! Good luck!".to_string()),
        _ => None,
    }
}
