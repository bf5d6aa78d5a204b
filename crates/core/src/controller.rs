//! Game controller - the round lifecycle
//!
//! ```text
//! Idle --start_round--> CountingDown --countdown expires--> Active --win--> Won
//!                            |                                 |
//!                            +-----------cancel_round----------+--> Abandoned
//! ```
//!
//! The controller is an owned value with no clock of its own. Hosts call
//! [`GameController::advance`] with elapsed milliseconds; player input goes
//! through [`mark`](GameController::mark), [`claim`](GameController::claim)
//! and friends. Everything observable comes out as [`GameEvent`]s via
//! [`drain_events`](GameController::drain_events) or as a [`RoundSnapshot`].

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::called::CalledSequence;
use crate::card::Card;
use crate::config::EngineConfig;
use crate::error::{BingoError, Result};
use crate::event::GameEvent;
use crate::ledger::Ledger;
use crate::marks::{MarkOutcome, MarkState, MarkTracker, MarkedSet};
use crate::patterns::{check_win, PatternKind, WinPattern};
use crate::reward::{RewardPolicy, UniformReward};
use crate::scheduler::CallScheduler;
use crate::snapshot::RoundSnapshot;
use crate::timer::{TimerHandle, TimerKind, Timers};
use crate::types::{BingoLetter, CellPos, RoundPhase, CARD_SIZE, SEED_MAX, SEED_MIN, SECOND_MS};

/// Opaque id of one round. Superseded rounds keep their handle, which then
/// no longer matches the controller's current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoundHandle(u32);

impl RoundHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RoundHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a round was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinInfo {
    pub pattern: PatternKind,
    pub cells: [CellPos; CARD_SIZE],
    pub reward: u32,
    /// Balls called when the win was detected
    pub calls: usize,
}

/// State of the current (or last) round
#[derive(Debug, Clone)]
pub struct GameRound {
    handle: RoundHandle,
    seed: i64,
    card: Card,
    called: CalledSequence,
    marks: MarkTracker,
    phase: RoundPhase,
    countdown_left: u32,
    elapsed_secs: u32,
    win: Option<WinInfo>,
    exhausted: bool,
}

impl GameRound {
    fn new(handle: RoundHandle, seed: i64, countdown_secs: u32) -> Self {
        Self {
            handle,
            seed,
            card: Card::generate(seed),
            called: CalledSequence::new(),
            marks: MarkTracker::new(),
            phase: RoundPhase::CountingDown,
            countdown_left: countdown_secs,
            elapsed_secs: 0,
            win: None,
            exhausted: false,
        }
    }

    pub fn handle(&self) -> RoundHandle {
        self.handle
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn called(&self) -> &CalledSequence {
        &self.called
    }

    pub fn marked(&self) -> &MarkedSet {
        self.marks.marked()
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn countdown_left(&self) -> u32 {
        self.countdown_left
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn win(&self) -> Option<&WinInfo> {
        self.win.as_ref()
    }

    /// All 75 balls have been called
    pub fn calls_exhausted(&self) -> bool {
        self.exhausted
    }
}

pub struct GameController<R = StdRng> {
    config: EngineConfig,
    round: Option<GameRound>,
    next_round_id: u32,
    last_seed: Option<i64>,
    scheduler: CallScheduler<R>,
    timers: Timers,
    reward: Box<dyn RewardPolicy + Send>,
    ledger: Ledger,
    auto_mark: bool,
    events: Vec<GameEvent>,
}

impl GameController<StdRng> {
    pub fn new(config: EngineConfig) -> Self {
        let scheduler = CallScheduler::new(&config);
        Self::with_scheduler(config, scheduler)
    }
}

impl Default for GameController<StdRng> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<R: Rng> GameController<R> {
    /// Controller whose call order comes from `rng`
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        let scheduler = CallScheduler::with_rng(&config, rng);
        Self::with_scheduler(config, scheduler)
    }

    fn with_scheduler(config: EngineConfig, scheduler: CallScheduler<R>) -> Self {
        let reward = Box::new(UniformReward::new(&config));
        Self {
            config,
            round: None,
            next_round_id: 0,
            last_seed: None,
            scheduler,
            timers: Timers::new(),
            reward,
            ledger: Ledger::new(),
            auto_mark: false,
            events: Vec::with_capacity(32),
        }
    }

    pub fn with_reward_policy(mut self, policy: impl RewardPolicy + Send + 'static) -> Self {
        self.reward = Box::new(policy);
        self
    }

    pub fn with_ledger(mut self, ledger: Ledger) -> Self {
        self.ledger = ledger;
        self
    }

    // Accessors

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn round(&self) -> Option<&GameRound> {
        self.round.as_ref()
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.as_ref().map_or(RoundPhase::Idle, |r| r.phase)
    }

    pub fn current_handle(&self) -> Option<RoundHandle> {
        self.round.as_ref().map(|r| r.handle)
    }

    pub fn last_seed(&self) -> Option<i64> {
        self.last_seed
    }

    pub fn auto_mark(&self) -> bool {
        self.auto_mark
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Milliseconds until the next ball, while one is scheduled
    pub fn next_call_in(&self) -> Option<u32> {
        self.timers.remaining(TimerKind::Call)
    }

    // Lifecycle

    /// Begin a new round on the card for `seed`.
    ///
    /// Any unfinished previous round is abandoned first; none of its timers
    /// can fire afterwards.
    pub fn start_round(&mut self, seed: i64) -> Result<RoundHandle> {
        if !self.config.accepts_seed(seed) {
            let (min, max) = self
                .config
                .seed_range
                .as_ref()
                .map_or((SEED_MIN, SEED_MAX), |r| (*r.start(), *r.end()));
            return Err(BingoError::InvalidSeed { seed, min, max });
        }

        self.abandon_current();
        self.timers.cancel_all();
        self.scheduler.reset();

        self.next_round_id = self.next_round_id.wrapping_add(1);
        let handle = RoundHandle(self.next_round_id);
        self.round = Some(GameRound::new(handle, seed, self.config.countdown_secs));
        self.last_seed = Some(seed);

        info!(round = %handle, seed, countdown = self.config.countdown_secs, "round started");
        self.events.push(GameEvent::RoundStarted { round: handle, seed });

        if self.config.countdown_secs == 0 {
            self.go_active();
        } else {
            self.timers.arm(TimerKind::Countdown, SECOND_MS);
        }
        Ok(handle)
    }

    /// Stop the round `handle` refers to.
    ///
    /// A terminal round is left as is. A handle for a superseded round is
    /// rejected without touching the current one.
    pub fn cancel_round(&mut self, handle: RoundHandle) -> Result<()> {
        match &self.round {
            Some(round) if round.handle == handle => {}
            _ => return Err(BingoError::StaleRound(handle)),
        }
        self.abandon_current();
        Ok(())
    }

    /// Start over on the last seed: same card, fresh calls and marks
    pub fn play_again(&mut self) -> Result<RoundHandle> {
        let seed = self.last_seed.ok_or(BingoError::NoPreviousRound)?;
        self.start_round(seed)
    }

    /// Drop the current round without recording anything and go Idle
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.scheduler.reset();
        self.round = None;
        self.events.clear();
        debug!("controller reset");
    }

    // Player input

    /// Toggle the mark on `(col, row)`. A completed pattern wins immediately.
    pub fn mark(&mut self, col: u8, row: u8) -> Result<MarkOutcome> {
        let round = match self.round.as_mut() {
            Some(r) if r.phase == RoundPhase::Active => r,
            _ => return Err(BingoError::RoundNotActive),
        };

        let outcome = round.marks.toggle(&round.card, &round.called, col, row)?;
        debug!(col, row, value = %outcome.value, state = ?outcome.state, "mark");

        if outcome.value.is_free() {
            return Ok(outcome);
        }
        self.events.push(GameEvent::MarkChanged {
            col,
            row,
            state: outcome.state,
        });

        if outcome.state.is_marked() {
            self.check_and_finish();
        }
        Ok(outcome)
    }

    pub fn set_auto_mark(&mut self, enabled: bool) {
        if self.auto_mark == enabled {
            return;
        }
        self.auto_mark = enabled;
        debug!(enabled, "auto-mark");
        self.events.push(GameEvent::AutoMarkChanged { enabled });
    }

    /// Flip auto-mark, returning the new setting
    pub fn toggle_auto_mark(&mut self) -> bool {
        self.set_auto_mark(!self.auto_mark);
        self.auto_mark
    }

    /// Claim bingo on the current marks.
    ///
    /// On a round that already won, returns the recorded win.
    pub fn claim(&mut self) -> Result<WinInfo> {
        let round = self.round.as_ref().ok_or(BingoError::RoundNotActive)?;
        match round.phase {
            RoundPhase::Won => return round.win.ok_or(BingoError::RoundNotActive),
            RoundPhase::Active => {}
            _ => return Err(BingoError::RoundNotActive),
        }

        match check_win(round.marks.marked()) {
            Some(pattern) => Ok(self.finish_win(pattern)),
            None => {
                warn!(round = %round.handle, marked = round.marks.marked().len(), "claim rejected");
                self.events.push(GameEvent::ClaimRejected);
                Err(BingoError::NoPattern)
            }
        }
    }

    // Clock

    /// Let `elapsed_ms` pass, firing every due timer in due order.
    pub fn advance(&mut self, elapsed_ms: u32) {
        let mut left = elapsed_ms;
        loop {
            match self.timers.next_due_in() {
                Some(due) if due <= left => {
                    self.timers.advance(due);
                    left -= due;
                    while let Some(handle) = self.timers.pop_due() {
                        self.on_timer(handle);
                    }
                }
                _ => {
                    self.timers.advance(left);
                    break;
                }
            }
        }
    }

    /// Take every event produced since the last drain, oldest first
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut snap = RoundSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill `out` in place, reusing its storage
    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.clear();
        out.countdown_total = self.config.countdown_secs;
        out.auto_mark = self.auto_mark;
        out.next_call_ms = self.next_call_in();
        out.ledger = self.ledger.stats();

        let Some(round) = self.round.as_ref() else {
            return;
        };
        out.round = Some(round.handle);
        out.phase = round.phase;
        out.seed = Some(round.seed);
        out.card = Some(round.card);
        out.called.clone_from(&round.called);
        out.marked = *round.marks.marked();
        out.countdown_left = round.countdown_left;
        out.elapsed_secs = round.elapsed_secs;
        out.win = round.win;
        out.calls_exhausted = round.exhausted;
    }

    // Internals

    fn on_timer(&mut self, handle: TimerHandle) {
        match handle.kind() {
            TimerKind::Countdown => self.on_countdown(),
            TimerKind::Call => self.on_call(),
            TimerKind::Elapsed => self.on_elapsed(),
        }
    }

    fn on_countdown(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.phase != RoundPhase::CountingDown {
            return;
        }
        round.countdown_left = round.countdown_left.saturating_sub(1);
        let seconds_left = round.countdown_left;
        self.events.push(GameEvent::CountdownTick { seconds_left });

        if seconds_left == 0 {
            self.go_active();
        } else {
            self.timers.arm(TimerKind::Countdown, SECOND_MS);
        }
    }

    fn go_active(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.phase = RoundPhase::Active;
        round.countdown_left = 0;
        let handle = round.handle;

        let first_delay = self.scheduler.start();
        self.timers.arm(TimerKind::Call, first_delay);
        self.timers.arm(TimerKind::Elapsed, SECOND_MS);

        info!(round = %handle, first_call_ms = first_delay, "round active");
        self.events.push(GameEvent::RoundActive { round: handle });
    }

    fn on_call(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.phase != RoundPhase::Active {
            return;
        }
        let Some(emission) = self.scheduler.emit() else {
            return;
        };
        let number = emission.number;

        if let Err(err) = round.called.push(number) {
            warn!(number, %err, "scheduler produced an unusable ball");
            return;
        }
        let Some(letter) = BingoLetter::from_number(number) else {
            return;
        };
        debug!(number, letter = %letter.as_char(), calls = round.called.len(), "number called");
        self.events.push(GameEvent::NumberCalled { number, letter });

        if self.auto_mark {
            if let Some(pos) = round.marks.auto_mark(&round.card, &round.called, number) {
                self.events.push(GameEvent::MarkChanged {
                    col: pos.col,
                    row: pos.row,
                    state: MarkState::Marked,
                });
                if self.check_and_finish() {
                    return;
                }
            }
        }

        match emission.next_delay_ms {
            Some(delay) => {
                self.timers.arm(TimerKind::Call, delay);
            }
            None => {
                if let Some(round) = self.round.as_mut() {
                    round.exhausted = true;
                    info!(round = %round.handle, "all balls called");
                }
                self.events.push(GameEvent::CallsExhausted);
            }
        }
    }

    fn on_elapsed(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.phase != RoundPhase::Active {
            return;
        }
        round.elapsed_secs += 1;
        let seconds = round.elapsed_secs;
        self.events.push(GameEvent::ElapsedTick { seconds });
        self.timers.arm(TimerKind::Elapsed, SECOND_MS);
    }

    /// Run win detection on the current marks; true if the round was won.
    fn check_and_finish(&mut self) -> bool {
        let pattern = match self.round.as_ref() {
            Some(round) if round.phase == RoundPhase::Active => check_win(round.marks.marked()),
            _ => None,
        };
        match pattern {
            Some(pattern) => {
                self.finish_win(pattern);
                true
            }
            None => false,
        }
    }

    fn finish_win(&mut self, pattern: &'static WinPattern) -> WinInfo {
        self.timers.cancel_all();
        self.scheduler.cancel();

        let Some(round) = self.round.as_mut() else {
            // Only reachable from Active, which implies a round.
            return WinInfo {
                pattern: pattern.kind,
                cells: pattern.cells,
                reward: 0,
                calls: 0,
            };
        };

        let calls = round.called.len();
        let reward = self.reward.reward(pattern, calls);
        self.ledger.record_win(round.seed, reward);

        let info = WinInfo {
            pattern: pattern.kind,
            cells: pattern.cells,
            reward,
            calls,
        };
        round.phase = RoundPhase::Won;
        round.win = Some(info);

        info!(round = %round.handle, pattern = %pattern.kind, calls, reward, "bingo");
        self.events.push(GameEvent::Won {
            pattern: pattern.kind,
            cells: pattern.cells,
            reward,
        });
        info
    }

    /// Abandon the current round if it is still running
    fn abandon_current(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.phase.is_terminal() {
            return;
        }

        self.timers.cancel_all();
        self.scheduler.cancel();
        debug!(generation = self.timers.generation(), "round timers cancelled");

        if round.phase == RoundPhase::Active {
            self.ledger.record_loss();
        }
        round.phase = RoundPhase::Abandoned;

        info!(round = %round.handle, calls = round.called.len(), "round abandoned");
        self.events.push(GameEvent::RoundAbandoned {
            round: round.handle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::FixedReward;
    use rand::SeedableRng;

    fn controller(countdown_secs: u32) -> GameController<StdRng> {
        let config = EngineConfig {
            countdown_secs,
            ..EngineConfig::default()
        };
        GameController::with_rng(config, StdRng::seed_from_u64(7))
    }

    fn drain(c: &mut GameController<StdRng>) -> Vec<GameEvent> {
        c.drain_events().collect()
    }

    fn called_numbers(events: &[GameEvent]) -> Vec<u8> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::NumberCalled { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_controller_is_idle() {
        let c = controller(30);
        assert_eq!(c.phase(), RoundPhase::Idle);
        assert!(c.round().is_none());
        assert!(!c.auto_mark());
    }

    #[test]
    fn test_countdown_sequence() {
        let mut c = controller(3);
        let h = c.start_round(42).unwrap();
        assert_eq!(drain(&mut c), vec![GameEvent::RoundStarted { round: h, seed: 42 }]);
        assert_eq!(c.phase(), RoundPhase::CountingDown);
        assert_eq!(c.round().unwrap().countdown_left(), 3);

        c.advance(999);
        assert!(drain(&mut c).is_empty());
        c.advance(1);
        assert_eq!(drain(&mut c), vec![GameEvent::CountdownTick { seconds_left: 2 }]);

        c.advance(2000);
        assert_eq!(
            drain(&mut c),
            vec![
                GameEvent::CountdownTick { seconds_left: 1 },
                GameEvent::CountdownTick { seconds_left: 0 },
                GameEvent::RoundActive { round: h },
            ]
        );
        assert_eq!(c.phase(), RoundPhase::Active);
        assert_eq!(c.next_call_in(), Some(2000));
    }

    #[test]
    fn test_zero_countdown_goes_active_immediately() {
        let mut c = controller(0);
        let h = c.start_round(1).unwrap();
        assert_eq!(
            drain(&mut c),
            vec![
                GameEvent::RoundStarted { round: h, seed: 1 },
                GameEvent::RoundActive { round: h },
            ]
        );
    }

    #[test]
    fn test_one_large_advance_fires_in_order() {
        let mut c = controller(30);
        c.start_round(5).unwrap();
        drain(&mut c);

        c.advance(32_000);
        let events = drain(&mut c);
        let ticks = events
            .iter()
            .filter(|e| matches!(e, GameEvent::CountdownTick { .. }))
            .count();
        assert_eq!(ticks, 30);

        let active = events
            .iter()
            .position(|e| matches!(e, GameEvent::RoundActive { .. }))
            .unwrap();
        let first_call = events
            .iter()
            .position(|e| matches!(e, GameEvent::NumberCalled { .. }))
            .unwrap();
        assert!(active < first_call);
        assert_eq!(called_numbers(&events).len(), 1);
        // Elapsed ticks at +1s and +2s; the call wins the tie at +2s.
        assert_eq!(events.last(), Some(&GameEvent::ElapsedTick { seconds: 2 }));
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let mut c = controller(30);
        assert_eq!(
            c.start_round(0),
            Err(BingoError::InvalidSeed {
                seed: 0,
                min: 1,
                max: 200
            })
        );
        assert_eq!(c.start_round(201).unwrap_err(), BingoError::InvalidSeed { seed: 201, min: 1, max: 200 });
        assert_eq!(c.phase(), RoundPhase::Idle);
        assert!(drain(&mut c).is_empty());
    }

    #[test]
    fn test_mark_outside_active() {
        let mut c = controller(30);
        assert_eq!(c.mark(0, 0), Err(BingoError::RoundNotActive));
        assert_eq!(c.claim(), Err(BingoError::RoundNotActive));
        c.start_round(42).unwrap();
        assert_eq!(c.mark(0, 0), Err(BingoError::RoundNotActive));
        assert_eq!(c.claim(), Err(BingoError::RoundNotActive));
    }

    #[test]
    fn test_mark_uncalled_number() {
        let mut c = controller(0);
        c.start_round(42).unwrap();
        drain(&mut c);
        assert_eq!(
            c.mark(0, 0),
            Err(BingoError::NotCalled {
                col: 0,
                row: 0,
                value: 13
            })
        );
        assert!(drain(&mut c).is_empty());
        assert_eq!(c.round().unwrap().marked(), &MarkedSet::new());
    }

    #[test]
    fn test_cancel_with_pending_call_timer() {
        let mut c = controller(0);
        let h = c.start_round(9).unwrap();
        c.advance(1999);
        assert!(c.next_call_in().is_some());
        drain(&mut c);

        c.cancel_round(h).unwrap();
        assert_eq!(drain(&mut c), vec![GameEvent::RoundAbandoned { round: h }]);
        assert_eq!(c.phase(), RoundPhase::Abandoned);
        assert_eq!(c.next_call_in(), None);

        c.advance(1_000_000);
        assert!(drain(&mut c).is_empty());
        assert!(c.round().unwrap().called().is_empty());
        assert_eq!(c.ledger().stats().games_played, 1);
        assert_eq!(c.ledger().stats().games_won, 0);
    }

    #[test]
    fn test_cancel_terminal_round_is_noop() {
        let mut c = controller(5);
        let h = c.start_round(9).unwrap();
        c.cancel_round(h).unwrap();
        drain(&mut c);
        assert_eq!(c.cancel_round(h), Ok(()));
        assert!(drain(&mut c).is_empty());
        // Abandoned during countdown: not a played game.
        assert_eq!(c.ledger().stats().games_played, 0);
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let mut c = controller(5);
        let first = c.start_round(5).unwrap();
        let second = c.start_round(6).unwrap();
        assert_ne!(first, second);

        let events = drain(&mut c);
        assert!(events.contains(&GameEvent::RoundAbandoned { round: first }));

        assert_eq!(c.cancel_round(first), Err(BingoError::StaleRound(first)));
        assert_eq!(c.phase(), RoundPhase::CountingDown);
        assert_eq!(c.current_handle(), Some(second));

        // The superseded countdown does not double-tick the new one.
        c.advance(1000);
        assert_eq!(drain(&mut c), vec![GameEvent::CountdownTick { seconds_left: 4 }]);
    }

    #[test]
    fn test_seed_42_manual_row_zero_win() {
        let mut c = controller(0).with_reward_policy(FixedReward(250));
        c.start_round(42).unwrap();
        assert!(c.round().unwrap().marked().contains(CellPos::at(2, 2)));

        let row0 = [13u8, 18, 32, 50, 70];
        let mut won = None;
        for _ in 0..400 {
            c.advance(1000);
            for number in called_numbers(&drain(&mut c)) {
                if let Some(col) = row0.iter().position(|&n| n == number) {
                    let out = c.mark(col as u8, 0).unwrap();
                    assert_eq!(out.state, MarkState::Marked);
                }
            }
            if c.phase() == RoundPhase::Won {
                won = c.round().unwrap().win().copied();
                break;
            }
        }

        let win = won.unwrap();
        assert_eq!(win.pattern, PatternKind::Row(0));
        assert_eq!(win.reward, 250);
        assert_eq!(c.claim(), Ok(win));
        assert_eq!(c.ledger().stats().games_won, 1);
        assert_eq!(c.next_call_in(), None);
    }

    #[test]
    fn test_auto_mark_wins_and_stops_calls() {
        let mut c = controller(0);
        c.set_auto_mark(true);
        c.start_round(42).unwrap();
        c.advance(75 * 5000 + 2000);

        assert_eq!(c.phase(), RoundPhase::Won);
        let events = drain(&mut c);
        assert_eq!(events[0], GameEvent::AutoMarkChanged { enabled: true });

        let won_at = events
            .iter()
            .position(|e| matches!(e, GameEvent::Won { .. }))
            .unwrap();
        assert!(!events[won_at + 1..]
            .iter()
            .any(|e| matches!(e, GameEvent::NumberCalled { .. } | GameEvent::ElapsedTick { .. })));

        let win = c.claim().unwrap();
        assert!((100..=599).contains(&win.reward));
        assert_eq!(win.calls, c.round().unwrap().called().len());
    }

    #[test]
    fn test_exhaustion_keeps_round_active() {
        let mut c = controller(0);
        c.start_round(3).unwrap();
        drain(&mut c);
        c.advance(75 * 5000 + 2000);

        let events = drain(&mut c);
        let mut numbers = called_numbers(&events);
        assert_eq!(numbers.len(), 75);
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=75).collect::<Vec<u8>>());
        assert!(events.contains(&GameEvent::CallsExhausted));

        assert_eq!(c.phase(), RoundPhase::Active);
        assert!(c.round().unwrap().calls_exhausted());
        assert_eq!(c.claim(), Err(BingoError::NoPattern));
        assert_eq!(drain(&mut c), vec![GameEvent::ClaimRejected]);

        for col in [0, 1, 3] {
            c.mark(col, 2).unwrap();
            assert_eq!(c.phase(), RoundPhase::Active);
        }
        c.mark(4, 2).unwrap();
        assert_eq!(c.phase(), RoundPhase::Won);
        assert_eq!(c.claim().unwrap().pattern, PatternKind::Row(2));
    }

    #[test]
    fn test_unmark_never_wins() {
        let mut c = controller(0);
        c.start_round(3).unwrap();
        c.advance(75 * 5000 + 2000);
        c.mark(0, 0).unwrap();
        let out = c.mark(0, 0).unwrap();
        assert_eq!(out.state, MarkState::Unmarked);
        assert_eq!(c.phase(), RoundPhase::Active);
    }

    #[test]
    fn test_play_again_same_card() {
        let mut c = controller(0);
        assert_eq!(c.play_again(), Err(BingoError::NoPreviousRound));

        let first = c.start_round(42).unwrap();
        c.advance(10_000);
        let card = *c.round().unwrap().card();
        assert!(!c.round().unwrap().called().is_empty());

        let second = c.play_again().unwrap();
        assert_ne!(first, second);
        let round = c.round().unwrap();
        assert_eq!(round.card(), &card);
        assert_eq!(round.seed(), 42);
        assert!(round.called().is_empty());
        assert_eq!(round.marked(), &MarkedSet::new());
    }

    #[test]
    fn test_auto_mark_toggle_events() {
        let mut c = controller(30);
        assert!(c.toggle_auto_mark());
        c.set_auto_mark(true);
        assert!(!c.toggle_auto_mark());
        assert_eq!(
            drain(&mut c),
            vec![
                GameEvent::AutoMarkChanged { enabled: true },
                GameEvent::AutoMarkChanged { enabled: false },
            ]
        );
    }

    #[test]
    fn test_snapshot_reflects_round() {
        let mut c = controller(0);
        let empty = c.snapshot();
        assert_eq!(empty.phase, RoundPhase::Idle);
        assert!(empty.card.is_none());

        let h = c.start_round(42).unwrap();
        c.advance(2000);
        let snap = c.snapshot();
        assert_eq!(snap.round, Some(h));
        assert_eq!(snap.phase, RoundPhase::Active);
        assert_eq!(snap.seed, Some(42));
        assert_eq!(snap.card, Some(Card::generate(42)));
        assert_eq!(snap.called.len(), 1);
        assert_eq!(snap.elapsed_secs, 2);
        assert!(snap.next_call_ms.is_some());
    }

    #[test]
    fn test_reset_goes_idle() {
        let mut c = controller(0);
        c.start_round(8).unwrap();
        c.reset();
        assert_eq!(c.phase(), RoundPhase::Idle);
        assert!(!c.has_events());
        c.advance(100_000);
        assert!(!c.has_events());
        assert_eq!(c.last_seed(), Some(8));
    }
}
