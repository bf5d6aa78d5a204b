//! Call scheduler - the order and cadence of called balls.
//!
//! On start the 75 balls are shuffled with an unseeded source (calls must not
//! be predictable from the room number, unlike the card). Each `emit` hands
//! out the next ball in permutation order together with the delay before the
//! following one. The controller owns the actual timer.
//!
//! ```text
//! Idle --start--> Running --emit x75 | cancel--> Finished
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::types::MAX_BALL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    Idle,
    Running,
    Finished,
}

/// One ball coming out of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    pub number: u8,
    /// Delay before the next ball; `None` once the permutation is exhausted
    pub next_delay_ms: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct CallScheduler<R = StdRng> {
    rng: R,
    order: [u8; MAX_BALL as usize],
    cursor: usize,
    state: SchedulerState,
    first_delay_ms: u32,
    delay_min_ms: u32,
    delay_max_ms: u32,
}

impl CallScheduler<StdRng> {
    /// Scheduler drawing from OS entropy
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> CallScheduler<R> {
    pub fn with_rng(config: &EngineConfig, rng: R) -> Self {
        Self {
            rng,
            order: std::array::from_fn(|i| i as u8 + 1),
            cursor: 0,
            state: SchedulerState::Idle,
            first_delay_ms: config.first_call_delay_ms,
            delay_min_ms: config.call_delay_min_ms,
            delay_max_ms: config.call_delay_max_ms,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Shuffle a fresh permutation and start running.
    ///
    /// Returns the delay before the first ball. Restarting a finished
    /// scheduler begins a new permutation.
    pub fn start(&mut self) -> u32 {
        self.order = std::array::from_fn(|i| i as u8 + 1);
        self.order.shuffle(&mut self.rng);
        self.cursor = 0;
        self.state = SchedulerState::Running;
        self.first_delay_ms
    }

    /// Next ball, or `None` unless running
    pub fn emit(&mut self) -> Option<Emission> {
        if self.state != SchedulerState::Running {
            return None;
        }

        let number = *self.order.get(self.cursor)?;
        self.cursor += 1;

        let next_delay_ms = if self.cursor >= self.order.len() {
            self.state = SchedulerState::Finished;
            None
        } else {
            Some(self.next_delay())
        };

        Some(Emission {
            number,
            next_delay_ms,
        })
    }

    /// Stop immediately; later `emit` calls return `None`
    pub fn cancel(&mut self) {
        self.state = SchedulerState::Finished;
    }

    /// Return to Idle with no permutation in progress
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = SchedulerState::Idle;
    }

    /// Balls emitted so far, in order
    pub fn emitted(&self) -> &[u8] {
        &self.order[..self.cursor]
    }

    /// Balls still to come
    pub fn remaining(&self) -> usize {
        match self.state {
            SchedulerState::Running => self.order.len() - self.cursor,
            _ => 0,
        }
    }

    fn next_delay(&mut self) -> u32 {
        if self.delay_max_ms <= self.delay_min_ms {
            return self.delay_min_ms;
        }
        self.rng.gen_range(self.delay_min_ms..self.delay_max_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(seed: u64) -> CallScheduler<StdRng> {
        CallScheduler::with_rng(&EngineConfig::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_idle_emits_nothing() {
        let mut s = scheduler(1);
        assert_eq!(s.state(), SchedulerState::Idle);
        assert!(s.emit().is_none());
    }

    #[test]
    fn test_start_returns_first_delay() {
        let mut s = scheduler(1);
        assert_eq!(s.start(), 2000);
        assert!(s.is_running());
        assert_eq!(s.remaining(), 75);
    }

    #[test]
    fn test_exhaustion_yields_permutation() {
        let mut s = scheduler(2);
        s.start();
        let mut seen = Vec::new();
        while let Some(e) = s.emit() {
            seen.push(e.number);
            if seen.len() < 75 {
                let d = e.next_delay_ms.unwrap();
                assert!((3000..5000).contains(&d), "delay {d}");
            } else {
                assert_eq!(e.next_delay_ms, None);
            }
        }
        assert_eq!(s.state(), SchedulerState::Finished);
        assert_eq!(seen.as_slice(), s.emitted());

        let mut sorted = seen.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=75).collect::<Vec<u8>>());
        assert!(s.emit().is_none());
    }

    #[test]
    fn test_order_is_shuffled() {
        let mut s = scheduler(3);
        s.start();
        let first: Vec<u8> = (0..75).filter_map(|_| s.emit()).map(|e| e.number).collect();
        assert_ne!(first, (1..=75).collect::<Vec<u8>>());
    }

    #[test]
    fn test_cancel_stops_emission() {
        let mut s = scheduler(4);
        s.start();
        assert!(s.emit().is_some());
        s.cancel();
        assert!(s.emit().is_none());
        assert_eq!(s.remaining(), 0);
        assert_eq!(s.emitted().len(), 1);
    }

    #[test]
    fn test_restart_gives_fresh_permutation() {
        let mut s = scheduler(5);
        s.start();
        let a: Vec<u8> = (0..10).filter_map(|_| s.emit()).map(|e| e.number).collect();
        s.cancel();
        s.start();
        assert!(s.emitted().is_empty());
        let b: Vec<u8> = (0..10).filter_map(|_| s.emit()).map(|e| e.number).collect();
        assert_eq!(b.len(), 10);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_delay_when_range_empty() {
        let config = EngineConfig {
            call_delay_min_ms: 500,
            call_delay_max_ms: 500,
            ..EngineConfig::default()
        };
        let mut s = CallScheduler::with_rng(&config, StdRng::seed_from_u64(6));
        s.start();
        assert_eq!(s.emit().unwrap().next_delay_ms, Some(500));
    }
}
