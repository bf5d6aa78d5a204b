//! Reward policy for a winning card.
//!
//! The payout is an unaudited placeholder, so it sits behind a trait that
//! hosts can replace.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::patterns::WinPattern;

pub trait RewardPolicy {
    /// Credits (whole units) paid for `win` after `calls` balls
    fn reward(&mut self, win: &WinPattern, calls: usize) -> u32;
}

/// Uniform draw from an inclusive range, ignoring pattern and call count
#[derive(Debug, Clone)]
pub struct UniformReward<R = StdRng> {
    rng: R,
    min: u32,
    max: u32,
}

impl UniformReward<StdRng> {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> UniformReward<R> {
    pub fn with_rng(config: &EngineConfig, rng: R) -> Self {
        Self {
            rng,
            min: config.reward_min.min(config.reward_max),
            max: config.reward_max.max(config.reward_min),
        }
    }

    pub fn range(&self) -> (u32, u32) {
        (self.min, self.max)
    }
}

impl<R: Rng> RewardPolicy for UniformReward<R> {
    fn reward(&mut self, _win: &WinPattern, _calls: usize) -> u32 {
        self.rng.gen_range(self.min..=self.max)
    }
}

/// Always pays the same amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedReward(pub u32);

impl RewardPolicy for FixedReward {
    fn reward(&mut self, _win: &WinPattern, _calls: usize) -> u32 {
        self.0
    }
}

impl<P: RewardPolicy + ?Sized> RewardPolicy for Box<P> {
    fn reward(&mut self, win: &WinPattern, calls: usize) -> u32 {
        (**self).reward(win, calls)
    }
}
