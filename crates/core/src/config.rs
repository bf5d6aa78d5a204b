//! Engine configuration
//!
//! Defaults match the reference game. `from_env` layers `BINGO_*` overrides
//! on top; unparsable values are ignored.

use std::ops::RangeInclusive;

use crate::types::{
    CALL_DELAY_MAX_MS, CALL_DELAY_MIN_MS, COUNTDOWN_SECS, FIRST_CALL_DELAY_MS, REWARD_MAX,
    REWARD_MIN, SEED_MAX, SEED_MIN,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seconds of countdown before calls begin
    pub countdown_secs: u32,
    /// Delay between going active and the first ball
    pub first_call_delay_ms: u32,
    /// Inter-call delay, lower bound (inclusive)
    pub call_delay_min_ms: u32,
    /// Inter-call delay, upper bound (exclusive)
    pub call_delay_max_ms: u32,
    pub reward_min: u32,
    pub reward_max: u32,
    /// Accepted seeds; `None` accepts any integer
    pub seed_range: Option<RangeInclusive<i64>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            countdown_secs: COUNTDOWN_SECS,
            first_call_delay_ms: FIRST_CALL_DELAY_MS,
            call_delay_min_ms: CALL_DELAY_MIN_MS,
            call_delay_max_ms: CALL_DELAY_MAX_MS,
            reward_min: REWARD_MIN,
            reward_max: REWARD_MAX,
            seed_range: Some(SEED_MIN..=SEED_MAX),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parse("BINGO_COUNTDOWN_SECS") {
            config.countdown_secs = v;
        }
        if let Some(v) = env_parse("BINGO_FIRST_CALL_MS") {
            config.first_call_delay_ms = v;
        }
        if let Some(v) = env_parse("BINGO_CALL_MIN_MS") {
            config.call_delay_min_ms = v;
        }
        if let Some(v) = env_parse("BINGO_CALL_MAX_MS") {
            config.call_delay_max_ms = v;
        }
        if let Some(v) = env_parse("BINGO_REWARD_MIN") {
            config.reward_min = v;
        }
        if let Some(v) = env_parse("BINGO_REWARD_MAX") {
            config.reward_max = v;
        }

        let seed_min = env_parse("BINGO_SEED_MIN");
        let seed_max = env_parse("BINGO_SEED_MAX");
        if seed_min.is_some() || seed_max.is_some() {
            config.seed_range = Some(seed_min.unwrap_or(SEED_MIN)..=seed_max.unwrap_or(SEED_MAX));
        }

        config.normalized()
    }

    /// Swap inverted ranges so every `min <= max`.
    pub fn normalized(mut self) -> Self {
        if self.call_delay_min_ms > self.call_delay_max_ms {
            std::mem::swap(&mut self.call_delay_min_ms, &mut self.call_delay_max_ms);
        }
        if self.reward_min > self.reward_max {
            std::mem::swap(&mut self.reward_min, &mut self.reward_max);
        }
        if let Some(range) = &self.seed_range {
            if range.start() > range.end() {
                self.seed_range = Some(*range.end()..=*range.start());
            }
        }
        self
    }

    /// Accept any integer seed
    pub fn with_any_seed(mut self) -> Self {
        self.seed_range = None;
        self
    }

    pub fn accepts_seed(&self, seed: i64) -> bool {
        self.seed_range
            .as_ref()
            .map_or(true, |range| range.contains(&seed))
    }
}
