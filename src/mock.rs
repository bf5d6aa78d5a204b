//! Mock wallet, profile and leaderboard data for the interactive binary.
//!
//! The engine only ever sees a [`Ledger`]; where its opening figures come
//! from is decided here.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{Credits, Ledger, LedgerStats, Transaction, TransactionKind};
use crate::term::{LeaderboardEntry, PlayerExtras};

/// Source of the opening wallet figures.
pub trait StatsProvider {
    fn stats(&mut self) -> LedgerStats;

    /// Transaction history, oldest first
    fn transactions(&self) -> Vec<Transaction>;

    fn extras(&mut self) -> PlayerExtras;

    /// Top players, best first
    fn leaderboard(&self) -> Vec<LeaderboardEntry>;

    fn ledger(&mut self) -> Ledger {
        let stats = self.stats();
        Ledger::with_stats(stats, self.transactions())
    }
}

/// Random figures plus a fixed sample history.
pub struct MockStats<R = StdRng> {
    rng: R,
}

impl MockStats<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for MockStats<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MockStats<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> StatsProvider for MockStats<R> {
    fn stats(&mut self) -> LedgerStats {
        let games_played = self.rng.gen_range(0..200);
        let streak = self.rng.gen_range(0..10);
        LedgerStats {
            balance: Credits(self.rng.gen_range(0..100_000)),
            total_winnings: Credits(self.rng.gen_range(0..500_000)),
            games_won: self.rng.gen_range(0..50),
            games_played,
            streak,
            longest_streak: streak,
            // Ledger::with_stats recomputes this
            win_rate: 0,
        }
    }

    fn transactions(&self) -> Vec<Transaction> {
        sample_transactions()
    }

    fn extras(&mut self) -> PlayerExtras {
        PlayerExtras {
            hours_played: self.rng.gen_range(0..100),
            favorite_number: self.rng.gen_range(1..=75),
        }
    }

    fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        [
            ("Alex Champion", 1_542_050, 234),
            ("Sarah Winner", 1_289_025, 198),
            ("Mike Lucky", 1_125_075, 176),
            ("Emma Star", 987_500, 145),
            ("David Pro", 842_030, 132),
        ]
        .into_iter()
        .map(|(name, hundredths, games)| LeaderboardEntry {
            name: name.to_string(),
            winnings: Credits(hundredths),
            games,
        })
        .collect()
    }
}

fn sample_transactions() -> Vec<Transaction> {
    let tx = |kind, hundredths, description: &str, date: &str| Transaction {
        kind,
        amount: Credits(hundredths),
        description: description.to_string(),
        date: Some(date.to_string()),
    };
    vec![
        tx(TransactionKind::Entry, -5_000, "Game Entry - Room #89", "2025-01-12"),
        tx(TransactionKind::Win, 18_050, "Bingo Win - Room #17", "2025-01-13"),
        tx(TransactionKind::Deposit, 50_000, "Wallet Deposit", "2025-01-14"),
        tx(TransactionKind::Win, 25_000, "Bingo Win - Room #42", "2025-01-15"),
    ]
}
