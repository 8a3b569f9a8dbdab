use crate::model::ruleset::Outcome;
use serde::{Deserialize, Serialize};

/// Round tallies from the first party's ("player") point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    player_wins: u32,
    computer_wins: u32,
    draws: u32,
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self {
            player_wins: 0,
            computer_wins: 0,
            draws: 0,
        }
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.player_wins += 1,
            Outcome::Lose => self.computer_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Invalid => {}
        }
    }

    pub fn player_wins(&self) -> u32 {
        self.player_wins
    }

    pub fn computer_wins(&self) -> u32 {
        self.computer_wins
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn total_rounds(&self) -> u32 {
        self.player_wins + self.computer_wins + self.draws
    }

    /// Player wins over decisive rounds, `None` until one is decided.
    pub fn win_rate(&self) -> Option<f64> {
        let decisive = self.player_wins + self.computer_wins;
        if decisive == 0 {
            return None;
        }
        Some(f64::from(self.player_wins) / f64::from(decisive))
    }

    /// (player, computer, draw) percentages over all scored rounds.
    pub fn percentages(&self) -> (f64, f64, f64) {
        let total = self.total_rounds();
        if total == 0 {
            return (0.0, 0.0, 0.0);
        }
        let pct = |value: u32| f64::from(value) / f64::from(total) * 100.0;
        (
            pct(self.player_wins),
            pct(self.computer_wins),
            pct(self.draws),
        )
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
