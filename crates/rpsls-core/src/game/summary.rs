use super::match_state::MatchState;
use crate::model::moves::Move;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Computer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveUsage {
    pub mv: Move,
    pub count: u32,
    pub percentage: f64,
}

/// End-of-match report: winner, tallies and per-side move usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub winner: Option<Side>,
    pub total_rounds: u32,
    pub player_wins: u32,
    pub computer_wins: u32,
    pub draws: u32,
    pub player_pct: f64,
    pub computer_pct: f64,
    pub draw_pct: f64,
    pub player_moves: Vec<MoveUsage>,
    pub computer_moves: Vec<MoveUsage>,
}

impl MatchSummary {
    pub fn capture(state: &MatchState) -> Self {
        let scores = state.scores();
        let winner = match scores.player_wins().cmp(&scores.computer_wins()) {
            core::cmp::Ordering::Greater => Some(Side::Player),
            core::cmp::Ordering::Less => Some(Side::Computer),
            core::cmp::Ordering::Equal => None,
        };
        let (player_pct, computer_pct, draw_pct) = scores.percentages();
        let total_rounds = scores.total_rounds();

        // Usage covers every played round, including invalid ones.
        let played = u32::try_from(state.round_count()).unwrap_or(u32::MAX);
        let mut player_counts = [0u32; Move::COUNT];
        let mut computer_counts = [0u32; Move::COUNT];
        for record in state.records() {
            player_counts[record.player.index()] += 1;
            computer_counts[record.computer.index()] += 1;
        }

        MatchSummary {
            winner,
            total_rounds,
            player_wins: scores.player_wins(),
            computer_wins: scores.computer_wins(),
            draws: scores.draws(),
            player_pct,
            computer_pct,
            draw_pct,
            player_moves: usage(&player_counts, played),
            computer_moves: usage(&computer_counts, played),
        }
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(state))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn usage_for(&self, side: Side, mv: Move) -> u32 {
        let moves = match side {
            Side::Player => &self.player_moves,
            Side::Computer => &self.computer_moves,
        };
        moves
            .iter()
            .find(|entry| entry.mv == mv)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}

// Unused moves are omitted, remaining entries stay in domain order.
fn usage(counts: &[u32; Move::COUNT], played: u32) -> Vec<MoveUsage> {
    Move::ALL
        .iter()
        .copied()
        .filter(|mv| counts[mv.index()] > 0)
        .map(|mv| {
            let count = counts[mv.index()];
            let percentage = if played == 0 {
                0.0
            } else {
                f64::from(count) / f64::from(played) * 100.0
            };
            MoveUsage {
                mv,
                count,
                percentage,
            }
        })
        .collect()
}
