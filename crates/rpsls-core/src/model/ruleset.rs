use crate::model::moves::Move;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ruleset {
    Classic,
    #[default]
    Extended,
}

impl Ruleset {
    pub const ALL: [Ruleset; 2] = [Ruleset::Classic, Ruleset::Extended];

    const CLASSIC_MOVES: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Legal moves in domain order.
    pub fn moves(self) -> &'static [Move] {
        match self {
            Ruleset::Classic => &Self::CLASSIC_MOVES,
            Ruleset::Extended => &Move::ALL,
        }
    }

    pub fn contains(self, mv: Move) -> bool {
        self.moves().contains(&mv)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Ruleset::Classic => "Classic",
            Ruleset::Extended => "Extended",
        }
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ruleset '{0}'")]
pub struct ParseRulesetError(pub String);

impl FromStr for Ruleset {
    type Err = ParseRulesetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Ruleset::Classic),
            "extended" | "rpsls" => Ok(Ruleset::Extended),
            _ => Err(ParseRulesetError(value.to_string())),
        }
    }
}

/// Result of a round from the first party's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Draw,
    Invalid,
}

impl Outcome {
    pub const fn message(self) -> &'static str {
        match self {
            Outcome::Win => "You win!",
            Outcome::Lose => "Computer wins!",
            Outcome::Draw => "It's a draw!",
            Outcome::Invalid => "Invalid game state!",
        }
    }

    pub fn message_for(self, first: &str, second: &str) -> String {
        match self {
            Outcome::Win => format!("{first} wins!"),
            Outcome::Lose => format!("{second} wins!"),
            Outcome::Draw | Outcome::Invalid => self.message().to_string(),
        }
    }

    pub const fn is_decisive(self) -> bool {
        matches!(self, Outcome::Win | Outcome::Lose)
    }
}

/// Resolves a round under `ruleset`.
///
/// A first move outside the ruleset is `Invalid`. In `Classic`, a legal first
/// move only wins against the single move it beats, so a second move outside
/// the ruleset counts as a loss for the first party.
pub fn determine_outcome(ruleset: Ruleset, first: Move, second: Move) -> Outcome {
    if first == second {
        return Outcome::Draw;
    }

    if !ruleset.contains(first) {
        return Outcome::Invalid;
    }

    let first_wins = match ruleset {
        Ruleset::Classic => classic_beats(first, second),
        Ruleset::Extended => first.beats(second),
    };

    if first_wins { Outcome::Win } else { Outcome::Lose }
}

fn classic_beats(first: Move, second: Move) -> bool {
    match first {
        Move::Rock => second == Move::Scissors,
        Move::Paper => second == Move::Rock,
        Move::Scissors => second == Move::Paper,
        Move::Lizard | Move::Spock => false,
    }
}
