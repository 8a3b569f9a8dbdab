use core::fmt;
use core::str::FromStr;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Move {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
    Lizard = 3,
    Spock = 4,
}

impl Move {
    pub const ALL: [Move; 5] = [
        Move::Rock,
        Move::Paper,
        Move::Scissors,
        Move::Lizard,
        Move::Spock,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Move::Rock),
            1 => Some(Move::Paper),
            2 => Some(Move::Scissors),
            3 => Some(Move::Lizard),
            4 => Some(Move::Spock),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The two moves that defeat `self`.
    pub const fn beaten_by(self) -> [Move; 2] {
        match self {
            Move::Rock => [Move::Paper, Move::Spock],
            Move::Paper => [Move::Scissors, Move::Lizard],
            Move::Scissors => [Move::Rock, Move::Spock],
            Move::Lizard => [Move::Rock, Move::Scissors],
            Move::Spock => [Move::Paper, Move::Lizard],
        }
    }

    /// The two moves `self` defeats.
    pub const fn defeats(self) -> [Move; 2] {
        match self {
            Move::Rock => [Move::Scissors, Move::Lizard],
            Move::Paper => [Move::Rock, Move::Spock],
            Move::Scissors => [Move::Paper, Move::Lizard],
            Move::Lizard => [Move::Paper, Move::Spock],
            Move::Spock => [Move::Rock, Move::Scissors],
        }
    }

    pub const fn beats(self, other: Move) -> bool {
        let [a, b] = self.defeats();
        a as u8 == other as u8 || b as u8 == other as u8
    }

    /// Uniform choice between the two moves that defeat `self`.
    pub fn pick_counter<R: Rng + ?Sized>(self, rng: &mut R) -> Move {
        let [first, second] = self.beaten_by();
        if rng.gen_bool(0.5) { first } else { second }
    }

    /// Uniform choice over the full domain.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Move {
        Self::ALL[rng.gen_range(0..Self::COUNT)]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
            Move::Lizard => "Lizard",
            Move::Spock => "Spock",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move '{0}'")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            "lizard" | "l" => Ok(Move::Lizard),
            "spock" | "k" => Ok(Move::Spock),
            _ => Err(ParseMoveError(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn beaten_by_has_two_distinct_non_self_entries() {
        for mv in Move::ALL {
            let [a, b] = mv.beaten_by();
            assert_ne!(a, b);
            assert_ne!(a, mv);
            assert_ne!(b, mv);
            assert!(!mv.beats(mv));
        }
    }

    #[test]
    fn defeats_is_inverse_of_beaten_by() {
        for mv in Move::ALL {
            for winner in mv.beaten_by() {
                assert!(winner.beats(mv), "{winner} should beat {mv}");
                assert!(!mv.beats(winner), "{mv} should not beat {winner}");
            }
        }
    }

    #[test]
    fn distinct_moves_never_draw() {
        for a in Move::ALL {
            for b in Move::ALL {
                if a != b {
                    assert!(a.beats(b) ^ b.beats(a), "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn pick_counter_stays_within_beaten_by() {
        let mut rng = StdRng::seed_from_u64(7);
        for mv in Move::ALL {
            let allowed = mv.beaten_by();
            let mut seen = [false; 2];
            for _ in 0..200 {
                let counter = mv.pick_counter(&mut rng);
                let slot = allowed
                    .iter()
                    .position(|candidate| *candidate == counter)
                    .expect("counter comes from beaten_by");
                seen[slot] = true;
            }
            assert_eq!(seen, [true, true], "both counters of {mv} should appear");
        }
    }

    #[test]
    fn index_roundtrip() {
        for (i, mv) in Move::ALL.iter().enumerate() {
            assert_eq!(Move::from_index(i), Some(*mv));
            assert_eq!(mv.index(), i);
        }
        assert_eq!(Move::from_index(5), None);
    }

    #[test]
    fn parses_names_and_shorthands() {
        assert_eq!("Rock".parse::<Move>(), Ok(Move::Rock));
        assert_eq!(" spock ".parse::<Move>(), Ok(Move::Spock));
        assert_eq!("k".parse::<Move>(), Ok(Move::Spock));
        assert_eq!("L".parse::<Move>(), Ok(Move::Lizard));
        assert!("well".parse::<Move>().is_err());
    }

    #[test]
    fn display_uses_capitalised_names() {
        assert_eq!(Move::Scissors.to_string(), "Scissors");
        assert_eq!(Move::Spock.to_string(), "Spock");
    }
}
