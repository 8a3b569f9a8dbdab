use crate::model::moves::Move;
use crate::model::ruleset::{Outcome, Ruleset, determine_outcome};
use crate::model::score::ScoreBoard;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub player: Move,
    pub computer: Move,
    pub outcome: Outcome,
    pub ruleset: Ruleset,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Player({}) vs Computer({}) - {}",
            self.ruleset,
            self.player,
            self.computer,
            self.outcome.message()
        )
    }
}

/// Scores and round log for one match between a player and the computer.
#[derive(Debug, Clone, Default)]
pub struct MatchState {
    ruleset: Ruleset,
    scores: ScoreBoard,
    records: Vec<RoundRecord>,
}

impl MatchState {
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            ruleset,
            scores: ScoreBoard::new(),
            records: Vec::new(),
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    /// Applies to rounds played after the change; earlier records keep theirs.
    pub fn set_ruleset(&mut self, ruleset: Ruleset) {
        self.ruleset = ruleset;
    }

    pub fn play_round(&mut self, player: Move, computer: Move) -> Outcome {
        let outcome = determine_outcome(self.ruleset, player, computer);
        self.scores.apply(outcome);
        self.records.push(RoundRecord {
            player,
            computer,
            outcome,
            ruleset: self.ruleset,
        });
        outcome
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn round_count(&self) -> usize {
        self.records.len()
    }

    pub fn player_move(&self, index: usize) -> Option<Move> {
        self.records.get(index).map(|record| record.player)
    }

    pub fn computer_move(&self, index: usize) -> Option<Move> {
        self.records.get(index).map(|record| record.computer)
    }

    pub fn outcome(&self, index: usize) -> Option<Outcome> {
        self.records.get(index).map(|record| record.outcome)
    }

    pub fn reset(&mut self) {
        self.scores.reset();
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::MatchState;
    use crate::model::moves::Move;
    use crate::model::ruleset::{Outcome, Ruleset};

    #[test]
    fn play_round_scores_and_logs() {
        let mut state = MatchState::new(Ruleset::Extended);
        assert_eq!(state.play_round(Move::Spock, Move::Rock), Outcome::Win);
        assert_eq!(state.play_round(Move::Rock, Move::Paper), Outcome::Lose);
        assert_eq!(state.play_round(Move::Lizard, Move::Lizard), Outcome::Draw);

        assert_eq!(state.round_count(), 3);
        assert_eq!(state.scores().player_wins(), 1);
        assert_eq!(state.scores().computer_wins(), 1);
        assert_eq!(state.scores().draws(), 1);
        assert_eq!(state.player_move(1), Some(Move::Rock));
        assert_eq!(state.computer_move(0), Some(Move::Rock));
        assert_eq!(state.outcome(2), Some(Outcome::Draw));
    }

    #[test]
    fn out_of_range_lookups_are_none() {
        let state = MatchState::new(Ruleset::Classic);
        assert_eq!(state.player_move(0), None);
        assert_eq!(state.computer_move(3), None);
        assert_eq!(state.outcome(1), None);
    }

    #[test]
    fn ruleset_change_applies_to_later_rounds() {
        let mut state = MatchState::new(Ruleset::Classic);
        assert_eq!(state.play_round(Move::Spock, Move::Rock), Outcome::Invalid);
        state.set_ruleset(Ruleset::Extended);
        assert_eq!(state.play_round(Move::Spock, Move::Rock), Outcome::Win);
        assert_eq!(state.records()[0].ruleset, Ruleset::Classic);
        assert_eq!(state.scores().total_rounds(), 1);
    }

    #[test]
    fn record_display_reads_like_a_log_line() {
        let mut state = MatchState::new(Ruleset::Extended);
        state.play_round(Move::Rock, Move::Paper);
        assert_eq!(
            state.records()[0].to_string(),
            "Extended: Player(Rock) vs Computer(Paper) - Computer wins!"
        );
    }

    #[test]
    fn reset_clears_scores_and_log() {
        let mut state = MatchState::new(Ruleset::Extended);
        state.play_round(Move::Rock, Move::Scissors);
        state.reset();
        assert_eq!(state.round_count(), 0);
        assert_eq!(state.scores().total_rounds(), 0);
        assert_eq!(state.ruleset(), Ruleset::Extended);
    }
}
