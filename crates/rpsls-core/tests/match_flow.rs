use rpsls_core::game::match_state::MatchState;
use rpsls_core::game::summary::{MatchSummary, Side};
use rpsls_core::model::history::MoveHistory;
use rpsls_core::model::moves::Move;
use rpsls_core::model::ruleset::{Outcome, Ruleset, determine_outcome};

#[test]
fn beats_relation_is_a_tournament() {
    for mv in Move::ALL {
        let beaten_by = mv.beaten_by();
        assert_eq!(beaten_by.len(), 2);
        assert!(!beaten_by.contains(&mv), "{mv} defeats itself");
        assert_ne!(beaten_by[0], beaten_by[1]);
        for other in Move::ALL {
            if other == mv {
                assert!(!mv.beats(other));
            } else {
                assert_ne!(mv.beats(other), other.beats(mv), "{mv} vs {other}");
            }
        }
    }
}

#[test]
fn extended_outcomes_follow_beats_relation() {
    for first in Move::ALL {
        for second in Move::ALL {
            let expected = if first == second {
                Outcome::Draw
            } else if first.beats(second) {
                Outcome::Win
            } else {
                Outcome::Lose
            };
            assert_eq!(determine_outcome(Ruleset::Extended, first, second), expected);
        }
    }
}

#[test]
fn match_log_and_summary_agree() {
    let mut state = MatchState::new(Ruleset::Extended);
    let rounds = [
        (Move::Rock, Move::Paper),
        (Move::Spock, Move::Scissors),
        (Move::Lizard, Move::Spock),
        (Move::Paper, Move::Paper),
        (Move::Scissors, Move::Rock),
    ];
    for (player, computer) in rounds {
        state.play_round(player, computer);
    }

    assert_eq!(state.round_count(), rounds.len());
    assert_eq!(state.player_move(1), Some(Move::Spock));
    assert_eq!(state.computer_move(4), Some(Move::Rock));
    assert_eq!(state.player_move(5), None);
    assert_eq!(
        state.records()[2].to_string(),
        "Extended: Player(Lizard) vs Computer(Spock) - You win!"
    );

    let summary = MatchSummary::capture(&state);
    assert_eq!(summary.player_wins, 2);
    assert_eq!(summary.computer_wins, 2);
    assert_eq!(summary.draws, 1);
    assert_eq!(summary.winner, None);

    let usage_total: f64 = summary.player_moves.iter().map(|u| u.percentage).sum();
    assert!((usage_total - 100.0).abs() < 1e-9);
}

#[test]
fn classic_match_ignores_invalid_rounds_in_scores() {
    let mut state = MatchState::new(Ruleset::Classic);
    assert_eq!(state.play_round(Move::Spock, Move::Rock), Outcome::Invalid);
    assert_eq!(state.play_round(Move::Rock, Move::Scissors), Outcome::Win);
    assert_eq!(state.play_round(Move::Rock, Move::Lizard), Outcome::Lose);

    assert_eq!(state.round_count(), 3);
    assert_eq!(state.scores().total_rounds(), 2);
    assert_eq!(state.scores().win_rate(), Some(0.5));

    state.set_ruleset(Ruleset::Extended);
    assert_eq!(state.play_round(Move::Spock, Move::Rock), Outcome::Win);
    let summary = MatchSummary::capture(&state);
    assert_eq!(summary.winner, Some(Side::Player));
    assert_eq!(summary.usage_for(Side::Player, Move::Spock), 2);

    state.reset();
    assert_eq!(state.round_count(), 0);
    assert_eq!(state.scores().total_rounds(), 0);
}

#[test]
fn history_counts_track_recorded_moves() {
    let mut history = MoveHistory::new();
    let moves = [Move::Lizard, Move::Rock, Move::Lizard, Move::Spock, Move::Lizard];
    for mv in moves {
        history.record(mv);
    }

    assert_eq!(history.counts().iter().sum::<u32>() as usize, moves.len());
    assert_eq!(history.most_frequent(), Some(Move::Lizard));
    assert_eq!(history.last_n(2), &[Move::Spock, Move::Lizard]);
    assert_eq!(history.last_n(10), &moves);

    history.reset();
    assert!(history.is_empty());
    assert_eq!(history.most_frequent(), None);
}
