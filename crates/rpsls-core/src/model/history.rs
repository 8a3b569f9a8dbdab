use crate::model::moves::Move;

/// Append-only log of one opponent's moves with per-move counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
    counts: [u32; Move::COUNT],
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv);
        let slot = &mut self.counts[mv.index()];
        *slot = slot.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.moves.clear();
        self.counts = [0; Move::COUNT];
    }

    /// Most recent `n` moves, oldest first. Shorter when fewer were recorded.
    pub fn last_n(&self, n: usize) -> &[Move] {
        let start = self.moves.len().saturating_sub(n);
        &self.moves[start..]
    }

    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    /// Highest-count move; ties resolve to the lowest domain ordinal.
    pub fn most_frequent(&self) -> Option<Move> {
        let mut best: Option<(Move, u32)> = None;
        for mv in Move::ALL {
            let count = self.count(mv);
            if count == 0 {
                continue;
            }
            match best {
                Some((_, top)) if top >= count => {}
                _ => best = Some((mv, count)),
            }
        }
        best.map(|(mv, _)| mv)
    }

    pub fn count(&self, mv: Move) -> u32 {
        self.counts[mv.index()]
    }

    pub fn counts(&self) -> &[u32; Move::COUNT] {
        &self.counts
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Rounds recorded since construction or the last reset.
    /// Saturates at `u32::MAX`.
    pub fn rounds(&self) -> u32 {
        u32::try_from(self.moves.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::MoveHistory;
    use crate::model::moves::Move;

    fn history_of(moves: &[Move]) -> MoveHistory {
        let mut history = MoveHistory::new();
        for mv in moves {
            history.record(*mv);
        }
        history
    }

    #[test]
    fn counts_stay_in_sync_with_sequence() {
        let history = history_of(&[Move::Rock, Move::Spock, Move::Rock, Move::Paper]);
        let total: u32 = history.counts().iter().sum();
        assert_eq!(total as usize, history.len());
        assert_eq!(history.count(Move::Rock), 2);
        assert_eq!(history.rounds(), 4);
    }

    #[test]
    fn last_n_returns_chronological_suffix() {
        let history = history_of(&[Move::Rock, Move::Paper, Move::Scissors, Move::Lizard]);
        assert_eq!(history.last_n(2), &[Move::Scissors, Move::Lizard]);
        assert_eq!(history.last_n(10).len(), 4);
        assert!(MoveHistory::new().last_n(3).is_empty());
    }

    #[test]
    fn most_frequent_prefers_clear_maximum() {
        let history = history_of(&[Move::Spock, Move::Lizard, Move::Spock, Move::Rock]);
        assert_eq!(history.most_frequent(), Some(Move::Spock));
    }

    #[test]
    fn most_frequent_ties_resolve_to_lowest_ordinal() {
        let history = history_of(&[Move::Spock, Move::Paper, Move::Spock, Move::Paper]);
        assert_eq!(history.most_frequent(), Some(Move::Paper));
        assert_eq!(MoveHistory::new().most_frequent(), None);
    }

    #[test]
    fn full_counter_saturates_instead_of_overflowing() {
        let mut history = history_of(&[Move::Lizard]);
        history.counts[Move::Lizard.index()] = u32::MAX;
        history.record(Move::Lizard);
        history.record(Move::Rock);
        assert_eq!(history.count(Move::Lizard), u32::MAX);
        assert_eq!(history.count(Move::Rock), 1);
        assert_eq!(history.rounds(), 3);
        assert_eq!(history.most_frequent(), Some(Move::Lizard));
    }

    #[test]
    fn reset_clears_everything() {
        let mut history = history_of(&[Move::Rock, Move::Rock]);
        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.rounds(), 0);
        assert_eq!(history.counts(), &[0; Move::COUNT]);
        assert_eq!(history.last(), None);
    }
}
