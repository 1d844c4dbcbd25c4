//! Frontier pruning shared by the sell-side and buy-side searches

/// A partial selection living on a beam frontier
pub(crate) trait BeamState {
    fn score(&self) -> f64;

    /// Random key drawn when the state was created; orders equal scores
    fn tiebreak(&self) -> u64;

    fn picks(&self) -> &[usize];
}

/// Keep the best `width` states: score descending, then tiebreak, then picks
pub(crate) fn keep_top<S: BeamState>(states: &mut Vec<S>, width: usize) {
    states.sort_by(|a, b| {
        b.score()
            .total_cmp(&a.score())
            .then_with(|| a.tiebreak().cmp(&b.tiebreak()))
            .then_with(|| a.picks().cmp(b.picks()))
    });
    states.truncate(width);
}

/// First pool index a state may extend with, so every unordered set is built once
pub(crate) fn next_start(picks: &[usize]) -> usize {
    picks.last().map_or(0, |&last| last + 1)
}
