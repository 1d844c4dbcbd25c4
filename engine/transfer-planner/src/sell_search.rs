use rand::RngCore;

use crate::beam::{keep_top, next_start, BeamState};
use crate::pool::SellCandidate;

/// A combination of outgoing sell-pool candidates
#[derive(Debug, Clone, PartialEq)]
pub struct SellState {
    /// Indices into the sell pool, strictly increasing
    pub picks: Vec<usize>,
    /// Aggregate sell-worthiness
    pub score: f64,
    tiebreak: u64,
}

impl BeamState for SellState {
    fn score(&self) -> f64 {
        self.score
    }

    fn tiebreak(&self) -> u64 {
        self.tiebreak
    }

    fn picks(&self) -> &[usize] {
        &self.picks
    }
}

/// Enumerate the most sell-worthy `k`-player combinations of the sell pool.
///
/// Every round extends each frontier state with each later pool index and keeps
/// the best `beam_width` states; the survivors of round `k` are returned.
pub fn sell_beam(
    pool: &[SellCandidate],
    k: usize,
    beam_width: usize,
    rng: &mut dyn RngCore,
) -> Vec<SellState> {
    if k == 0 || k > pool.len() || beam_width == 0 {
        return Vec::new();
    }

    let mut frontier = vec![SellState { picks: Vec::new(), score: 0.0, tiebreak: 0 }];
    for _ in 0..k {
        let mut next = Vec::new();
        for state in &frontier {
            for idx in next_start(&state.picks)..pool.len() {
                let mut picks = Vec::with_capacity(k);
                picks.extend_from_slice(&state.picks);
                picks.push(idx);
                next.push(SellState {
                    picks,
                    score: state.score + pool[idx].worthiness,
                    tiebreak: rng.next_u64(),
                });
            }
        }
        keep_top(&mut next, beam_width);
        if next.is_empty() {
            return next;
        }
        frontier = next;
    }

    frontier.retain(|s| s.picks.len() == k);
    frontier
}
