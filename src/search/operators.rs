//! Selection, crossover and mutation over bit-vector genomes

use bitvec::prelude::*;
use rand::Rng;

use crate::search::objective::Objective;

/// Tournament selection with a pressure probability
///
/// Samples `tournament_size` entrants with replacement and ranks them
/// best-first. Walking that ranking, each entrant is accepted with
/// probability `pressure`; the last one is taken if nobody was accepted.
/// Returns an index into `scores`, or `None` when `scores` is empty.
pub fn tournament<R: Rng + ?Sized>(
    scores: &[f64],
    objective: Objective,
    tournament_size: usize,
    pressure: f64,
    rng: &mut R,
) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }

    let mut entrants: Vec<usize> = (0..tournament_size.max(1))
        .map(|_| rng.random_range(0..scores.len()))
        .collect();
    entrants.sort_by(|&a, &b| {
        objective.compare(
            scores.get(a).copied().unwrap_or(f64::NAN),
            scores.get(b).copied().unwrap_or(f64::NAN),
        )
    });

    let last = entrants.last().copied();
    entrants
        .into_iter()
        .find(|_| rng.random_bool(pressure))
        .or(last)
}

/// Two-point crossover
///
/// Draws two cut points and exchanges the segment between them. Parents of
/// different lengths are returned unchanged.
pub fn two_point_crossover<R: Rng + ?Sized>(
    first: &BitSlice,
    second: &BitSlice,
    rng: &mut R,
) -> (BitVec, BitVec) {
    let mut child_a = first.to_bitvec();
    let mut child_b = second.to_bitvec();
    let len = first.len();
    if len != second.len() || len < 2 {
        return (child_a, child_b);
    }

    let mut start = rng.random_range(0..=len);
    let mut end = rng.random_range(0..=len);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    if let (Some(segment_a), Some(segment_b)) =
        (child_a.get_mut(start..end), child_b.get_mut(start..end))
    {
        segment_a.swap_with_bitslice(segment_b);
    }

    (child_a, child_b)
}

/// Flip each bit independently with probability `rate`
///
/// Returns the number of flipped bits.
pub fn mutate<R: Rng + ?Sized>(bits: &mut BitSlice, rate: f64, rng: &mut R) -> usize {
    let mut flipped = 0;
    for mut bit in bits.iter_mut() {
        if rng.random_bool(rate) {
            *bit = !*bit;
            flipped += 1;
        }
    }
    flipped
}
