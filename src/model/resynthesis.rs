//! Stochastic regeneration of an image from two class models

use bitvec::prelude::*;
use rand::Rng;

use crate::model::transition::CumulativeTable;

/// Sample a synthetic intensity for every position
///
/// At position `i` the conditioning intensity is the true pixel at `i - 1`
/// (0 at the start), never a previously sampled value. The class bit at `i`
/// selects which table the sample is drawn from. Empty rows yield 0.
pub fn synthesize<R: Rng + ?Sized>(
    pixels: &[u8],
    assignment: &BitSlice,
    class_a: &CumulativeTable,
    class_b: &CumulativeTable,
    rng: &mut R,
) -> Vec<u8> {
    let mut cursor = 0u8;

    pixels
        .iter()
        .zip(assignment.iter().by_vals())
        .map(|(&pixel, bit)| {
            let table = if bit { class_a } else { class_b };
            let sampled = table.sample(cursor, rng.random::<u32>());
            cursor = pixel;
            sampled
        })
        .collect()
}
