//! Burrows-Wheeler transform over cyclic rotations

use crate::io::error::{Result, compression_error};

/// Output of the forward transform
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BwtBlock {
    /// Last column of the sorted rotation matrix
    pub last_column: Vec<u8>,
    /// Row of the sorted matrix holding the untransformed input
    pub primary_index: usize,
}

/// Sort all cyclic rotations of `input` by prefix doubling
///
/// Returns rotation start offsets in sorted order. Rotations that are equal
/// (periodic input) keep an arbitrary but deterministic relative order.
fn sorted_rotations(input: &[u8]) -> Vec<usize> {
    let n = input.len();
    let mut order: Vec<usize> = (0..n).collect();
    let mut rank: Vec<usize> = input.iter().map(|&b| usize::from(b)).collect();
    let mut next_rank = vec![0usize; n];
    let mut width = 1;

    while n > 1 {
        let key = |i: usize| {
            (
                rank.get(i).copied().unwrap_or(0),
                rank.get((i + width) % n).copied().unwrap_or(0),
            )
        };
        order.sort_unstable_by_key(|&i| key(i));

        let mut class = 0;
        let mut previous = None;
        for &rotation in &order {
            let current = key(rotation);
            if previous.is_some_and(|p| p != current) {
                class += 1;
            }
            previous = Some(current);
            if let Some(slot) = next_rank.get_mut(rotation) {
                *slot = class;
            }
        }
        std::mem::swap(&mut rank, &mut next_rank);

        // Sorted by the first 2 * width symbols at this point
        if class + 1 == n || width * 2 >= n {
            break;
        }
        width *= 2;
    }

    order
}

/// Apply the forward transform
pub fn forward(input: &[u8]) -> BwtBlock {
    let n = input.len();
    if n == 0 {
        return BwtBlock {
            last_column: Vec::new(),
            primary_index: 0,
        };
    }

    let order = sorted_rotations(input);
    let mut primary_index = 0;
    let last_column = order
        .iter()
        .enumerate()
        .map(|(row, &start)| {
            if start == 0 {
                primary_index = row;
            }
            input.get((start + n - 1) % n).copied().unwrap_or(0)
        })
        .collect();

    BwtBlock {
        last_column,
        primary_index,
    }
}

/// Reconstruct the original bytes from a transformed block
///
/// # Errors
///
/// Returns an error if the primary index lies outside the block
pub fn inverse(block: &BwtBlock) -> Result<Vec<u8>> {
    let last = &block.last_column;
    let n = last.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if block.primary_index >= n {
        return Err(compression_error(
            "bwt inverse",
            &format!("primary index {} outside block of {n}", block.primary_index),
        ));
    }

    // First occurrence of each byte in the sorted first column
    let mut counts = [0usize; 256];
    for &b in last {
        if let Some(c) = counts.get_mut(usize::from(b)) {
            *c += 1;
        }
    }
    let mut starts = [0usize; 256];
    let mut total = 0;
    for (start, &count) in starts.iter_mut().zip(counts.iter()) {
        *start = total;
        total += count;
    }

    // Last-to-first mapping
    let mut seen = [0usize; 256];
    let lf: Vec<usize> = last
        .iter()
        .map(|&b| {
            let symbol = usize::from(b);
            let occurrence = seen.get(symbol).copied().unwrap_or(0);
            if let Some(s) = seen.get_mut(symbol) {
                *s += 1;
            }
            starts.get(symbol).copied().unwrap_or(0) + occurrence
        })
        .collect();

    let mut output = vec![0u8; n];
    let mut row = block.primary_index;
    for slot in output.iter_mut().rev() {
        *slot = last.get(row).copied().unwrap_or(0);
        row = lf.get(row).copied().unwrap_or(0);
    }

    Ok(output)
}
