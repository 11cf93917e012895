//! Per-class intensity transition counts and their cumulative sampling tables

use bitvec::prelude::*;
use ndarray::{Array2, ArrayView1};

/// Number of distinct 8-bit intensities
pub const INTENSITY_LEVELS: usize = 256;

/// Ceiling of the sampling domain; draws are uniform `u32` values
pub const MAX_SAMPLE: u32 = u32::MAX;

/// Counts of `previous -> next` intensity transitions attributed to one class
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    counts: Array2<u32>,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionTable {
    /// Create an empty 256x256 table
    pub fn new() -> Self {
        Self {
            counts: Array2::zeros((INTENSITY_LEVELS, INTENSITY_LEVELS)),
        }
    }

    /// Record one observed transition
    pub fn record(&mut self, previous: u8, next: u8) {
        if let Some(count) = self
            .counts
            .get_mut([usize::from(previous), usize::from(next)])
        {
            *count += 1;
        }
    }

    /// Number of `previous -> next` transitions observed
    pub fn count(&self, previous: u8, next: u8) -> u32 {
        self.counts
            .get([usize::from(previous), usize::from(next)])
            .copied()
            .unwrap_or(0)
    }

    /// Total transitions leaving `previous`
    pub fn row_total(&self, previous: u8) -> u64 {
        self.counts
            .row(usize::from(previous))
            .iter()
            .map(|&count| u64::from(count))
            .sum()
    }

    /// Total transitions in the table
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| u64::from(count)).sum()
    }

    /// Convert every row into a cumulative distribution over the sampling domain
    ///
    /// Each entry becomes `floor(running_sum * MAX_SAMPLE / total)`. Rows with
    /// no observations stay all-zero.
    pub fn normalize(&self) -> CumulativeTable {
        let mut thresholds = Array2::zeros((INTENSITY_LEVELS, INTENSITY_LEVELS));

        for (counts, mut row) in self.counts.rows().into_iter().zip(thresholds.rows_mut()) {
            let total: u64 = counts.iter().map(|&count| u64::from(count)).sum();
            if total == 0 {
                continue;
            }

            let mut running = 0u64;
            for (&count, threshold) in counts.iter().zip(row.iter_mut()) {
                running += u64::from(count);
                // running <= total, so the quotient never exceeds MAX_SAMPLE
                *threshold = (running * u64::from(MAX_SAMPLE) / total) as u32;
            }
        }

        CumulativeTable { thresholds }
    }
}

/// Row-normalized cumulative distributions used for inverse-transform sampling
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CumulativeTable {
    thresholds: Array2<u32>,
}

impl CumulativeTable {
    /// Cumulative threshold for `next` within the row of `previous`
    pub fn threshold(&self, previous: u8, next: u8) -> u32 {
        self.thresholds
            .get([usize::from(previous), usize::from(next)])
            .copied()
            .unwrap_or(0)
    }

    /// Full cumulative row for `previous`
    pub fn row(&self, previous: u8) -> ArrayView1<'_, u32> {
        self.thresholds.row(usize::from(previous))
    }

    /// Whether the row for `previous` had no observations
    pub fn is_row_empty(&self, previous: u8) -> bool {
        self.row(previous).iter().all(|&threshold| threshold == 0)
    }

    /// Pick the first intensity whose threshold exceeds `draw`
    ///
    /// Falls back to intensity 0 when the row is empty or `draw` is not below
    /// any threshold.
    pub fn sample(&self, previous: u8, draw: u32) -> u8 {
        self.row(previous)
            .iter()
            .position(|&threshold| draw < threshold)
            .map_or(0, |column| column as u8)
    }
}

/// Split the transitions of one walk over `pixels` into two class tables
///
/// The walk starts from intensity 0 and always advances to the true pixel
/// value; `assignment[i]` only decides which table receives the transition
/// into position `i`. Returns `(class_a, class_b)` where class A holds the
/// positions whose bit is set. Only the common prefix of the two inputs is
/// walked.
pub fn build(pixels: &[u8], assignment: &BitSlice) -> (TransitionTable, TransitionTable) {
    let mut class_a = TransitionTable::new();
    let mut class_b = TransitionTable::new();
    let mut cursor = 0u8;

    for (&pixel, bit) in pixels.iter().zip(assignment.iter().by_vals()) {
        if bit {
            class_a.record(cursor, pixel);
        } else {
            class_b.record(cursor, pixel);
        }
        cursor = pixel;
    }

    (class_a, class_b)
}
