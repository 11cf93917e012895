//! Direction in which fitness values improve

use std::cmp::Ordering;

use serde::Deserialize;

/// Which end of the fitness scale is better
///
/// Distances improve downwards, so the command line defaults to
/// [`Objective::Minimize`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Smaller scores are better
    #[default]
    Minimize,
    /// Larger scores are better
    Maximize,
}

impl Objective {
    /// Order two scores best-first
    ///
    /// NaN sorts after every finite value in both directions.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match self {
                Self::Minimize => a.total_cmp(&b),
                Self::Maximize => b.total_cmp(&a),
            },
        }
    }

    /// Whether `candidate` strictly beats `incumbent`
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        self.compare(candidate, incumbent) == Ordering::Less
    }

    /// Index of the best score, if any
    pub fn best_index(self, scores: &[f64]) -> Option<usize> {
        scores
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| self.compare(**a, **b))
            .map(|(index, _)| index)
    }
}
