//! Two-class first-order Markov model over pixel intensities

/// Stochastic resynthesis from the fitted tables
pub mod resynthesis;
/// Transition counting and cumulative normalization
pub mod transition;

pub use transition::{CumulativeTable, TransitionTable};
