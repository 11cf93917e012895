//! Fitness signal for the class-assignment search

/// Compression distance evaluator
pub mod evaluator;

pub use evaluator::{Evaluation, FitnessEvaluator, normalized_compression_distance};
