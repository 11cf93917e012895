//! Population-based search over per-pixel class assignments

/// Generational driver and parallel evaluation
pub mod engine;
/// Assignment genome
pub mod genome;
/// Fitness direction policy
pub mod objective;
/// Selection, crossover and mutation
pub mod operators;

pub use engine::{
    EngineConfig, FitnessFunction, GenerationStats, PopulationSearch, Scored, SearchOutcome,
};
pub use genome::Assignment;
pub use objective::Objective;
