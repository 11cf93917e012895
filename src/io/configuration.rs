//! Search constants, runtime configuration defaults and TOML loading

use std::path::Path;

use serde::Deserialize;

use crate::compression::Backend;
use crate::io::error::{KmarkovError, Result, invalid_parameter};
use crate::search::{EngineConfig, Objective};

// Genetic search defaults
/// Individuals per generation
pub const DEFAULT_POPULATION_SIZE: usize = 10;
/// Generations to evaluate
pub const DEFAULT_GENERATIONS: usize = 2048;
/// Probability that an offspring is mutated
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.8;
/// Per-bit flip probability inside a mutation
pub const DEFAULT_BIT_FLIP_RATE: f64 = 0.001;
/// Probability that a parent pair is recombined
pub const DEFAULT_CROSSOVER_PROBABILITY: f64 = 0.8;
/// Probability of accepting each tournament entrant in rank order
pub const DEFAULT_SELECTION_PRESSURE: f64 = 0.7;
/// Entrants per tournament
pub const DEFAULT_TOURNAMENT_SIZE: usize = 5;
/// Worker threads evaluating fitness
pub const DEFAULT_WORKERS: usize = 2;

// Image preparation
/// Integer factor the input width is divided by
pub const DEFAULT_SCALE: u32 = 2;

/// Fixed seed for reproducible searches
pub const DEFAULT_SEED: u64 = 42;

// Mask rendering
/// Display value for positions in class A
pub const MASK_CLASS_A: u8 = 0;
/// Display value for positions in class B
pub const MASK_CLASS_B: u8 = 255;

// Output naming
/// Suffix of the downscaled copy of the input
pub const SMALL_SUFFIX: &str = "_small";
/// Suffix of the grayscale rendering of the intensity sequence
pub const GRAY_SUFFIX: &str = "_gray";
/// Suffix of the class mask
pub const MASK_SUFFIX: &str = "_mask";

/// Complete run configuration
///
/// Missing fields in a configuration file take the defaults above.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Individuals per generation
    pub population_size: usize,
    /// Generations to evaluate
    pub generations: usize,
    /// Probability that an offspring is mutated
    pub mutation_probability: f64,
    /// Per-bit flip probability inside a mutation
    pub bit_flip_rate: f64,
    /// Probability that a parent pair is recombined
    pub crossover_probability: f64,
    /// Probability of accepting each tournament entrant in rank order
    pub selection_pressure: f64,
    /// Entrants per tournament
    pub tournament_size: usize,
    /// Worker threads evaluating fitness
    pub workers: usize,
    /// Integer factor the input width is divided by
    pub scale: u32,
    /// Seed for every random choice of the run
    pub seed: u64,
    /// Compressor used for complexity estimates
    pub backend: Backend,
    /// Which fitness values are better
    pub objective: Objective,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            bit_flip_rate: DEFAULT_BIT_FLIP_RATE,
            crossover_probability: DEFAULT_CROSSOVER_PROBABILITY,
            selection_pressure: DEFAULT_SELECTION_PRESSURE,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            workers: DEFAULT_WORKERS,
            scale: DEFAULT_SCALE,
            seed: DEFAULT_SEED,
            backend: Backend::default(),
            objective: Objective::default(),
        }
    }
}

impl SearchConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the document is malformed or names an
    /// unknown field
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|e| KmarkovError::Configuration {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| KmarkovError::FileSystem {
            path: path.to_path_buf(),
            operation: "read configuration",
            source: e,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Parameters handed to the search engine
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            population_size: self.population_size,
            generations: self.generations,
            mutation_probability: self.mutation_probability,
            bit_flip_rate: self.bit_flip_rate,
            crossover_probability: self.crossover_probability,
            selection_pressure: self.selection_pressure,
            tournament_size: self.tournament_size,
            workers: self.workers,
            objective: self.objective,
            seed: self.seed,
        }
    }

    /// Range-check every field
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming the first offending field
    pub fn validate(&self) -> Result<()> {
        if self.scale == 0 {
            return Err(invalid_parameter("scale", &self.scale, &"must be positive"));
        }
        self.engine_config().validate()
    }
}
