//! Generational search over class assignments with parallel evaluation

use bitvec::prelude::*;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::io::error::{Result, invalid_parameter};
use crate::search::genome::Assignment;
use crate::search::objective::Objective;
use crate::search::operators::{mutate, tournament, two_point_crossover};

/// Scores a genome
///
/// Evaluations run concurrently on shared references, so implementations
/// must only read shared state. The random generator is private to the call.
pub trait FitnessFunction: Sync {
    /// Score `genome`
    ///
    /// # Errors
    ///
    /// Implementations return an error when the score cannot be computed;
    /// the search aborts on the first one
    fn score(&self, genome: &BitSlice, rng: &mut StdRng) -> Result<f64>;
}

/// Parameters of the genetic search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
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
    /// Which scores are better
    pub objective: Objective,
    /// Seed for initialization, breeding and per-evaluation generators
    pub seed: u64,
}

impl EngineConfig {
    /// Check counts are positive and probabilities lie in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming the first offending field
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("population_size", self.population_size),
            ("generations", self.generations),
            ("tournament_size", self.tournament_size),
            ("workers", self.workers),
        ];
        for (parameter, value) in counts {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
        }

        let probabilities = [
            ("mutation_probability", self.mutation_probability),
            ("bit_flip_rate", self.bit_flip_rate),
            ("crossover_probability", self.crossover_probability),
            ("selection_pressure", self.selection_pressure),
        ];
        for (parameter, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"must be a probability in [0, 1]",
                ));
            }
        }

        Ok(())
    }
}

/// An assignment together with the score it received
#[derive(Clone, Debug, PartialEq)]
pub struct Scored {
    /// The scored genome
    pub assignment: Assignment,
    /// Its fitness when evaluated
    pub fitness: f64,
    /// Generation in which the score was obtained
    pub generation: usize,
}

/// Summary of one evaluated generation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation number
    pub generation: usize,
    /// Best score under the objective
    pub best: f64,
    /// Arithmetic mean of all scores
    pub mean: f64,
    /// Worst score under the objective
    pub worst: f64,
}

impl GenerationStats {
    fn from_scores(generation: usize, scores: &[f64], objective: Objective) -> Self {
        let mean = if scores.is_empty() {
            f64::NAN
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };
        let best = objective
            .best_index(scores)
            .and_then(|index| scores.get(index))
            .copied()
            .unwrap_or(f64::NAN);
        let worst = scores
            .iter()
            .copied()
            .max_by(|a, b| objective.compare(*a, *b))
            .unwrap_or(f64::NAN);

        Self {
            generation,
            best,
            mean,
            worst,
        }
    }
}

/// Result of a complete search
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Best individual seen across all generations
    pub best: Scored,
    /// Statistics for every generation, in order
    pub history: Vec<GenerationStats>,
}

/// Genetic search driver
///
/// Every generation the whole population is scored on a dedicated worker pool,
/// then the next population is bred by tournament selection, two-point
/// crossover and bit-flip mutation. The best individual of each generation
/// survives unchanged but is scored again with the rest.
pub struct PopulationSearch<'f, F: FitnessFunction> {
    config: EngineConfig,
    fitness: &'f F,
    genome_len: usize,
    rng: StdRng,
    pool: rayon::ThreadPool,
}

impl<'f, F: FitnessFunction> PopulationSearch<'f, F> {
    /// Prepare a search over genomes of `genome_len` bits
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range, the genome is
    /// empty, or the worker pool cannot be created
    pub fn new(config: EngineConfig, fitness: &'f F, genome_len: usize) -> Result<Self> {
        config.validate()?;
        if genome_len == 0 {
            return Err(invalid_parameter(
                "genome_len",
                &genome_len,
                &"genomes need at least one position",
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("kmarkov-eval-{i}"))
            .build()
            .map_err(|e| invalid_parameter("workers", &config.workers, &e))?;

        Ok(Self {
            config,
            fitness,
            genome_len,
            rng: StdRng::seed_from_u64(config.seed),
            pool,
        })
    }

    /// Configuration in use
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Draw a uniformly random population
    pub fn initial_population(&mut self) -> Vec<Assignment> {
        (0..self.config.population_size)
            .map(|_| Assignment::random(self.genome_len, &mut self.rng))
            .collect()
    }

    /// Score every individual in parallel
    ///
    /// Seeds are drawn in population order before dispatch, so each score is
    /// reproducible and tied to its index whatever order workers finish in.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error encountered
    pub fn evaluate(&mut self, population: &[Assignment]) -> Result<Vec<f64>> {
        let seeds: Vec<u64> = population.iter().map(|_| self.rng.random()).collect();
        let fitness = self.fitness;

        self.pool.install(|| {
            population
                .par_iter()
                .zip(seeds.par_iter())
                .map(|(individual, &seed)| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    fitness.score(individual.bits(), &mut rng)
                })
                .collect::<Result<Vec<f64>>>()
        })
    }

    /// Breed the next population from a scored one
    pub fn breed(&mut self, population: &[Assignment], scores: &[f64]) -> Vec<Assignment> {
        let size = self.config.population_size;
        let mut next = Vec::with_capacity(size);

        if let Some(elite) = self
            .config
            .objective
            .best_index(scores)
            .and_then(|index| population.get(index))
        {
            next.push(elite.clone());
        }

        while next.len() < size {
            let first = self.select(population, scores);
            let second = self.select(population, scores);
            let (Some(first), Some(second)) = (first, second) else {
                break;
            };

            let (child_a, child_b) = if self.rng.random_bool(self.config.crossover_probability) {
                two_point_crossover(first.bits(), second.bits(), &mut self.rng)
            } else {
                (first.bits().to_bitvec(), second.bits().to_bitvec())
            };

            for mut child in [child_a, child_b] {
                if next.len() >= size {
                    break;
                }
                if self.rng.random_bool(self.config.mutation_probability) {
                    mutate(&mut child, self.config.bit_flip_rate, &mut self.rng);
                }
                next.push(Assignment::from_bits(child));
            }
        }

        next
    }

    fn select<'p>(
        &mut self,
        population: &'p [Assignment],
        scores: &[f64],
    ) -> Option<&'p Assignment> {
        tournament(
            scores,
            self.config.objective,
            self.config.tournament_size,
            self.config.selection_pressure,
            &mut self.rng,
        )
        .and_then(|index| population.get(index))
    }

    /// Run every generation and return the best individual found
    ///
    /// # Errors
    ///
    /// Returns the first fitness evaluation error
    pub fn run(&mut self) -> Result<SearchOutcome> {
        self.run_with(|_| {})
    }

    /// Like [`PopulationSearch::run`], reporting each generation to `observer`
    ///
    /// # Errors
    ///
    /// Returns the first fitness evaluation error
    pub fn run_with<O: FnMut(&GenerationStats)>(
        &mut self,
        mut observer: O,
    ) -> Result<SearchOutcome> {
        let objective = self.config.objective;
        let mut population = self.initial_population();
        let mut best: Option<Scored> = None;
        let mut history = Vec::with_capacity(self.config.generations);

        for generation in 0..self.config.generations {
            let scores = self.evaluate(&population)?;
            let stats = GenerationStats::from_scores(generation, &scores, objective);
            debug!(
                "generation {generation}: best {:.6} mean {:.6} worst {:.6}",
                stats.best, stats.mean, stats.worst
            );

            if let Some(index) = objective.best_index(&scores) {
                let fitness = scores.get(index).copied().unwrap_or(f64::NAN);
                let improved = best
                    .as_ref()
                    .is_none_or(|incumbent| objective.is_better(fitness, incumbent.fitness));
                if improved {
                    if let Some(assignment) = population.get(index) {
                        best = Some(Scored {
                            assignment: assignment.clone(),
                            fitness,
                            generation,
                        });
                    }
                }
            }

            observer(&stats);
            history.push(stats);

            if generation + 1 < self.config.generations {
                population = self.breed(&population, &scores);
            }
        }

        let best = best.ok_or_else(|| {
            invalid_parameter(
                "generations",
                &self.config.generations,
                &"no individual was evaluated",
            )
        })?;

        Ok(SearchOutcome { best, history })
    }
}
