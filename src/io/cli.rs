//! Command-line interface and the end-to-end segmentation run

use crate::compression::Backend;
use crate::fitness::FitnessEvaluator;
use crate::io::configuration::{GRAY_SUFFIX, MASK_SUFFIX, SMALL_SUFFIX, SearchConfig};
use crate::io::error::Result;
use crate::io::image::{
    assignment_mask, downscale, intensities, load_image, save_gray, save_image,
};
use crate::io::progress::GenerationProgress;
use crate::search::{GenerationStats, Objective, PopulationSearch, Scored};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "kmarkov")]
#[command(
    author,
    version,
    about = "Split an image into two Markov-modelled classes by compression distance"
)]
/// Command-line arguments for the segmentation tool
///
/// Search parameters left unset fall back to the configuration file, then to
/// the built-in defaults.
pub struct Cli {
    /// Input image file
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// TOML file with search parameters
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Individuals per generation
    #[arg(short, long)]
    pub population: Option<usize>,

    /// Generations to evaluate
    #[arg(short, long)]
    pub generations: Option<usize>,

    /// Probability that an offspring is mutated
    #[arg(short, long)]
    pub mutation: Option<f64>,

    /// Per-bit flip probability inside a mutation
    #[arg(long)]
    pub bit_flip_rate: Option<f64>,

    /// Probability that a parent pair is recombined
    #[arg(short = 'x', long)]
    pub crossover: Option<f64>,

    /// Tournament selection pressure
    #[arg(long)]
    pub pressure: Option<f64>,

    /// Entrants per tournament
    #[arg(short, long)]
    pub tournament: Option<usize>,

    /// Worker threads evaluating fitness
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Integer factor the image width is divided by before the search
    #[arg(long)]
    pub scale: Option<u32>,

    /// Random seed for reproducible searches
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Compressor used to estimate complexity
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Whether lower or higher fitness is better
    #[arg(long, value_enum)]
    pub objective: Option<Objective>,

    /// Directory for output images (defaults to the input's directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Merge command-line overrides over the configuration file and defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded or the
    /// merged values are out of range
    pub fn resolve_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)?,
            None => SearchConfig::default(),
        };

        if let Some(value) = self.population {
            config.population_size = value;
        }
        if let Some(value) = self.generations {
            config.generations = value;
        }
        if let Some(value) = self.mutation {
            config.mutation_probability = value;
        }
        if let Some(value) = self.bit_flip_rate {
            config.bit_flip_rate = value;
        }
        if let Some(value) = self.crossover {
            config.crossover_probability = value;
        }
        if let Some(value) = self.pressure {
            config.selection_pressure = value;
        }
        if let Some(value) = self.tournament {
            config.tournament_size = value;
        }
        if let Some(value) = self.workers {
            config.workers = value;
        }
        if let Some(value) = self.scale {
            config.scale = value;
        }
        if let Some(value) = self.seed {
            config.seed = value;
        }
        if let Some(value) = self.backend {
            config.backend = value;
        }
        if let Some(value) = self.objective {
            config.objective = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Location of an output image derived from the input name
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        let stem = self.image.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.png", stem.to_string_lossy());

        match (&self.output_dir, self.image.parent()) {
            (Some(dir), _) => dir.join(name),
            (None, Some(parent)) => parent.join(name),
            (None, None) => PathBuf::from(name),
        }
    }
}

/// Files written and results obtained by one run
#[derive(Debug)]
pub struct RunSummary {
    /// Downscaled copy of the input
    pub small_path: PathBuf,
    /// Grayscale rendering of the searched intensities
    pub gray_path: PathBuf,
    /// Class mask of the best assignment
    pub mask_path: PathBuf,
    /// Working image width
    pub width: u32,
    /// Working image height
    pub height: u32,
    /// Compressed length of the intensity sequence
    pub original_complexity: usize,
    /// Best assignment found
    pub best: Scored,
    /// Per-generation statistics
    pub history: Vec<GenerationStats>,
}

/// Runs the full pipeline for one image
pub struct Segmenter {
    cli: Cli,
}

impl Segmenter {
    /// Create a segmenter for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load, search and write every output image
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, image I/O, or any fitness
    /// evaluation fails
    pub fn process(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let config = self.cli.resolve_config()?;

        let source = load_image(&self.cli.image)?;
        let small = downscale(&source, config.scale);
        let (width, height) = (small.width(), small.height());
        info!(
            "{}: {}x{} scaled to {width}x{height}",
            self.cli.image.display(),
            source.width(),
            source.height()
        );

        let small_path = self.cli.output_path(SMALL_SUFFIX);
        save_image(&small, &small_path)?;

        let pixels = intensities(&small);
        let gray_path = self.cli.output_path(GRAY_SUFFIX);
        save_gray(&pixels, width, height, &gray_path)?;

        let pixel_count = pixels.len();
        let evaluator = FitnessEvaluator::new(pixels, config.backend.compressor())?;
        let original_complexity = evaluator.original_complexity();
        info!(
            "original complexity {original_complexity} bytes ({:?} backend)",
            config.backend
        );

        let engine_config = config.engine_config();
        let mut progress = if self.cli.should_show_progress() {
            GenerationProgress::new(
                engine_config.generations,
                &label(&self.cli.image),
                engine_config.objective,
            )
        } else {
            GenerationProgress::hidden(engine_config.generations, engine_config.objective)
        };

        let mut search = PopulationSearch::new(engine_config, &evaluator, pixel_count)?;
        let outcome = search.run_with(|stats| progress.update(stats));
        progress.finish();
        let outcome = outcome?;

        let mask_path = self.cli.output_path(MASK_SUFFIX);
        save_gray(
            &assignment_mask(outcome.best.assignment.bits()),
            width,
            height,
            &mask_path,
        )?;

        info!(
            "best={} (generation {}, {} of {pixel_count} pixels in class A) in {:.1?}",
            outcome.best.fitness,
            outcome.best.generation,
            outcome.best.assignment.class_a_count(),
            start_time.elapsed()
        );
        info!("wrote {}", mask_path.display());

        Ok(RunSummary {
            small_path,
            gray_path,
            mask_path,
            width,
            height,
            original_complexity,
            best: outcome.best,
            history: outcome.history,
        })
    }
}

fn label(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
