//! Normalized compression distance between an image and its two-class model

use std::sync::Arc;

use bitvec::prelude::*;
use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use crate::compression::{Compressor, complexity};
use crate::io::error::{Result, invalid_parameter};
use crate::model::{resynthesis, transition};
use crate::search::FitnessFunction;

/// Normalized compression distance from three compressed lengths
///
/// `(joint - min(original, model)) / max(original, model)`. Zero when both
/// lengths are zero.
pub fn normalized_compression_distance(original: usize, model: usize, joint: usize) -> f64 {
    let smaller = original.min(model) as f64;
    let larger = original.max(model) as f64;
    if larger == 0.0 {
        return 0.0;
    }
    (joint as f64 - smaller) / larger
}

/// Intermediate results of one evaluation
#[derive(Clone, Debug)]
pub struct Evaluation {
    /// Synthetic intensities sampled from the class models
    pub model: Vec<u8>,
    /// Compressed length of the synthetic sequence
    pub model_complexity: usize,
    /// Compressed length of synthetic followed by original
    pub joint_complexity: usize,
    /// Resulting distance
    pub distance: f64,
}

/// Scores class assignments against one fixed intensity sequence
///
/// The pixels and their compressed length are computed once and shared
/// read-only by every evaluation.
pub struct FitnessEvaluator {
    pixels: Arc<[u8]>,
    compressor: Box<dyn Compressor>,
    original_complexity: usize,
}

impl FitnessEvaluator {
    /// Precompute the complexity of `pixels` with `compressor`
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels` is empty or the compressor fails
    pub fn new(pixels: impl Into<Arc<[u8]>>, compressor: Box<dyn Compressor>) -> Result<Self> {
        let pixels = pixels.into();
        if pixels.is_empty() {
            return Err(crate::io::error::KmarkovError::InvalidSourceData {
                reason: "intensity sequence is empty".to_string(),
            });
        }
        let original_complexity = complexity(compressor.as_ref(), &pixels)?;
        debug!(
            "{} pixels compress to {original_complexity} bytes with {}",
            pixels.len(),
            compressor.name()
        );

        Ok(Self {
            pixels,
            compressor,
            original_complexity,
        })
    }

    /// Intensity sequence being explained
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Compressed length of the intensity sequence
    pub const fn original_complexity(&self) -> usize {
        self.original_complexity
    }

    /// Fit both class models, resynthesize, and measure the distance
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment length differs from the pixel
    /// count or the compressor fails
    pub fn evaluate_detailed<R: Rng + ?Sized>(
        &self,
        assignment: &BitSlice,
        rng: &mut R,
    ) -> Result<Evaluation> {
        if assignment.len() != self.pixels.len() {
            return Err(invalid_parameter(
                "assignment",
                &assignment.len(),
                &format!("expected one class bit per pixel ({})", self.pixels.len()),
            ));
        }

        let (class_a, class_b) = transition::build(&self.pixels, assignment);
        let (class_a, class_b) = (class_a.normalize(), class_b.normalize());
        let model = resynthesis::synthesize(&self.pixels, assignment, &class_a, &class_b, rng);

        let model_complexity = complexity(self.compressor.as_ref(), &model)?;
        let mut joint = Vec::with_capacity(model.len() + self.pixels.len());
        joint.extend_from_slice(&model);
        joint.extend_from_slice(&self.pixels);
        let joint_complexity = complexity(self.compressor.as_ref(), &joint)?;

        let distance = normalized_compression_distance(
            self.original_complexity,
            model_complexity,
            joint_complexity,
        );

        Ok(Evaluation {
            model,
            model_complexity,
            joint_complexity,
            distance,
        })
    }

    /// Distance between the pixels and a model resynthesized from `assignment`
    ///
    /// # Errors
    ///
    /// See [`FitnessEvaluator::evaluate_detailed`]
    pub fn evaluate<R: Rng + ?Sized>(&self, assignment: &BitSlice, rng: &mut R) -> Result<f64> {
        self.evaluate_detailed(assignment, rng)
            .map(|evaluation| evaluation.distance)
    }
}

impl FitnessFunction for FitnessEvaluator {
    fn score(&self, genome: &BitSlice, rng: &mut StdRng) -> Result<f64> {
        self.evaluate(genome, rng)
    }
}
