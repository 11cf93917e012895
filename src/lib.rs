//! Two-class image segmentation guided by normalized compression distance
//!
//! Each candidate assignment splits the transitions of one Markov walk over
//! the image into two classes. A synthetic image sampled from the two fitted
//! models is compared with the original through a general-purpose compressor,
//! and a genetic search looks for the assignment whose model explains the
//! image best.

#![forbid(unsafe_code)]

/// Lossless compressors used as complexity estimators
pub mod compression;
/// Compression-distance fitness of class assignments
pub mod fitness;
/// Input/output operations and error handling
pub mod io;
/// Two-class Markov model construction and resynthesis
pub mod model;
/// Genetic search over class assignments
pub mod search;

pub use io::error::{KmarkovError, Result};
