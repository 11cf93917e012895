//! Lossless compressors used to approximate description length
//!
//! The default pipeline chains a Burrows-Wheeler transform, move-to-front,
//! zero-run coding and adaptive arithmetic coding. The compressed length of a
//! byte sequence stands in for its Kolmogorov complexity.

/// Adaptive arithmetic coder and frequency model
pub mod arithmetic;
/// Burrows-Wheeler transform
pub mod bwt;
/// zlib alternative backend
pub mod deflate;
/// Move-to-front coding
pub mod mtf;
/// Block compressor chaining every stage
pub mod pipeline;
/// Zero-run coding over the move-to-front output
pub mod rle;

use serde::Deserialize;

use crate::compression::deflate::Deflate;
use crate::io::error::Result;

pub use pipeline::BwtPipeline;

/// General-purpose lossless byte compressor
///
/// Implementations must not be tuned to images; the distance built on top of
/// them is only fair if the compressor treats all byte streams alike.
pub trait Compressor: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Compress a byte sequence
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be encoded
    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>>;

    /// Length in bytes of the compressed form
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Compressor::compress`]
    fn compressed_len(&self, bytes: &[u8]) -> Result<usize> {
        Ok(self.compress(bytes)?.len())
    }
}

/// Approximate the Kolmogorov complexity of `bytes` as its compressed length
///
/// # Errors
///
/// Propagates compressor failures
pub fn complexity(compressor: &dyn Compressor, bytes: &[u8]) -> Result<usize> {
    compressor.compressed_len(bytes)
}

/// Available compressor backends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Burrows-Wheeler, move-to-front, run-length and arithmetic coding
    #[default]
    Bwt,
    /// zlib at maximum level
    Deflate,
}

impl Backend {
    /// Instantiate the compressor for this backend
    pub fn compressor(self) -> Box<dyn Compressor> {
        match self {
            Self::Bwt => Box::new(BwtPipeline),
            Self::Deflate => Box::new(Deflate),
        }
    }
}
