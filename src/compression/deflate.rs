//! zlib-backed complexity estimate

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::compression::Compressor;
use crate::io::error::{Result, compression_error};

/// Deflate at maximum compression level, wrapped in a zlib stream
#[derive(Clone, Copy, Debug, Default)]
pub struct Deflate;

impl Deflate {
    /// Inflate a stream produced by [`Compressor::compress`]
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is not valid zlib data
    pub fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        ZlibDecoder::new(bytes)
            .read_to_end(&mut output)
            .map_err(|e| compression_error("inflate", &e))?;
        Ok(output)
    }
}

impl Compressor for Deflate {
    fn name(&self) -> &'static str {
        "deflate"
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::best());
        encoder
            .write_all(bytes)
            .map_err(|e| compression_error("deflate", &e))?;
        encoder.finish().map_err(|e| compression_error("deflate", &e))
    }
}
