//! Block container for the Burrows-Wheeler pipeline

use crate::compression::arithmetic::{Decoder, Encoder, FrequencyModel};
use crate::compression::bwt::{self, BwtBlock};
use crate::compression::{Compressor, mtf, rle};
use crate::io::error::{Result, compression_error};

/// Size of the block header: original length then primary index, both `u32` little endian
pub const HEADER_LEN: usize = 8;

/// Burrows-Wheeler based block compressor
#[derive(Clone, Copy, Debug, Default)]
pub struct BwtPipeline;

impl BwtPipeline {
    /// Restore the bytes of a block produced by [`Compressor::compress`]
    ///
    /// # Errors
    ///
    /// Returns an error if the header is truncated or any stage rejects the
    /// payload
    pub fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let (header, payload) = bytes
            .split_at_checked(HEADER_LEN)
            .ok_or_else(|| compression_error("block header", &"truncated header"))?;
        let (length, primary) = header.split_at(4);
        let length = read_u32(length)? as usize;
        let primary_index = read_u32(primary)? as usize;

        let mut model = FrequencyModel::new(rle::ALPHABET_SIZE);
        let mut decoder = Decoder::new(payload);
        let mut symbols = Vec::with_capacity(length);
        loop {
            let symbol = decoder.decode(&mut model)?;
            symbols.push(symbol as u16);
            if symbol as u16 == rle::END_OF_BLOCK {
                break;
            }
            if symbols.len() > length + 1 {
                return Err(compression_error(
                    "arithmetic decode",
                    &"stream exceeds declared block length",
                ));
            }
        }

        let moved = rle::decode(&symbols)?;
        let last_column = mtf::decode(&moved);
        if last_column.len() != length {
            return Err(compression_error(
                "block header",
                &format!("declared {length} bytes, decoded {}", last_column.len()),
            ));
        }

        bwt::inverse(&BwtBlock {
            last_column,
            primary_index,
        })
    }
}

fn read_u32(bytes: &[u8]) -> Result<u32> {
    let array: [u8; 4] = bytes
        .try_into()
        .map_err(|e| compression_error("block header", &e))?;
    Ok(u32::from_le_bytes(array))
}

impl Compressor for BwtPipeline {
    fn name(&self) -> &'static str {
        "bwt"
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let length = u32::try_from(bytes.len()).map_err(|e| compression_error("block header", &e))?;

        let block = bwt::forward(bytes);
        let primary_index =
            u32::try_from(block.primary_index).map_err(|e| compression_error("block header", &e))?;
        let moved = mtf::encode(&block.last_column);
        let symbols = rle::encode(&moved);

        let mut model = FrequencyModel::new(rle::ALPHABET_SIZE);
        let mut encoder = Encoder::new();
        for &symbol in &symbols {
            encoder.encode(&mut model, usize::from(symbol));
        }
        let payload = encoder.finish();

        let mut output = Vec::with_capacity(HEADER_LEN + payload.len());
        output.extend_from_slice(&length.to_le_bytes());
        output.extend_from_slice(&primary_index.to_le_bytes());
        output.extend_from_slice(&payload);
        Ok(output)
    }
}
