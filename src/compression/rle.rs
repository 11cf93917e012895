//! Zero-run coding of move-to-front output
//!
//! Runs of zeros are written as bijective base-2 numbers using two digit
//! symbols, least significant digit first. Non-zero bytes are shifted up by one
//! so the digits can sit at the bottom of the alphabet.

use crate::io::error::{Result, compression_error};

/// Run digit worth one unit of the current weight
pub const RUN_A: u16 = 0;
/// Run digit worth two units of the current weight
pub const RUN_B: u16 = 1;
/// Terminates a block
pub const END_OF_BLOCK: u16 = 257;
/// Number of distinct symbols produced by [`encode`]
pub const ALPHABET_SIZE: usize = 258;

fn push_run(symbols: &mut Vec<u16>, mut run: usize) {
    while run > 0 {
        if run & 1 == 1 {
            symbols.push(RUN_A);
            run = (run - 1) / 2;
        } else {
            symbols.push(RUN_B);
            run = (run - 2) / 2;
        }
    }
}

/// Encode bytes into the run-length alphabet, terminated by [`END_OF_BLOCK`]
pub fn encode(input: &[u8]) -> Vec<u16> {
    let mut symbols = Vec::with_capacity(input.len() / 2 + 1);
    let mut run = 0;

    for &byte in input {
        if byte == 0 {
            run += 1;
        } else {
            push_run(&mut symbols, run);
            run = 0;
            symbols.push(u16::from(byte) + 1);
        }
    }
    push_run(&mut symbols, run);
    symbols.push(END_OF_BLOCK);

    symbols
}

/// Invert [`encode`]
///
/// # Errors
///
/// Returns an error if a symbol lies outside the alphabet or the block is not
/// terminated
pub fn decode(symbols: &[u16]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(symbols.len());
    let mut run = 0usize;
    let mut weight = 1usize;

    for &symbol in symbols {
        match symbol {
            RUN_A | RUN_B => {
                run += weight * usize::from(symbol + 1);
                weight *= 2;
            }
            2..=256 => {
                output.resize(output.len() + run, 0);
                run = 0;
                weight = 1;
                output.push((symbol - 1) as u8);
            }
            END_OF_BLOCK => {
                output.resize(output.len() + run, 0);
                return Ok(output);
            }
            _ => {
                return Err(compression_error(
                    "run-length decode",
                    &format!("symbol {symbol} outside alphabet"),
                ));
            }
        }
    }

    Err(compression_error(
        "run-length decode",
        &"missing end-of-block symbol",
    ))
}
