//! Adaptive arithmetic coding with an order-0 frequency model
//!
//! Integer coder with 32-bit registers and deferred underflow bits. The
//! model starts flat and adapts after every symbol, halving its counts once
//! the total passes [`MAX_TOTAL`].

use bitvec::prelude::*;

use crate::io::error::{Result, compression_error};

const CODE_BITS: u32 = 32;
const TOP: u64 = (1 << CODE_BITS) - 1;
const HALF: u64 = 1 << (CODE_BITS - 1);
const QUARTER: u64 = 1 << (CODE_BITS - 2);

/// Frequency added to a symbol each time it is coded
pub const INCREMENT: u32 = 32;
/// Model total above which every count is halved (must stay below a quarter range)
pub const MAX_TOTAL: u32 = 1 << 16;

/// Adaptive symbol frequencies stored in a Fenwick tree
#[derive(Clone, Debug)]
pub struct FrequencyModel {
    frequencies: Vec<u32>,
    tree: Vec<u32>,
    total: u32,
}

impl FrequencyModel {
    /// Create a model giving every symbol a count of one
    pub fn new(alphabet_size: usize) -> Self {
        let mut model = Self {
            frequencies: vec![1; alphabet_size],
            tree: vec![0; alphabet_size + 1],
            total: 0,
        };
        model.rebuild();
        model
    }

    fn rebuild(&mut self) {
        self.tree.iter_mut().for_each(|node| *node = 0);
        self.total = 0;
        for symbol in 0..self.frequencies.len() {
            let frequency = self.frequencies.get(symbol).copied().unwrap_or(0);
            self.add(symbol, frequency);
        }
    }

    fn add(&mut self, symbol: usize, amount: u32) {
        let mut node = symbol + 1;
        while let Some(slot) = self.tree.get_mut(node) {
            *slot += amount;
            node += node & node.wrapping_neg();
        }
        self.total += amount;
    }

    /// Sum of frequencies of all symbols below `symbol`
    pub fn cumulative(&self, symbol: usize) -> u32 {
        let mut node = symbol;
        let mut sum = 0;
        while node > 0 {
            sum += self.tree.get(node).copied().unwrap_or(0);
            node &= node - 1;
        }
        sum
    }

    /// Frequency of a single symbol
    pub fn frequency(&self, symbol: usize) -> u32 {
        self.frequencies.get(symbol).copied().unwrap_or(0)
    }

    /// Sum of all frequencies
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Find the symbol whose cumulative interval contains `target`
    pub fn find(&self, target: u32) -> usize {
        let size = self.frequencies.len();
        let mut position = 0;
        let mut remaining = target;
        let mut step = size.next_power_of_two();

        while step > 0 {
            let next = position + step;
            if let Some(&value) = self.tree.get(next) {
                if value <= remaining {
                    position = next;
                    remaining -= value;
                }
            }
            step >>= 1;
        }

        position.min(size.saturating_sub(1))
    }

    /// Record one more occurrence of `symbol`
    pub fn update(&mut self, symbol: usize) {
        if let Some(frequency) = self.frequencies.get_mut(symbol) {
            *frequency += INCREMENT;
        }
        self.add(symbol, INCREMENT);

        if self.total > MAX_TOTAL {
            self.frequencies
                .iter_mut()
                .for_each(|frequency| *frequency = frequency.div_ceil(2));
            self.rebuild();
        }
    }
}

/// Arithmetic encoder writing into a bit vector
pub struct Encoder {
    low: u64,
    high: u64,
    pending: usize,
    bits: BitVec<u8, Msb0>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Create an encoder spanning the full code range
    pub fn new() -> Self {
        Self {
            low: 0,
            high: TOP,
            pending: 0,
            bits: BitVec::new(),
        }
    }

    fn emit(&mut self, bit: bool) {
        self.bits.push(bit);
        for _ in 0..self.pending {
            self.bits.push(!bit);
        }
        self.pending = 0;
    }

    /// Narrow the interval to `symbol` and adapt the model
    pub fn encode(&mut self, model: &mut FrequencyModel, symbol: usize) {
        let range = self.high - self.low + 1;
        let total = u64::from(model.total());
        let symbol_low = u64::from(model.cumulative(symbol));
        let symbol_high = symbol_low + u64::from(model.frequency(symbol));

        self.high = self.low + range * symbol_high / total - 1;
        self.low += range * symbol_low / total;

        loop {
            if self.high < HALF {
                self.emit(false);
            } else if self.low >= HALF {
                self.emit(true);
                self.low -= HALF;
                self.high -= HALF;
            } else if self.low >= QUARTER && self.high < HALF + QUARTER {
                self.pending += 1;
                self.low -= QUARTER;
                self.high -= QUARTER;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
        }

        model.update(symbol);
    }

    /// Flush the final interval and return the packed bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.pending += 1;
        let bit = self.low >= QUARTER;
        self.emit(bit);
        self.bits.into_vec()
    }
}

/// Arithmetic decoder reading from packed bytes
pub struct Decoder<'a> {
    low: u64,
    high: u64,
    value: u64,
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> Decoder<'a> {
    /// Prime the decoder with the first code word of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        let mut decoder = Self {
            low: 0,
            high: TOP,
            value: 0,
            bits: bytes.view_bits::<Msb0>(),
            position: 0,
        };
        for _ in 0..CODE_BITS {
            decoder.value = (decoder.value << 1) | decoder.next_bit();
        }
        decoder
    }

    // Reading past the end yields zeros
    fn next_bit(&mut self) -> u64 {
        let bit = self.bits.get(self.position).is_some_and(|b| *b);
        self.position += 1;
        u64::from(bit)
    }

    /// Decode one symbol and adapt the model
    ///
    /// # Errors
    ///
    /// Returns an error if the code value falls outside the current interval,
    /// which only happens for corrupted input
    pub fn decode(&mut self, model: &mut FrequencyModel) -> Result<usize> {
        let range = self.high - self.low + 1;
        let total = u64::from(model.total());
        let offset = self.value.checked_sub(self.low).ok_or_else(|| {
            compression_error("arithmetic decode", &"code value below interval")
        })?;
        let target = ((offset + 1) * total - 1) / range;
        let target = u32::try_from(target)
            .map_err(|e| compression_error("arithmetic decode", &e))?;
        let symbol = model.find(target);

        let symbol_low = u64::from(model.cumulative(symbol));
        let symbol_high = symbol_low + u64::from(model.frequency(symbol));
        self.high = self.low + range * symbol_high / total - 1;
        self.low += range * symbol_low / total;

        loop {
            if self.high < HALF {
                // Nothing to subtract
            } else if self.low >= HALF {
                self.low -= HALF;
                self.high -= HALF;
                self.value -= HALF;
            } else if self.low >= QUARTER && self.high < HALF + QUARTER {
                self.low -= QUARTER;
                self.high -= QUARTER;
                self.value -= QUARTER;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
            self.value = (self.value << 1) | self.next_bit();
        }

        model.update(symbol);
        Ok(symbol)
    }
}
