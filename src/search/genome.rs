//! Per-pixel binary class assignments

use bitvec::prelude::*;
use rand::Rng;

/// One class bit per pixel; set bits belong to class A
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Assignment {
    bits: BitVec,
}

impl Assignment {
    /// Wrap an existing bit vector
    pub const fn from_bits(bits: BitVec) -> Self {
        Self { bits }
    }

    /// Build from a slice of booleans
    pub fn from_bools(values: &[bool]) -> Self {
        Self {
            bits: values.iter().copied().collect(),
        }
    }

    /// Every position in the same class
    pub fn uniform(len: usize, class_a: bool) -> Self {
        Self {
            bits: BitVec::repeat(class_a, len),
        }
    }

    /// Independent fair coin per position
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..len).map(|_| rng.random::<bool>()).collect(),
        }
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the assignment covers no positions
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Class bit at `index`
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|bit| *bit)
    }

    /// Positions assigned to class A
    pub fn class_a_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Borrow the underlying bits
    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }

    /// Mutably borrow the underlying bits
    pub fn bits_mut(&mut self) -> &mut BitSlice {
        &mut self.bits
    }

    /// Unwrap into the underlying bit vector
    pub fn into_bits(self) -> BitVec {
        self.bits
    }
}
