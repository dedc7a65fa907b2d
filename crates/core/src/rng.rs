//! RNG module - seeded generator and the 7-piece bag
//!
//! The sequencer hands out pieces from a bag holding one of each kind. When the
//! bag runs empty it is refilled by drawing kinds one at a time, uniformly, from
//! the ones not yet placed in the new bag.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a value in `[0, max)`.
    ///
    /// Scales from the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Bag-of-seven piece sequencer
#[derive(Debug, Clone)]
pub struct Sequencer {
    /// Remaining kinds of the current bag; drawn from the end
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl Sequencer {
    /// Create a sequencer with the given seed. The first bag is filled on the
    /// first draw.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    /// A random permutation of all seven kinds
    fn shuffled_bag(rng: &mut SimpleRng) -> [PieceKind; 7] {
        let mut candidates: ArrayVec<PieceKind, 7> = PieceKind::ALL.into_iter().collect();
        let mut bag = PieceKind::ALL;
        for slot in bag.iter_mut() {
            let pick = rng.next_range(candidates.len() as u32) as usize;
            *slot = candidates.remove(pick);
        }
        bag
    }

    /// Draw the next kind, refilling the bag first if it is empty
    pub fn next(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.bag = ArrayVec::from(Self::shuffled_bag(&mut self.rng));
        }
    }

    /// The kind the next call to [`Sequencer::next`] will return.
    ///
    /// When the bag is empty this previews the next bag from a copy of the RNG,
    /// so it is consistent with the refill `next` will perform.
    pub fn peek(&self) -> PieceKind {
        match self.bag.last() {
            Some(&kind) => kind,
            None => {
                let mut preview = self.rng.clone();
                Self::shuffled_bag(&mut preview)[6]
            }
        }
    }

    /// Kinds left in the current bag
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    /// Current RNG state; a new sequencer built from it continues the stream
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(1)
    }
}
