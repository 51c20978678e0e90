//! Identifier generation
//!
//! The patcher never calls a random source directly. It draws identifiers
//! from an [`IdGenerator`], so callers choose between:
//!
//! - [`RandomIds`]: UUID v4 derived, the default for real runs
//! - [`SeededIds`]: reproducible output for a given seed
//! - [`SequentialIds`]: `000..001`, `000..002`, ... for exact-text tests
//!
//! [`IdAllocator`] wraps a generator and guarantees that every identifier it
//! hands out is distinct from the ones already present in the manifest and
//! from each other.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::{Error, Result};
use crate::object_id::ObjectId;

/// Source of fresh object identifiers
pub trait IdGenerator {
    /// Produce the next candidate identifier
    fn generate(&mut self) -> ObjectId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn generate(&mut self) -> ObjectId {
        (**self).generate()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate(&mut self) -> ObjectId {
        (**self).generate()
    }
}

/// Random identifiers from UUID v4
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&mut self) -> ObjectId {
        ObjectId::new()
    }
}

/// Deterministic identifiers from a seeded PRNG
#[derive(Debug, Clone)]
pub struct SeededIds {
    rng: StdRng,
}

impl SeededIds {
    /// Create a generator for `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IdGenerator for SeededIds {
    fn generate(&mut self) -> ObjectId {
        let mut bytes = [0u8; 12];
        self.rng.fill_bytes(&mut bytes);
        ObjectId::from_bytes(bytes)
    }
}

/// Counter-based identifiers
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start counting at 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start counting at `first`
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> ObjectId {
        let id = ObjectId::from_u64(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Hands out identifiers that are unique within one manifest
pub struct IdAllocator<'a> {
    generator: &'a mut dyn IdGenerator,
    taken: HashSet<ObjectId>,
    max_attempts: usize,
}

impl<'a> IdAllocator<'a> {
    /// Create an allocator that avoids every identifier in `taken`
    pub fn new(
        generator: &'a mut dyn IdGenerator,
        taken: impl IntoIterator<Item = ObjectId>,
        max_attempts: usize,
    ) -> Self {
        Self {
            generator,
            taken: taken.into_iter().collect(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Allocate one identifier
    ///
    /// # Errors
    ///
    /// Returns `IdExhausted` when `max_attempts` consecutive draws all
    /// collide.
    pub fn allocate(&mut self) -> Result<ObjectId> {
        for _ in 0..self.max_attempts {
            let candidate = self.generator.generate();
            if self.taken.insert(candidate) {
                return Ok(candidate);
            }
        }
        Err(Error::IdExhausted(self.max_attempts))
    }

    /// Allocate `N` identifiers at once
    pub fn allocate_n<const N: usize>(&mut self) -> Result<[ObjectId; N]> {
        let mut out = [ObjectId::from_bytes([0; 12]); N];
        for slot in out.iter_mut() {
            *slot = self.allocate()?;
        }
        Ok(out)
    }
}
