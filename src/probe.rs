//! Probe sequences for open addressing.
//!
//! A [`ProbeStrategy`] turns a hash and a slot count into the order in which
//! an [`OpenAddressingTable`] visits slots. Sequences are conceptually
//! unbounded, and every sequence here repeats with period `capacity`. The
//! table therefore never walks more than `capacity` steps.
//!
//! [`OpenAddressingTable`]: crate::OpenAddressingTable

use crate::error::ConfigError;

/// Computes the slot visiting order for a hash in a table of a given size.
///
/// Implementations must be deterministic, and every index they yield must be
/// less than `capacity`. The returned sequence owns its state, so it can be
/// walked while the table's slots are mutated.
pub trait ProbeStrategy {
    /// The sequence of slot indices visited for one hash.
    type Sequence: Iterator<Item = usize>;

    /// Starts the probe sequence for `hash` over `capacity` slots.
    ///
    /// `capacity` is always positive.
    fn probe_sequence(&self, hash: u64, capacity: usize) -> Self::Sequence;
}

/// `index_i = (h + i) mod n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearProbe;

/// Iterator returned by [`LinearProbe`].
#[derive(Debug, Clone)]
pub struct LinearSequence {
    index: usize,
    capacity: usize,
}

impl ProbeStrategy for LinearProbe {
    type Sequence = LinearSequence;

    #[inline]
    fn probe_sequence(&self, hash: u64, capacity: usize) -> LinearSequence {
        LinearSequence {
            index: reduce(hash, capacity),
            capacity,
        }
    }
}

impl Iterator for LinearSequence {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let index = self.index;
        self.index += 1;
        if self.index == self.capacity {
            self.index = 0;
        }
        Some(index)
    }
}

/// `index_i = (h + i²) mod n`.
///
/// For a composite `n` this does not visit every slot: `i² mod n` takes
/// only the quadratic residues of `n`. The table grows when an insert finds
/// no empty slot in the cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadraticProbe;

/// Iterator returned by [`QuadraticProbe`].
#[derive(Debug, Clone)]
pub struct QuadraticSequence {
    start: usize,
    step: u64,
    capacity: usize,
}

impl ProbeStrategy for QuadraticProbe {
    type Sequence = QuadraticSequence;

    #[inline]
    fn probe_sequence(&self, hash: u64, capacity: usize) -> QuadraticSequence {
        QuadraticSequence {
            start: reduce(hash, capacity),
            step: 0,
            capacity,
        }
    }
}

impl Iterator for QuadraticSequence {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let n = self.capacity as u128;
        // (h + i²) mod n == ((h mod n) + (i² mod n)) mod n, widened so i² never wraps.
        let offset = (self.step as u128 * self.step as u128) % n;
        let index = ((self.start as u128 + offset) % n) as usize;
        self.step = self.step.wrapping_add(1);
        Some(index)
    }
}

/// `index_i = ((h mod n) + (h2 mod n) + i) mod n` with `h2 = p − (h mod p)`.
///
/// `p` is the configured prime, 7 by default. `h2` lies in `1..=p`, so it
/// never degenerates to zero. Any positive value is accepted for `p`, but a
/// prime spreads starting offsets best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleHashProbe {
    prime: u64,
}

impl DoubleHashProbe {
    /// The prime used by [`Default`].
    pub const DEFAULT_PRIME: u64 = 7;

    /// Creates a strategy using `prime` for the secondary hash.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collision_maps::ConfigError;
    /// use collision_maps::probe::DoubleHashProbe;
    ///
    /// assert_eq!(DoubleHashProbe::with_prime(11).unwrap().prime(), 11);
    /// assert_eq!(DoubleHashProbe::with_prime(0), Err(ConfigError::ZeroPrime));
    /// ```
    pub fn with_prime(prime: u64) -> Result<Self, ConfigError> {
        if prime == 0 {
            return Err(ConfigError::ZeroPrime);
        }
        Ok(Self { prime })
    }

    /// Returns the prime used for the secondary hash.
    pub fn prime(&self) -> u64 {
        self.prime
    }

    #[inline]
    fn secondary_hash(&self, hash: u64) -> u64 {
        self.prime - hash % self.prime
    }
}

impl Default for DoubleHashProbe {
    fn default() -> Self {
        Self {
            prime: Self::DEFAULT_PRIME,
        }
    }
}

impl ProbeStrategy for DoubleHashProbe {
    type Sequence = LinearSequence;

    #[inline]
    fn probe_sequence(&self, hash: u64, capacity: usize) -> LinearSequence {
        let start = reduce(hash, capacity) + reduce(self.secondary_hash(hash), capacity);
        LinearSequence {
            index: start % capacity,
            capacity,
        }
    }
}

#[inline(always)]
fn reduce(value: u64, capacity: usize) -> usize {
    (value % capacity as u64) as usize
}
