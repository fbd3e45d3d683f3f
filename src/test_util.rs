//! Hashers with controlled output for tests.

use alloc::rc::Rc;
use core::cell::Cell;
use core::hash::BuildHasher;
use core::hash::Hasher;

use rand::TryRngCore;
use rand::rngs::OsRng;
use siphasher::sip::SipHasher;

/// Keyed SipHash with random keys, fixed per builder.
#[derive(Clone)]
pub struct SipState {
    k0: u64,
    k1: u64,
}

impl Default for SipState {
    fn default() -> Self {
        let mut rng = OsRng;
        Self {
            k0: rng.try_next_u64().unwrap_or(0),
            k1: rng.try_next_u64().unwrap_or(0),
        }
    }
}

impl BuildHasher for SipState {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new_with_keys(self.k0, self.k1)
    }
}

/// Hashes every key to 0.
#[derive(Clone, Copy, Default)]
pub struct ZeroState;

pub struct ZeroHasher;

impl Hasher for ZeroHasher {
    fn finish(&self) -> u64 {
        0
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

impl BuildHasher for ZeroState {
    type Hasher = ZeroHasher;

    fn build_hasher(&self) -> Self::Hasher {
        ZeroHasher
    }
}

/// Hashes integer keys to themselves, so tests can pick slots directly.
#[derive(Clone, Copy, Default)]
pub struct IdentityState;

#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = self.0.rotate_left(8) ^ byte as u64;
        }
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = n as u64;
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_usize(&mut self, n: usize) {
        self.0 = n as u64;
    }
}

impl BuildHasher for IdentityState {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher::default()
    }
}

/// SipHash that counts how many hashers were built, i.e. how many keys were
/// hashed.
#[derive(Clone, Default)]
pub struct CountingState {
    calls: Rc<Cell<usize>>,
}

impl CountingState {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl BuildHasher for CountingState {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        self.calls.set(self.calls.get() + 1);
        SipHasher::new()
    }
}
