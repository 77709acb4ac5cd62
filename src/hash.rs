//! The salted hash-function family.
//!
//! Unlike an off-the-shelf whole-key hash, this is a per-byte-position salted polynomial:
//! `sum(key[i] * salt[i]) mod m`. Salt entries are drawn lazily from the caller's RNG the first
//! time a position is needed and then frozen for the lifetime of the current modulus.

use rand::Rng;

use crate::stats::{stat_add, stat_add_bytes, Stats};

/// One half of the two-hash family used to place a key's two graph edges.
///
/// `h1` and `h2` are independent `HashFn` instances sharing an RNG handle but never sharing salt
/// state.
#[derive(Debug, Clone, Default)]
pub struct HashFn {
    salt: Vec<u64>,
    modulus: u64,
}

impl HashFn {
    /// An empty hash function with modulus 0 (must be [`reset`](HashFn::reset) before use).
    pub fn new() -> Self {
        Self {
            salt: Vec::new(),
            modulus: 0,
        }
    }

    /// Set the modulus and drop the trained salt length to zero, keeping the buffer's capacity.
    /// Invoked at the start of every construction trial so salts are regenerated from scratch.
    pub fn reset(&mut self, modulus: u64) {
        self.modulus = modulus;
        self.salt.clear();
    }

    /// Number of byte positions this hash function has trained salt for.
    #[inline]
    pub fn salt_len(&self) -> usize {
        self.salt.len()
    }

    /// The modulus this hash function currently reduces into.
    #[inline]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Build-time hash: extends the salt (drawing from `rng`) if `key` is longer than any key
    /// seen so far, then reduces `sum(key[i] * salt[i])` mod `m`.
    pub fn hash(&mut self, key: &[u8], rng: &mut impl Rng, stats: &mut Stats) -> u64 {
        if key.len() > self.salt.len() {
            let before_cap = self.salt.capacity();
            self.salt.reserve(key.len() - self.salt.len());
            while self.salt.len() < key.len() {
                self.salt.push(rng.gen_range(0..self.modulus.max(1)));
                stat_add!(stats, randomness_calls, 1);
            }
            let after_cap = self.salt.capacity();
            if after_cap != before_cap {
                stat_add_bytes!(stats, (after_cap - before_cap) * std::mem::size_of::<u64>());
            }
        }
        stat_add!(stats, hashes_computed, 1);
        self.reduce(key)
    }

    /// Lookup-time hash: never draws new salt. Returns `None` if `key` is longer than the
    /// trained salt (no inserted key had that length, so the correct answer is "not found"
    /// without perturbing determinism by touching an RNG that lookup doesn't even have).
    pub fn hash_const(&self, key: &[u8]) -> Option<u64> {
        if key.len() > self.salt.len() {
            return None;
        }
        Some(self.reduce(key))
    }

    #[inline]
    fn reduce(&self, key: &[u8]) -> u64 {
        let mut acc: u128 = 0;
        for (i, &byte) in key.iter().enumerate() {
            acc += byte as u128 * self.salt[i] as u128;
        }
        (acc % self.modulus.max(1) as u128) as u64
    }
}
