//! The hash table result: stores keys, both frozen salts, and the value array; serves
//! lookups.

use crate::hash::HashFn;
use crate::keys::{KeyRecord, Keys};
use crate::stats::Stats;

/// A constructed minimal perfect hash function over `N` keys.
///
/// `Mphf` owns the key storage, the two frozen hash-function salts, and the value array `g`.
/// Lookups are read-only and safe for concurrent shared access since nothing mutates after
/// construction.
#[derive(Debug, Clone)]
pub struct Mphf<P> {
    keys: Vec<KeyRecord<P>>,
    h1: HashFn,
    h2: HashFn,
    g: Vec<u32>,
    m: u32,
    n: u32,
    stats: Stats,
}

impl<P> Mphf<P> {
    pub(crate) fn new(
        keys: Vec<KeyRecord<P>>,
        h1: HashFn,
        h2: HashFn,
        g: Vec<u32>,
        m: u32,
        n: u32,
        stats: Stats,
    ) -> Self {
        debug_assert_eq!(g.len(), m as usize);
        debug_assert_eq!(keys.len(), n as usize);
        Self {
            keys,
            h1,
            h2,
            g,
            m,
            n,
            stats,
        }
    }

    /// Evaluate the MPHF for `probe`, returning the stored record if `probe` is a key that was
    /// present at construction time.
    ///
    /// A probe whose length was never inserted is rejected up front. Because the construction
    /// guarantees no false collisions only for the original key set, any probe landing on a
    /// valid slot is still verified byte-for-byte against the stored key before being returned
    /// (no false collisions survive the byte comparison).
    #[inline]
    pub fn lookup(&self, probe: &[u8]) -> Option<&KeyRecord<P>> {
        let r1 = self.h1.hash_const(probe)?;
        let r2 = self.h2.hash_const(probe)?;
        // SAFETY net: r1, r2 < self.m == self.g.len() by construction.
        let idx = (self.g[r1 as usize] as u64 + self.g[r2 as usize] as u64) % self.m as u64;
        if idx >= self.n as u64 {
            return None;
        }
        let rec = &self.keys[idx as usize];
        if rec.key_bytes() == probe {
            Some(rec)
        } else {
            None
        }
    }

    /// Number of stored keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether this table holds no keys (never true for a successfully constructed table, since
    /// construction over zero keys fails, but kept for API symmetry with [`Keys::is_empty`]).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The stored keys in assigned-index order.
    #[inline]
    pub fn keys(&self) -> &[KeyRecord<P>] {
        &self.keys
    }

    /// The graph size `m` this table was built with (`m >= len() + 1`).
    #[inline]
    pub fn modulus(&self) -> u32 {
        self.m
    }

    /// Visit every stored key in assigned-index order.
    pub fn apply(&self, mut f: impl FnMut(&[u8], &P)) {
        for r in &self.keys {
            f(r.key_bytes(), &r.payload);
        }
    }

    /// Visit every stored key in assigned-index order with a mutable payload reference.
    pub fn apply_mut(&mut self, mut f: impl FnMut(&[u8], &mut P)) {
        for r in &mut self.keys {
            f(r.key_bytes(), &mut r.payload);
        }
    }

    /// Statistics gathered during construction (all-zero unless the `stats` feature is on).
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Consume the table, handing the key collection back to the caller as a fresh [`Keys`]
    /// collector.
    pub fn recycle_inputs(self) -> Keys<P> {
        Keys::from_records(self.keys, None, self.stats)
    }
}

impl<P: Clone> Mphf<P> {
    /// Like [`Mphf::recycle_inputs`], but clones the key records rather than consuming the
    /// table, leaving it intact.
    pub fn duplicate_inputs(&self) -> Keys<P> {
        Keys::from_records(self.keys.clone(), None, self.stats)
    }
}
