//! chm_mphf — minimal perfect hashing via the Czech-Havas-Majewski acyclic-graph method.
//!
//! - Collect a set of **unique**, non-empty byte-string keys into a [`Keys`] collector.
//! - [`Builder::build`] them against an explicit RNG handle: two salted hash functions place
//!   each key as an edge in a graph over `m >= n + 1` vertices; if the induced graph has a
//!   cycle the loop retries with fresh salt, growing `m` geometrically on repeated failure.
//! - The resulting [`Mphf`] answers `lookup` in O(key length): two hash evaluations, one
//!   table sum, one byte-compare against the stored key (no false positives survive).

mod builder;
mod graph;
mod hash;
mod keys;
mod stats;
mod table;
mod warn;

pub use builder::{BuildConfig, BuildFailure, Builder, MphError, GROWTH_DEN, GROWTH_NUM, GROW_EVERY, ITER_MAX_MULT};
pub use keys::{KeyRecord, Keys};
pub use stats::Stats;
pub use table::Mphf;
