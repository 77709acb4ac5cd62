//! Build-time statistics, gated behind the `stats` feature.
//!
//! `Stats` always exists and is always readable; its fields are simply never incremented unless
//! the `stats` feature is enabled, so a disabled build pays zero runtime cost and every reader
//! sees zero-initialized counters.

/// Counters gathered during one [`crate::builder::Builder::build`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of trial iterations attempted (successful + failed).
    pub iterations: u64,
    /// Total vertices visited across all `resolve` calls (successful and aborted trials).
    pub vertices_explored: u64,
    /// Number of values drawn from the caller's RNG.
    pub randomness_calls: u64,
    /// Number of per-key hash evaluations performed (`h1` + `h2`, summed across all trials).
    pub hashes_computed: u64,
    /// `m` at the moment construction finished (success) or gave up (failure).
    pub final_graph_size: u64,
    /// Longest key length seen by the construction loop.
    pub max_key_length: u64,
    /// Smallest per-vertex edge-list capacity observed at the end of the last trial.
    pub min_edge_capacity: u64,
    /// Largest per-vertex edge-list capacity observed at the end of the last trial.
    pub max_edge_capacity: u64,
    /// Number of times a vertex's edge list reallocated to grow.
    pub edge_list_reallocations: u64,
    /// Number of times the graph's vertex vector reallocated to grow.
    pub vertex_vec_reallocations: u64,
    /// Net bytes currently attributable to the graph + hash state (best-effort estimate).
    pub net_bytes_allocated: u64,
    /// Total bytes ever allocated across all trials (best-effort estimate, ignores frees).
    pub total_bytes_allocated: u64,
    /// Number of times the input collector's backing `Vec` grew.
    pub input_growth_events: u64,
    /// Current capacity (in keys) of the input collector's backing `Vec`.
    pub input_capacity: u64,
    /// Number of `add_safe` calls that found an existing byte-equal key.
    pub safe_add_dedupe_hits: u64,
    /// Number of `add_safe` calls that inserted a genuinely new key.
    pub safe_add_dedupe_misses: u64,
}

impl Stats {
    /// A fresh, all-zero counter set.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "stats")]
macro_rules! stat_add {
    ($stats:expr, $field:ident, $amount:expr) => {
        $stats.$field += $amount as u64;
    };
}
#[cfg(not(feature = "stats"))]
macro_rules! stat_add {
    ($stats:expr, $field:ident, $amount:expr) => {
        let _ = (&$stats, &$amount);
    };
}
pub(crate) use stat_add;

#[cfg(feature = "stats")]
macro_rules! stat_set_max {
    ($stats:expr, $field:ident, $value:expr) => {
        let v = $value as u64;
        if v > $stats.$field {
            $stats.$field = v;
        }
    };
}
#[cfg(not(feature = "stats"))]
macro_rules! stat_set_max {
    ($stats:expr, $field:ident, $value:expr) => {
        let _ = (&$stats, &$value);
    };
}
pub(crate) use stat_set_max;

/// Records a capacity-growth of `delta_bytes` against both the net and total byte counters.
/// "Net" and "total" coincide in this crate since none of its growable buffers ever shrink; the
/// distinction exists for implementations that do reclaim memory.
#[cfg(feature = "stats")]
macro_rules! stat_add_bytes {
    ($stats:expr, $delta_bytes:expr) => {
        let delta = $delta_bytes as u64;
        $stats.net_bytes_allocated += delta;
        $stats.total_bytes_allocated += delta;
    };
}
#[cfg(not(feature = "stats"))]
macro_rules! stat_add_bytes {
    ($stats:expr, $delta_bytes:expr) => {
        let _ = (&$stats, &$delta_bytes);
    };
}
pub(crate) use stat_add_bytes;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_zero() {
        assert_eq!(Stats::new(), Stats::default());
        assert_eq!(Stats::new().iterations, 0);
        assert_eq!(Stats::new().safe_add_dedupe_hits, 0);
    }
}
