//! The construction loop: drives retries, grows `m` on failure, and emits the final
//! [`crate::table::Mphf`].

use rand::Rng;
use thiserror::Error;

use crate::graph::Graph;
use crate::hash::HashFn;
use crate::keys::Keys;
use crate::stats::Stats;
use crate::table::Mphf;
use crate::warn;

/// Gives up when `m` exceeds `ITER_MAX_MULT * (n + 1)`.
pub const ITER_MAX_MULT: u64 = 650;
/// Consider growing `m` every this many failed trials.
pub const GROW_EVERY: u64 = 5;
/// Numerator of the multiplicative growth factor (~1.05 with [`GROWTH_DEN`]).
pub const GROWTH_NUM: u64 = 1075;
/// Denominator of the multiplicative growth factor.
pub const GROWTH_DEN: u64 = 1024;

/// Tunables for one [`Builder::build`] call.
pub struct BuildConfig {
    /// Gives up when `m` exceeds `iter_max_mult * (n + 1)`. Defaults to [`ITER_MAX_MULT`].
    pub iter_max_mult: u64,
    /// Consider growing `m` every this many failed trials. Defaults to [`GROW_EVERY`].
    pub grow_every: u64,
    /// Growth factor numerator/denominator. Defaults to [`GROWTH_NUM`]/[`GROWTH_DEN`].
    pub growth_num: u64,
    pub growth_den: u64,
    /// Per-vertex edge-list capacity hint; 0 disables preallocation.
    pub edge_capacity_hint: usize,
    /// Warning sink installed on the resulting table (independent of any sink already installed
    /// on the [`Keys`] collector, since a collector's sink does not survive `build`'s ownership
    /// transfer).
    pub on_warning: Option<Box<dyn Fn(&str)>>,
}

impl std::fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildConfig")
            .field("iter_max_mult", &self.iter_max_mult)
            .field("grow_every", &self.grow_every)
            .field("growth_num", &self.growth_num)
            .field("growth_den", &self.growth_den)
            .field("edge_capacity_hint", &self.edge_capacity_hint)
            .field("on_warning", &self.on_warning.as_ref().map(|_| "<closure>"))
            .finish()
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            iter_max_mult: ITER_MAX_MULT,
            grow_every: GROW_EVERY,
            growth_num: GROWTH_NUM,
            growth_den: GROWTH_DEN,
            edge_capacity_hint: 4,
            on_warning: None,
        }
    }
}

/// The construction loop's failure modes.
#[derive(Debug, Error)]
pub enum MphError {
    /// Construction was attempted over zero keys.
    #[error("cannot build a perfect hash function over zero keys")]
    EmptyInput,
    /// Retries exhausted the iteration cap without finding an acyclic graph.
    #[error("construction did not converge after growing past the iteration cap")]
    Unresolvable,
}

/// Returned on a failed [`Builder::build`]: the typed error plus the input collector, handed
/// back unconsumed.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct BuildFailure<P> {
    pub error: MphError,
    pub keys: Keys<P>,
}

/// Drives the Czech-Havas-Majewski retry-and-grow construction loop.
pub struct Builder {
    cfg: BuildConfig,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// A builder with default tunables.
    pub fn new() -> Self {
        Self {
            cfg: BuildConfig::default(),
        }
    }

    /// Replace the builder's tunables.
    pub fn with_config(mut self, cfg: BuildConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Attempt construction. On success, `keys` is consumed and its records move into the
    /// returned [`Mphf`]. On failure, `keys` is handed back inside [`BuildFailure`].
    pub fn build<P>(
        self,
        keys: Keys<P>,
        rng: &mut impl Rng,
    ) -> Result<Mphf<P>, BuildFailure<P>> {
        let (records, input_warn_sink, mut stats) = keys.into_records();
        let n = records.len();
        if n == 0 {
            return Err(BuildFailure {
                error: MphError::EmptyInput,
                keys: Keys::from_records(records, input_warn_sink, stats),
            });
        }
        let n_u64 = n as u64;

        let mut m: u64 = n_u64 + 1;
        let mut graph = Graph::new();
        graph.ensure_vertices(m as usize, &mut stats);
        if self.cfg.edge_capacity_hint > 0 {
            graph.reserve_edges_per_vertex(self.cfg.edge_capacity_hint, &mut stats);
        }

        let mut h1 = HashFn::new();
        let mut h2 = HashFn::new();

        let mut scaled = m * self.cfg.growth_den;
        let mut iteration: u64 = 0;
        let cap = self.cfg.iter_max_mult * (n_u64 + 1);

        let g = loop {
            if iteration > 0 && iteration % self.cfg.grow_every == 0 {
                scaled = scaled * self.cfg.growth_num / self.cfg.growth_den;
                let m_next = scaled / self.cfg.growth_den;
                if m_next > m {
                    m = m_next;
                    graph.ensure_vertices(m as usize, &mut stats);
                    if self.cfg.edge_capacity_hint > 0 {
                        graph.reserve_edges_per_vertex(self.cfg.edge_capacity_hint, &mut stats);
                    }
                }
                if m >= cap {
                    warn::emit(
                        self.cfg.on_warning.as_ref(),
                        "construction gave up: m grew past the iteration cap",
                    );
                    return Err(BuildFailure {
                        error: MphError::Unresolvable,
                        keys: Keys::from_records(records, input_warn_sink, stats),
                    });
                }
            }
            iteration += 1;
            #[cfg(feature = "stats")]
            {
                stats.iterations = iteration;
                stats.final_graph_size = m;
            }

            graph.wipe();
            h1.reset(m);
            h2.reset(m);

            for (i, rec) in records.iter().enumerate() {
                let key = rec.key_bytes();
                #[cfg(feature = "stats")]
                {
                    if key.len() as u64 > stats.max_key_length {
                        stats.max_key_length = key.len() as u64;
                    }
                }
                let a = h1.hash(key, rng, &mut stats);
                let b = h2.hash(key, rng, &mut stats);
                graph.biconnect(a as u32, b as u32, i as u32, &mut stats);
            }

            if let Some(g) = graph.resolve(m as u32, &mut stats) {
                graph.record_edge_capacity_extremes(&mut stats);
                break g;
            }
        };

        Ok(Mphf::new(records, h1, h2, g, m as u32, n as u32, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(seed)
    }

    #[test]
    fn empty_input_fails_without_consuming_anything() {
        let keys: Keys<()> = Keys::new();
        let mut r = rng(1);
        let err = Builder::new().build(keys, &mut r).unwrap_err();
        assert!(matches!(err.error, MphError::EmptyInput));
        assert_eq!(err.keys.len(), 0);
    }

    #[test]
    fn small_set_constructs_and_looks_up() {
        let mut keys: Keys<()> = Keys::new();
        for w in ["foo", "bar", "donkey", "mineral", "toaster oven"] {
            keys.add(w.as_bytes(), ());
        }
        let mut r = rng(42);
        let mphf = Builder::new().build(keys, &mut r).expect("should construct");
        assert!(mphf.lookup(b"mineral").is_some());
        assert!(mphf.lookup(b"gronk").is_none());
        assert!(mphf.lookup(b"").is_none());
    }

    #[test]
    fn failure_hands_keys_back_unconsumed() {
        // A duplicate key (inserted via add_no_copy, bypassing add_safe's dedupe) always
        // produces a parallel edge between the same two vertices for every salt the loop tries,
        // which is unconditionally a cycle — so with a tight enough cap this never converges.
        let mut keys: Keys<()> = Keys::new();
        for w in ["a", "b", "c", "d"] {
            keys.add(w.as_bytes(), ());
        }
        keys.add_no_copy(b"a".to_vec(), ());
        let cfg = BuildConfig {
            iter_max_mult: 1,
            grow_every: 1,
            ..Default::default()
        };
        let mut r = rng(5);
        let err = Builder::new()
            .with_config(cfg)
            .build(keys, &mut r)
            .unwrap_err();
        assert!(matches!(err.error, MphError::Unresolvable));
        assert_eq!(err.keys.len(), 5);
    }
}
