//! The construction graph and its acyclicity resolver.
//!
//! `m` vertices, an adjacency list per vertex, parallel edges and self-loops allowed by design —
//! the cycle check below treats a second visit to any vertex (by any route) as a cycle, which is
//! exactly what a self-loop or a duplicate edge produces.

use crate::stats::{stat_add, stat_add_bytes, stat_set_max, Stats};

#[derive(Debug, Clone, Copy)]
struct Edge {
    to: u32,
    label: u32,
}

#[derive(Debug, Clone, Default)]
struct Vertex {
    value: Option<u32>,
    visited: bool,
    edges: Vec<Edge>,
}

/// An undirected multigraph over `[0, m)`, built fresh for each construction trial and
/// [`wipe`](Graph::wipe)d (not reallocated) between trials.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
}

impl Graph {
    /// An empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Number of vertices currently allocated.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Grow to at least `m` vertices; never shrinks. Newly added vertices start unassigned.
    pub fn ensure_vertices(&mut self, m: usize, stats: &mut Stats) {
        if m > self.vertices.len() {
            let before_cap = self.vertices.capacity();
            self.vertices.resize_with(m, Vertex::default);
            let after_cap = self.vertices.capacity();
            if after_cap != before_cap {
                stat_add!(stats, vertex_vec_reallocations, 1);
                stat_add_bytes!(stats, (after_cap - before_cap) * std::mem::size_of::<Vertex>());
            }
        }
    }

    /// Reset every vertex to unassigned/unvisited/edge-free, keeping edge-list capacity.
    pub fn wipe(&mut self) {
        for v in &mut self.vertices {
            v.value = None;
            v.visited = false;
            v.edges.clear();
        }
    }

    /// Insert one directed edge `u -> v` labeled `label`.
    pub fn connect(&mut self, u: u32, v: u32, label: u32, stats: &mut Stats) {
        let before_cap = self.vertices[u as usize].edges.capacity();
        self.vertices[u as usize].edges.push(Edge { to: v, label });
        let after_cap = self.vertices[u as usize].edges.capacity();
        if after_cap != before_cap {
            stat_add!(stats, edge_list_reallocations, 1);
            stat_add_bytes!(stats, (after_cap - before_cap) * std::mem::size_of::<Edge>());
        }
    }

    /// Insert a symmetric edge pair `u <-> v`, both labeled `label` (one input key produces
    /// exactly this pair).
    pub fn biconnect(&mut self, u: u32, v: u32, label: u32, stats: &mut Stats) {
        self.connect(u, v, label, stats);
        self.connect(v, u, label, stats);
    }

    /// Reserve `hint` edge slots per vertex up front, trading memory for fewer reallocations.
    pub fn reserve_edges_per_vertex(&mut self, hint: usize, stats: &mut Stats) {
        for v in &mut self.vertices {
            let before_cap = v.edges.capacity();
            if before_cap < hint {
                v.edges.reserve(hint - before_cap);
                let after_cap = v.edges.capacity();
                stat_add_bytes!(stats, (after_cap - before_cap) * std::mem::size_of::<Edge>());
            }
        }
    }

    /// Record the smallest/largest per-vertex edge-list capacity into `stats`.
    pub fn record_edge_capacity_extremes(&self, stats: &mut Stats) {
        if self.vertices.is_empty() {
            return;
        }
        let mut min = usize::MAX;
        let mut max = 0usize;
        for v in &self.vertices {
            min = min.min(v.edges.capacity());
            max = max.max(v.edges.capacity());
        }
        stat_set_max!(stats, max_edge_capacity, max);
        #[cfg(feature = "stats")]
        {
            if stats.min_edge_capacity == 0 || (min as u64) < stats.min_edge_capacity {
                stats.min_edge_capacity = min as u64;
            }
        }
        #[cfg(not(feature = "stats"))]
        {
            let _ = min;
        }
    }

    /// The acyclicity check with simultaneous vertex labeling.
    ///
    /// Returns the compacted value array `g[0..m)` on success, or `None` if a cycle was found.
    /// Traversal is iterative (an explicit work stack), and a vertex is marked visited the
    /// instant it is *discovered* rather than when it is popped: that ordering, not marking on
    /// pop, is what catches every cycle shape (self-loops, parallel edges, and two distinct
    /// already-processed neighbors both reaching the same pending vertex).
    pub fn resolve(&mut self, m: u32, stats: &mut Stats) -> Option<Vec<u32>> {
        let mut stack: Vec<(u32, Option<u32>)> = Vec::new();
        for r in 0..self.vertices.len() {
            if self.vertices[r].visited {
                continue;
            }
            self.vertices[r].visited = true;
            self.vertices[r].value = Some(0);
            stack.push((r as u32, None));

            while let Some((u, parent)) = stack.pop() {
                stat_add!(stats, vertices_explored, 1);
                let mut skipped_parent = false;
                let gu = self.vertices[u as usize].value.expect("discovered vertex has a value");
                let edges = self.vertices[u as usize].edges.clone();
                for edge in edges {
                    let w = edge.to;
                    if Some(w) == parent && !skipped_parent {
                        skipped_parent = true;
                        continue;
                    }
                    if self.vertices[w as usize].visited {
                        return None;
                    }
                    let gw = (edge.label as i64 - gu as i64).rem_euclid(m as i64) as u32;
                    self.vertices[w as usize].visited = true;
                    self.vertices[w as usize].value = Some(gw);
                    stack.push((w, Some(u)));
                }
            }
        }

        let mut g = Vec::with_capacity(self.vertices.len());
        for v in &self.vertices {
            g.push(v.value.unwrap_or(0));
        }
        Some(g)
    }
}
