//! Weighted graph model of an Ising instance: node field weights, a sparse
//! edge-weight store and the adjacency list derived from it.

use crate::errors::{IsingError, IsingResult};
use crate::format::SpinConfiguration;
use std::collections::BTreeMap;
use tracing::warn;

/// An interaction edge in the orientation the input declared it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub weight: i64,
}

/// Sparse `n × n` edge-weight store keyed by `(row, col)`.
///
/// Each edge occupies the slot of its declared orientation only. Repeated
/// records for one slot are summed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeStore {
    n: usize,
    entries: BTreeMap<(usize, usize), i64>,
}

impl EdgeStore {
    pub fn from_edges(n: usize, edges: &[Edge]) -> Self {
        let mut entries = BTreeMap::new();
        for e in edges {
            *entries.entry((e.a, e.b)).or_insert(0) += e.weight;
        }
        Self { n, entries }
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    /// Raw slot value, 0 if unset.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.entries.get(&(row, col)).copied().unwrap_or(0)
    }

    /// Nonzero slots in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.entries
            .iter()
            .filter(|(_, w)| **w != 0)
            .map(|(&(r, c), &w)| (r, c, w))
    }

    /// Number of nonzero slots.
    pub fn nnz(&self) -> usize {
        self.iter().count()
    }
}

/// The graph an Ising instance describes.
#[derive(Debug, Clone, Default)]
pub struct IsingTree {
    /// Problem name from the header.
    pub name: String,
    /// Weight-record count declared by the header (informational).
    pub number_of_weights: usize,
    node_weights: Vec<i64>,
    edges: Vec<Edge>,
    store: EdgeStore,
    adjacency: Vec<Vec<(usize, i64)>>,
}

impl IsingTree {
    /// Number of spins (nodes).
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.node_weights.len()
    }

    /// Number of declared edge records.
    #[inline(always)]
    pub fn m(&self) -> usize {
        self.edges.len()
    }

    pub fn node_weights(&self) -> &[i64] {
        &self.node_weights
    }

    /// Edge records in input order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn store(&self) -> &EdgeStore {
        &self.store
    }

    /// Field weight of `node`. Panics if `node` is out of range.
    #[inline(always)]
    pub fn field_weight(&self, node: usize) -> i64 {
        self.node_weights[node]
    }

    /// Interaction weight of the unordered pair, 0 when there is no edge.
    pub fn edge_weight(&self, a: usize, b: usize) -> i64 {
        if a == b {
            return 0;
        }
        match self.store.get(a, b) {
            0 => self.store.get(b, a),
            w => w,
        }
    }

    /// Nodes joined to `node` by a nonzero edge, with the edge weight.
    #[inline(always)]
    pub fn neighbors(&self, node: usize) -> &[(usize, i64)] {
        &self.adjacency[node]
    }

    /// Ising energy `Σ h_i s_i + Σ J_ab s_a s_b` of a complete assignment.
    pub fn energy(&self, spins: &SpinConfiguration) -> IsingResult<i64> {
        if spins.len() != self.n() {
            return Err(IsingError::SizeMismatch { expected: self.n(), found: spins.len() });
        }
        let field: i64 = self
            .node_weights
            .iter()
            .zip(spins.iter())
            .map(|(&h, s)| h * s.value())
            .sum();
        let interaction: i64 = self
            .store
            .iter()
            .map(|(r, c, w)| w * spins[r].value() * spins[c].value())
            .sum();
        Ok(field + interaction)
    }

    /// Check the nonzero edges form a forest; returns the component count.
    ///
    /// Cycles, repeated pairs and pairs stored in both orientations are
    /// rejected.
    pub fn validate_forest(&self) -> IsingResult<usize> {
        if self.n() == 0 {
            return Err(IsingError::EmptyModel);
        }
        let mut uf = UnionFind::new(self.n());
        for (a, b, _) in self.store.iter() {
            if !uf.union(a, b) {
                return Err(IsingError::NotAForest { a, b });
            }
        }
        Ok(uf.components)
    }

    // Mutation is reserved for the builder.

    pub(crate) fn reset(&mut self, name: String, spins: usize, weights: usize) {
        self.name = name;
        self.number_of_weights = weights;
        self.node_weights = vec![0; spins];
    }

    pub(crate) fn set_field_weight(&mut self, node: usize, weight: i64) {
        self.node_weights[node] = weight;
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Build the sparse store and the adjacency list from the edge records.
    pub(crate) fn finalize(&mut self) {
        let n = self.n();
        self.edges.retain(|e| {
            let keep = e.a < n && e.b < n;
            if !keep {
                warn!("dropping edge ({}, {}) outside {} spins", e.a, e.b, n);
            }
            keep
        });
        self.store = EdgeStore::from_edges(n, &self.edges);

        let mut adjacency = vec![Vec::new(); n];
        for (a, b, w) in self.store.iter() {
            adjacency[a].push((b, w));
            adjacency[b].push((a, w));
        }
        self.adjacency = adjacency;
    }
}

/// Disjoint sets with path halving and union by size.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect(), size: vec![1; n], components: n }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns false if `a` and `b` were already connected.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        self.components -= 1;
        true
    }
}
