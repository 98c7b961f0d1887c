//! Union-find over `0..n` with union by size and full path compression.
//!
//! Consumed by the msb-MST construction and by the component-tree builder.
//! Amortized inverse-Ackermann per operation; no deletes.

/// A disjoint-set forest whose items are the integers `0..n`.
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// Parent of each node; a node is a root iff it is its own parent.
    parent: Vec<usize>,
    /// Subtree size, maintained for roots only.
    size: Vec<usize>,
}

impl UnionFind {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Canonical item of the set containing `v`. Two items are in the same
    /// set iff their finds agree.
    pub fn find(&mut self, v: usize) -> usize {
        let mut root = v;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut current = v;
        while current != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets containing `u` and `v`; the larger set absorbs the
    /// smaller one.
    pub fn union(&mut self, u: usize, v: usize) {
        let root_u = self.find(u);
        let root_v = self.find(v);
        if root_u == root_v {
            return;
        }
        if self.size[root_u] < self.size[root_v] {
            self.parent[root_u] = root_v;
            self.size[root_v] += self.size[root_u];
        } else {
            self.parent[root_v] = root_u;
            self.size[root_u] += self.size[root_v];
        }
    }
}
