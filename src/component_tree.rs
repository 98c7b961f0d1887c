//! The component tree of a weighted undirected graph.
//!
//! Leaves correspond 1:1 to vertices; an internal node stands for the
//! connected component that appears once all msb-MST edges up to a given
//! bit-level have been added. A node at level `i` classifies the tentative
//! distances of its unvisited descendants by their bits above position
//! `i − 1`, which is what replaces the global priority queue of Dijkstra's
//! algorithm with per-node bucket scans.
//!
//! Nodes live in one arena addressed by `u32` ids; leaves occupy ids
//! `0..n` so a vertex doubles as its leaf id. Buckets are intrusive
//! doubly-linked lists threaded through the arena: a node sits in at most
//! one bucket at a time and carries the back-pointer to it, so insert and
//! remove are O(1) and FIFO order within a bucket is preserved. Bucket
//! storage exists only while a node is expanded and is released wholesale
//! at the inter-query reset.

use crate::graph::WeightedGraph;
use crate::union_find::UnionFind;
use crate::utils::{bucket_sort_undirected_edges, msb};

pub(crate) const NIL: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    head: u32,
    tail: u32,
}

const EMPTY_BUCKET: Bucket = Bucket {
    head: NIL,
    tail: NIL,
};

#[derive(Debug)]
pub(crate) struct TreeNode {
    /// Vertex id for leaves, component number for internal nodes.
    pub(crate) index: u32,
    pub(crate) parent: u32,
    /// Children in attachment order; the order is part of the contract.
    pub(crate) children: Vec<u32>,
    /// Level `i`; leaves are 0, internal nodes at least 1, strictly
    /// increasing towards the root.
    pub(crate) level: i32,
    /// Number of buckets spanned by this node's distance range.
    pub(crate) delta: u64,
    /// Position of the rightmost leaf of this subtree in the DFS order of
    /// the split-findmin universe.
    pub(crate) last_u: u32,
    pub(crate) num_unvisited: u32,
    pub(crate) num_unvisited_initial: u32,
    pub(crate) visited: bool,
    /// Bucket window [ix0, ix8] and scan cursor, valid while expanded.
    pub(crate) ix0: i64,
    pub(crate) ix8: i64,
    pub(crate) ix: i64,
    bucket_offset: i64,
    buckets: Vec<Bucket>,
    containing_owner: u32,
    containing_slot: u32,
    bucket_next: u32,
    bucket_prev: u32,
}

impl TreeNode {
    fn new(index: u32) -> Self {
        Self {
            index,
            parent: NIL,
            children: Vec::new(),
            level: 0,
            delta: 0,
            last_u: 0,
            num_unvisited: 0,
            num_unvisited_initial: 0,
            visited: false,
            ix0: 0,
            ix8: 0,
            ix: 0,
            bucket_offset: 0,
            buckets: Vec::new(),
            containing_owner: NIL,
            containing_slot: 0,
            bucket_next: NIL,
            bucket_prev: NIL,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug)]
pub(crate) struct ComponentTree {
    pub(crate) nodes: Vec<TreeNode>,
    pub(crate) root: u32,
    /// Component number → arena id, populated during construction.
    internal: Vec<u32>,
}

impl ComponentTree {
    /// Builds the component tree of the given msb-minimum spanning tree
    /// (Algorithm G): sweep the tree edges in ascending msb order,
    /// accumulate same-msb batches with a union-find, and allocate one
    /// internal node per merged component whenever the msb strictly
    /// increases or the sweep ends.
    pub(crate) fn build(mst: &WeightedGraph) -> Self {
        let n = mst.num_vertices();
        let mut tree = Self::with_leaves(n);
        if n == 1 {
            tree.root = 0;
            return tree;
        }

        let edges = bucket_sort_undirected_edges(mst);
        debug_assert_eq!(edges.len(), n - 1, "input is not a spanning tree");

        let mut uf = UnionFind::new(n);
        // canonical vertex → index of the tree node currently representing
        // its component (a leaf vertex until the first merge)
        let mut current: Vec<u32> = (0..n as u32).collect();
        let mut represents_internal = vec![false; n];
        let mut weight_sum: Vec<u64> = vec![0; n];
        let mut new_component: Vec<u32> = vec![0; n];
        let mut component_counter = 0u32;

        // pending canonical endpoints of the current msb batch, in first
        // insertion order
        let mut pending: Vec<usize> = Vec::new();
        let mut in_pending = vec![false; n];
        let mut in_merged = vec![false; n];

        for (i, edge) in edges.iter().enumerate() {
            let canon_source = uf.find(edge.source);
            let canon_target = uf.find(edge.target);
            for canon in [canon_source, canon_target] {
                if !in_pending[canon] {
                    in_pending[canon] = true;
                    pending.push(canon);
                }
            }

            let merged_sum =
                weight_sum[canon_source] + weight_sum[canon_target] + edge.weight as u64;
            uf.union(edge.source, edge.target);
            weight_sum[uf.find(edge.source)] = merged_sum;

            let batch_msb = msb(edge.weight);
            let flush = match edges.get(i + 1) {
                Some(next) => batch_msb < msb(next.weight),
                None => true,
            };
            if !flush {
                continue;
            }

            // canonical representatives of the freshly merged components
            let mut merged: Vec<usize> = Vec::new();
            for &v in &pending {
                let canon = uf.find(v);
                if !in_merged[canon] {
                    in_merged[canon] = true;
                    merged.push(canon);
                }
            }

            for &v in &merged {
                component_counter += 1;
                new_component[v] = component_counter;
            }

            for &v in &pending {
                let parent = new_component[uf.find(v)];
                if represents_internal[v] {
                    tree.set_parent_of_internal(current[v], parent);
                } else {
                    tree.set_parent_of_leaf(current[v], parent);
                }
            }

            for &v in &merged {
                current[v] = new_component[v];
                represents_internal[v] = true;
                let node = tree.internal_node(new_component[v]);
                let shift = batch_msb as u32;
                tree.nodes[node as usize].delta =
                    (weight_sum[v] + (1u64 << shift) - 1) >> shift;
                tree.nodes[node as usize].level = batch_msb + 1;
            }

            for &v in &pending {
                in_pending[v] = false;
            }
            for &v in &merged {
                in_merged[v] = false;
            }
            pending.clear();
        }

        debug_assert_ne!(tree.root, NIL, "sweep never produced a root");
        tree
    }

    fn with_leaves(n: usize) -> Self {
        Self {
            nodes: (0..n as u32).map(TreeNode::new).collect(),
            root: NIL,
            internal: vec![NIL; n + 1],
        }
    }

    /// Arena id of the internal node for a component number, allocating it
    /// on first use and promoting it to the current root.
    fn internal_node(&mut self, component: u32) -> u32 {
        let slot = component as usize;
        if self.internal[slot] == NIL {
            let id = self.nodes.len() as u32;
            self.nodes.push(TreeNode::new(component));
            self.internal[slot] = id;
            self.root = id;
        }
        self.internal[slot]
    }

    fn set_parent_of_leaf(&mut self, leaf: u32, component: u32) {
        let parent = self.internal_node(component);
        self.attach(leaf, parent);
        self.nodes[parent as usize].num_unvisited += 1;
        self.nodes[parent as usize].num_unvisited_initial += 1;
    }

    fn set_parent_of_internal(&mut self, component: u32, parent_component: u32) {
        let child = self.internal[component as usize];
        let parent = self.internal_node(parent_component);
        self.attach(child, parent);
        self.nodes[parent as usize].num_unvisited += self.nodes[child as usize].num_unvisited;
        self.nodes[parent as usize].num_unvisited_initial +=
            self.nodes[child as usize].num_unvisited_initial;
    }

    fn attach(&mut self, child: u32, parent: u32) {
        self.nodes[child as usize].parent = parent;
        self.nodes[parent as usize].children.push(child);
    }

    /// Allocates the bucket array for an expanded node. The window
    /// [ix0, ix8] must be set beforehand; capacity from earlier queries is
    /// reused.
    pub(crate) fn init_buckets(&mut self, v: u32) {
        let node = &mut self.nodes[v as usize];
        node.bucket_offset = node.ix0;
        let len = (node.ix8 - node.ix0 + 1) as usize;
        node.buckets.clear();
        node.buckets.resize(len, EMPTY_BUCKET);
    }

    /// Appends `node` to the bucket of `owner` addressed by the absolute
    /// index, if that index falls inside the owner's window; indices
    /// outside the window are irrelevant and dropped.
    pub(crate) fn bucket_insert(&mut self, owner: u32, index: i64, node: u32) {
        let slot = index - self.nodes[owner as usize].bucket_offset;
        if slot < 0 || slot as usize >= self.nodes[owner as usize].buckets.len() {
            return;
        }
        let slot = slot as usize;
        let tail = self.nodes[owner as usize].buckets[slot].tail;
        {
            let entry = &mut self.nodes[node as usize];
            entry.containing_owner = owner;
            entry.containing_slot = slot as u32;
            entry.bucket_prev = tail;
            entry.bucket_next = NIL;
        }
        if tail == NIL {
            self.nodes[owner as usize].buckets[slot].head = node;
        } else {
            self.nodes[tail as usize].bucket_next = node;
        }
        self.nodes[owner as usize].buckets[slot].tail = node;
    }

    /// Unlinks `node` from its containing bucket, if any.
    pub(crate) fn bucket_remove(&mut self, node: u32) {
        let owner = self.nodes[node as usize].containing_owner;
        if owner == NIL {
            return;
        }
        let slot = self.nodes[node as usize].containing_slot as usize;
        let prev = self.nodes[node as usize].bucket_prev;
        let next = self.nodes[node as usize].bucket_next;
        if prev == NIL {
            self.nodes[owner as usize].buckets[slot].head = next;
        } else {
            self.nodes[prev as usize].bucket_next = next;
        }
        if next == NIL {
            self.nodes[owner as usize].buckets[slot].tail = prev;
        } else {
            self.nodes[next as usize].bucket_prev = prev;
        }
        let entry = &mut self.nodes[node as usize];
        entry.containing_owner = NIL;
        entry.bucket_next = NIL;
        entry.bucket_prev = NIL;
    }

    pub(crate) fn move_to_bucket(&mut self, node: u32, owner: u32, index: i64) {
        debug_assert_ne!(owner, NIL, "re-bucketing past the root");
        self.bucket_remove(node);
        self.bucket_insert(owner, index, node);
    }

    /// First entry of the owner's bucket at the absolute index, NIL when
    /// empty.
    ///
    /// # Panics
    /// Panics if the index lies outside the owner's current window; the
    /// scan loop must never leave it.
    pub(crate) fn bucket_first(&self, owner: u32, index: i64) -> u32 {
        let node = &self.nodes[owner as usize];
        let slot = index - node.bucket_offset;
        assert!(
            slot >= 0 && (slot as usize) < node.buckets.len(),
            "bucket scan left the window of node {owner}"
        );
        node.buckets[slot as usize].head
    }

    /// Marks every node unvisited, restores the unvisited counts and
    /// releases all bucket state.
    pub(crate) fn reset_for_query(&mut self) {
        for node in &mut self.nodes {
            node.num_unvisited = node.num_unvisited_initial;
            node.visited = false;
            node.buckets.clear();
            node.containing_owner = NIL;
            node.bucket_next = NIL;
            node.bucket_prev = NIL;
        }
    }
}
