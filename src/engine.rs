//! Thorup's single-source shortest-paths driver.
//!
//! The engine is a two-phase object. The prepare phase builds an
//! msb-minimum spanning tree of the input graph, derives the component
//! tree from it and sets up the unvisited structure; it is expensive but
//! amortizes over all queries on the same graph. A query walks the
//! component tree with the expand/visit recursion, scanning per-node
//! buckets in ascending index order instead of popping a global priority
//! queue, and drives decrease-cost and split against the split-findmin
//! universe underneath.
//!
//! ```
//! use thorup_sssp::{KruskalMsb, ThorupEngine, WeightedGraph};
//!
//! let mut g = WeightedGraph::new(4).unwrap();
//! g.add_undirected_edge(0, 1, 1).unwrap();
//! g.add_undirected_edge(0, 2, 2).unwrap();
//! g.add_undirected_edge(0, 3, 4).unwrap();
//!
//! let mut engine = ThorupEngine::new();
//! engine.construct_msb_mst(g, &KruskalMsb).unwrap();
//! engine.construct_other_data_structures().unwrap();
//! let d = engine.find_shortest_paths(0).unwrap();
//! assert_eq!(d, vec![0, 1, 2, 4]);
//! ```

use crate::component_tree::{ComponentTree, NIL};
use crate::error::{Result, SsspError};
use crate::graph::WeightedGraph;
use crate::mst::MstAlgorithm;
use crate::split_findmin::INFINITE_COST;
use crate::unvisited::Unvisited;

/// Bit width used in place of a parent level when scanning below the root.
const MASTER_WIDTH: i32 = 32;

/// Prepared per-graph state shared by all queries.
#[derive(Debug)]
struct Prepared {
    tree: ComponentTree,
    unvisited: Unvisited,
    /// Visited set S.
    visited: Vec<bool>,
    /// Whether a query has run since the last reset.
    dirty: bool,
}

/// Thorup's deterministic SSSP engine for undirected graphs with positive
/// integer edge weights.
#[derive(Debug, Default)]
pub struct ThorupEngine {
    graph: Option<WeightedGraph>,
    mst: Option<WeightedGraph>,
    prepared: Option<Prepared>,
}

impl ThorupEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// First prepare step: computes the msb-minimum spanning tree of the
    /// graph with the injected algorithm.
    ///
    /// Fails with [`SsspError::InvalidInput`] if the graph is not
    /// connected (the algorithm then cannot produce `2(n−1)` directed
    /// edges). Any previously prepared state is discarded.
    pub fn construct_msb_mst(
        &mut self,
        graph: WeightedGraph,
        algorithm: &dyn MstAlgorithm,
    ) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("construct_msb_mst", n = graph.num_vertices()).entered();

        let n = graph.num_vertices();
        let mst = algorithm.find_solution(&graph)?;
        if mst.num_edges() != 2 * (n - 1) {
            return Err(SsspError::InvalidInput(
                "the graph is not connected".into(),
            ));
        }
        self.graph = Some(graph);
        self.mst = Some(mst);
        self.prepared = None;
        Ok(())
    }

    /// Second prepare step: builds the component tree from the msb-MST and
    /// initializes the unvisited structure over the leaf DFS order.
    pub fn construct_other_data_structures(&mut self) -> Result<()> {
        let mst = self
            .mst
            .as_ref()
            .ok_or(SsspError::NotPrepared("construct_msb_mst must run first"))?;
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("construct_other_data_structures").entered();

        let n = mst.num_vertices();
        let mut tree = ComponentTree::build(mst);
        let unvisited = Unvisited::new(n, &mut tree);
        self.prepared = Some(Prepared {
            tree,
            unvisited,
            visited: vec![false; n],
            dirty: false,
        });
        Ok(())
    }

    /// Resets the engine for another query on the same graph: clears the
    /// visited set, marks every component unvisited, releases bucket
    /// storage and rebuilds the split-findmin instance with all costs at
    /// infinity.
    pub fn clean_up_between_queries(&mut self) -> Result<()> {
        let n = self
            .graph
            .as_ref()
            .map(WeightedGraph::num_vertices)
            .ok_or(SsspError::NotPrepared("nothing to clean up"))?;
        let prepared = self
            .prepared
            .as_mut()
            .ok_or(SsspError::NotPrepared("nothing to clean up"))?;
        prepared.visited.fill(false);
        prepared.tree.reset_for_query();
        prepared.unvisited.reinitialize(n);
        prepared.dirty = false;
        Ok(())
    }

    /// Computes the distances of all vertices from `source`.
    ///
    /// Unreachable vertices cannot occur on a prepared engine (the graph
    /// is connected); the +∞ sentinel in the result vector is `i32::MAX`.
    /// The engine resets itself automatically when a previous query has
    /// run.
    pub fn find_shortest_paths(&mut self, source: usize) -> Result<Vec<i32>> {
        let n = self
            .graph
            .as_ref()
            .map(WeightedGraph::num_vertices)
            .ok_or(SsspError::NotPrepared(
                "construct_msb_mst and construct_other_data_structures must run first",
            ))?;
        if self.prepared.is_none() {
            return Err(SsspError::NotPrepared(
                "construct_other_data_structures must run first",
            ));
        }
        if source >= n {
            return Err(SsspError::InvalidSourceVertex {
                vertex: source,
                num_vertices: n,
            });
        }
        if self.prepared.as_ref().is_some_and(|p| p.dirty) {
            self.clean_up_between_queries()?;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("find_shortest_paths", source).entered();

        let graph = self.graph.as_ref().expect("checked above");
        let prepared = self.prepared.as_mut().expect("checked above");
        prepared.dirty = true;
        prepared.visited[source] = true;

        for edge in graph.incident_edges(source) {
            prepared
                .unvisited
                .decrease_d(edge.target, edge.weight as i64);
        }

        let root = prepared.tree.root;
        let mut query = Query {
            graph,
            tree: &mut prepared.tree,
            unvisited: &mut prepared.unvisited,
            visited: &mut prepared.visited,
            source,
        };
        query.visit(root);

        let mut d = Vec::with_capacity(n);
        for v in 0..n {
            let cost = prepared.unvisited.d(v);
            d.push(if cost == INFINITE_COST {
                i32::MAX
            } else {
                cost as i32
            });
        }
        d[source] = 0;
        Ok(d)
    }
}

/// One in-flight query; borrows the prepared state field-wise so the
/// recursion can read the graph while mutating the tree and the
/// super-distances.
struct Query<'a> {
    graph: &'a WeightedGraph,
    tree: &'a mut ComponentTree,
    unvisited: &'a mut Unvisited,
    visited: &'a mut [bool],
    source: usize,
}

impl Query<'_> {
    /// First entry of an internal node: fix the bucket window from the
    /// current minimum super-distance, detach the children in the
    /// split-findmin universe and bucket them by their shifted minima.
    fn expand(&mut self, v: u32) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("expand", node = v).entered();

        let level = self.tree.nodes[v as usize].level;
        let min = self.unvisited.min_d_minus(self.tree, v);
        debug_assert!(min >= 0, "expanding a component without finite distances");
        {
            let node = &mut self.tree.nodes[v as usize];
            node.ix0 = min >> (level - 1);
            node.ix8 = node.ix0 + node.delta as i64;
        }
        self.tree.init_buckets(v);
        self.unvisited.delete_root(self.tree, v);

        for k in 0..self.tree.nodes[v as usize].children.len() {
            let child = self.tree.nodes[v as usize].children[k];
            let is_source_leaf = {
                let node = &self.tree.nodes[child as usize];
                node.is_leaf() && node.index as usize == self.source
            };
            if is_source_leaf {
                // the source is pre-visited: it never enters a bucket,
                // drop it from every ancestor's count right away
                let mut current = v;
                while current != NIL {
                    self.tree.nodes[current as usize].num_unvisited -= 1;
                    current = self.tree.nodes[current as usize].parent;
                }
                continue;
            }
            let min_child = self.unvisited.min_d_minus(self.tree, child);
            if min_child != -1 {
                self.tree
                    .bucket_insert(v, min_child >> (level - 1), child);
            }
        }

        self.tree.nodes[v as usize].visited = true;
    }

    /// The main recursion: visit a minimal component.
    ///
    /// Scans the node's buckets in ascending index order as long as the
    /// cursor, shifted to the parent's level, stays put; every non-empty
    /// bucket entry is visited recursively. Afterwards the node either
    /// re-buckets itself at its parent (still-unvisited descendants
    /// remain) or leaves its bucket for good.
    fn visit(&mut self, vi: u32) {
        let parent = self.tree.nodes[vi as usize].parent;
        let j = if parent == NIL {
            MASTER_WIDTH
        } else {
            self.tree.nodes[parent as usize].level
        };

        if self.tree.nodes[vi as usize].level == 0 {
            let vertex = self.tree.nodes[vi as usize].index as usize;
            self.visit_leaf(vertex);
            let mut current = parent;
            while current != NIL {
                self.tree.nodes[current as usize].num_unvisited -= 1;
                current = self.tree.nodes[current as usize].parent;
            }
            self.tree.bucket_remove(vi);
            return;
        }

        if !self.tree.nodes[vi as usize].visited {
            self.expand(vi);
            let ix0 = self.tree.nodes[vi as usize].ix0;
            self.tree.nodes[vi as usize].ix = ix0;
        }

        let shift = j - self.tree.nodes[vi as usize].level;
        let old_shifted = self.tree.nodes[vi as usize].ix >> shift;

        while self.tree.nodes[vi as usize].num_unvisited > 0
            && self.tree.nodes[vi as usize].ix >> shift == old_shifted
        {
            loop {
                let wh = self.tree.bucket_first(vi, self.tree.nodes[vi as usize].ix);
                if wh == NIL {
                    break;
                }
                self.visit(wh);
            }
            self.tree.nodes[vi as usize].ix += 1;
        }

        if self.tree.nodes[vi as usize].num_unvisited > 0 {
            let ix = self.tree.nodes[vi as usize].ix;
            self.tree.move_to_bucket(vi, parent, ix >> shift);
        } else if parent != NIL {
            self.tree.bucket_remove(vi);
        }
    }

    /// Settles a leaf: relax all incident edges and restore the bucketing
    /// of the unvisited roots whose minima improved.
    fn visit_leaf(&mut self, v: usize) {
        if v == self.source {
            return;
        }
        debug_assert!(!self.visited[v], "vertex {v} visited twice");
        self.visited[v] = true;

        let graph = self.graph;
        let d_v = self.unvisited.d(v);
        for edge in graph.incident_edges(v) {
            let u = edge.target;
            // members of S never improve; in particular the source (whose
            // super-distance stays infinite) must not be rediscovered
            if self.visited[u] {
                continue;
            }
            // saturating: an overflowing sum never relaxes anything
            let new_d = d_v.saturating_add(edge.weight as i64);
            if new_d < self.unvisited.d(u) {
                let wh = self.unvisited.unvisited_root_of(self.tree, u);
                let wi = self.tree.nodes[wh as usize].parent;
                let shift = self.tree.nodes[wi as usize].level - 1;

                let old = self.unvisited.min_d_minus(self.tree, wh) >> shift;
                self.unvisited.decrease_d(u, new_d);
                let new = self.unvisited.min_d_minus(self.tree, wh) >> shift;

                if old == -1 || new < old {
                    self.tree.move_to_bucket(wh, wi, new);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mst::{KruskalMsb, Prim};

    fn prepared_engine(edges: &[(usize, usize, i32)], n: usize) -> ThorupEngine {
        let mut g = WeightedGraph::new(n).unwrap();
        for &(u, v, w) in edges {
            g.add_undirected_edge(u, v, w).unwrap();
        }
        let mut engine = ThorupEngine::new();
        engine.construct_msb_mst(g, &KruskalMsb).unwrap();
        engine.construct_other_data_structures().unwrap();
        engine
    }

    #[test]
    fn query_requires_prepare() {
        let mut engine = ThorupEngine::new();
        assert!(matches!(
            engine.find_shortest_paths(0),
            Err(SsspError::NotPrepared(_))
        ));

        let g = WeightedGraph::new(1).unwrap();
        engine.construct_msb_mst(g, &KruskalMsb).unwrap();
        assert!(matches!(
            engine.find_shortest_paths(0),
            Err(SsspError::NotPrepared(_))
        ));
    }

    #[test]
    fn rejects_invalid_source() {
        let mut engine = prepared_engine(&[(0, 1, 1)], 2);
        assert!(matches!(
            engine.find_shortest_paths(2),
            Err(SsspError::InvalidSourceVertex { vertex: 2, .. })
        ));
    }

    #[test]
    fn rejects_disconnected_graphs() {
        let mut g = WeightedGraph::new(4).unwrap();
        g.add_undirected_edge(0, 1, 1).unwrap();
        g.add_undirected_edge(2, 3, 1).unwrap();
        let mut engine = ThorupEngine::new();
        assert!(matches!(
            engine.construct_msb_mst(g, &KruskalMsb),
            Err(SsspError::InvalidInput(_))
        ));
    }

    #[test]
    fn single_vertex() {
        let mut engine = prepared_engine(&[], 1);
        assert_eq!(engine.find_shortest_paths(0).unwrap(), vec![0]);
    }

    #[test]
    fn two_vertices() {
        let mut engine = prepared_engine(&[(0, 1, 1)], 2);
        assert_eq!(engine.find_shortest_paths(0).unwrap(), vec![0, 1]);
        assert_eq!(engine.find_shortest_paths(1).unwrap(), vec![1, 0]);
    }

    #[test]
    fn star() {
        let mut engine = prepared_engine(&[(0, 1, 1), (0, 2, 2), (0, 3, 4)], 4);
        assert_eq!(engine.find_shortest_paths(0).unwrap(), vec![0, 1, 2, 4]);
    }

    #[test]
    fn chain() {
        let mut engine = prepared_engine(&[(0, 1, 3), (1, 2, 5), (2, 3, 1)], 4);
        assert_eq!(engine.find_shortest_paths(0).unwrap(), vec![0, 3, 8, 9]);
    }

    #[test]
    fn cycle_takes_shorter_arc() {
        let mut engine = prepared_engine(&[(0, 1, 1), (1, 2, 2), (2, 3, 3), (3, 0, 4)], 4);
        assert_eq!(engine.find_shortest_paths(0).unwrap(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn equal_msb_tie_is_order_independent() {
        // 5 and 7 share msb 2; both insertion orders must yield the same
        // distances
        let mut first = prepared_engine(&[(0, 1, 5), (1, 2, 7), (0, 2, 7)], 3);
        let mut second = prepared_engine(&[(0, 1, 5), (0, 2, 7), (1, 2, 7)], 3);
        assert_eq!(
            first.find_shortest_paths(0).unwrap(),
            second.find_shortest_paths(0).unwrap()
        );
    }

    #[test]
    fn repeated_queries_are_identical() {
        let mut engine = prepared_engine(
            &[(0, 1, 3), (1, 2, 5), (2, 3, 1), (3, 4, 9), (0, 4, 2)],
            5,
        );
        let first = engine.find_shortest_paths(0).unwrap();
        engine.clean_up_between_queries().unwrap();
        let second = engine.find_shortest_paths(0).unwrap();
        assert_eq!(first, second);
        // implicit cleanup path
        let third = engine.find_shortest_paths(0).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn every_vertex_visited_exactly_once() {
        let mut engine = prepared_engine(
            &[
                (0, 1, 6),
                (1, 2, 1),
                (2, 3, 12),
                (3, 4, 2),
                (4, 5, 9),
                (5, 6, 3),
                (6, 7, 20),
                (0, 7, 7),
                (1, 5, 14),
            ],
            8,
        );
        engine.find_shortest_paths(3).unwrap();
        let prepared = engine.prepared.as_ref().unwrap();
        // the root ran dry
        let root = &prepared.tree.nodes[prepared.tree.root as usize];
        assert_eq!(root.num_unvisited, 0);
        // S covers everything, the source included
        assert!(prepared.visited.iter().all(|&v| v));
    }

    #[test]
    fn prim_agrees_with_kruskal() {
        let edges = [
            (0, 1, 6),
            (1, 2, 1),
            (2, 3, 12),
            (3, 4, 2),
            (4, 5, 9),
            (5, 6, 3),
            (0, 6, 7),
        ];
        let mut g1 = WeightedGraph::new(7).unwrap();
        let mut g2 = WeightedGraph::new(7).unwrap();
        for &(u, v, w) in &edges {
            g1.add_undirected_edge(u, v, w).unwrap();
            g2.add_undirected_edge(u, v, w).unwrap();
        }
        let mut kruskal = ThorupEngine::new();
        kruskal.construct_msb_mst(g1, &KruskalMsb).unwrap();
        kruskal.construct_other_data_structures().unwrap();
        let mut prim = ThorupEngine::new();
        prim.construct_msb_mst(g2, &Prim).unwrap();
        prim.construct_other_data_structures().unwrap();
        for source in 0..7 {
            assert_eq!(
                kruskal.find_shortest_paths(source).unwrap(),
                prim.find_shortest_paths(source).unwrap(),
                "source {source}"
            );
        }
    }
}
