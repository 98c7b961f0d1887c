//! Thorup's deterministic single-source shortest paths (SSSP)
//!
//! This crate implements Thorup's linear-time SSSP algorithm for
//! undirected graphs with positive integer edge weights, together with the
//! two data structures it stands on:
//!
//! 1. Gabow's split-findmin structure ([`SplitFindmin`]): a recursive,
//!    level-indexed partition of a universe supporting `decrease_cost` and
//!    `split` in near-constant amortized time.
//! 2. A hierarchical *component tree* derived from an *msb-minimum*
//!    spanning tree, whose per-node buckets replace Dijkstra's global
//!    priority queue.
//!
//! ## Two phases
//! Preparation (build the msb-MST, derive the component tree, set up the
//! unvisited structure) is paid once per graph; queries are then cheap and
//! repeatable from any source vertex.
//!
//! ## Quick start
//! ```
//! use thorup_sssp::{KruskalMsb, ThorupEngine, WeightedGraph};
//!
//! let mut graph = WeightedGraph::new(4).unwrap();
//! graph.add_undirected_edge(0, 1, 3).unwrap();
//! graph.add_undirected_edge(1, 2, 5).unwrap();
//! graph.add_undirected_edge(2, 3, 1).unwrap();
//!
//! let mut engine = ThorupEngine::new();
//! engine.construct_msb_mst(graph, &KruskalMsb).unwrap();
//! engine.construct_other_data_structures().unwrap();
//!
//! assert_eq!(engine.find_shortest_paths(0).unwrap(), vec![0, 3, 8, 9]);
//! ```
//!
//! ## Scope
//! Undirected graphs, positive 32-bit integer weights, single-threaded
//! queries. The graph, the msb-MST and the Ackermann table are read-only
//! after preparation and safe to share; the mutable query state is not.
//! Callers wanting parallel queries prepare one engine per worker.

pub mod ackermann;
mod component_tree;
pub mod dijkstra;
pub mod dimacs;
pub mod engine;
pub mod error;
pub mod generator;
pub mod graph;
pub mod mst;
pub mod split_findmin;
pub mod union_find;
mod unvisited;
mod utils;

pub use crate::engine::ThorupEngine;
pub use crate::error::{Result, SsspError};
pub use crate::graph::{WeightedEdge, WeightedGraph, MAX_EDGE_WEIGHT};
pub use crate::mst::{KruskalMsb, MstAlgorithm, Prim};
pub use crate::split_findmin::{SplitFindmin, INFINITE_COST};
pub use crate::union_find::UnionFind;
