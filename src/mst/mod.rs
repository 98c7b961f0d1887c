//! Minimum-spanning-tree algorithms for the prepare phase.
//!
//! The driver only needs a spanning subgraph that is minimal with respect
//! to the msb-of-weight order; any implementation of [`MstAlgorithm`]
//! satisfying that contract can be injected at the prepare call. The
//! bucket-sorting Kruskal variant is the canonical choice; Prim is kept as
//! an independently derived alternative (a weight-minimum spanning tree is
//! msb-minimum as well, since msb is monotone in the weight).

use crate::error::Result;
use crate::graph::WeightedGraph;

mod kruskal;
mod prim;

pub use kruskal::KruskalMsb;
pub use prim::Prim;

/// An algorithm producing an msb-minimum spanning tree.
pub trait MstAlgorithm {
    /// Computes a spanning subgraph of `g` with `2(n−1)` directed edges
    /// that is minimum under the msb-of-weight order.
    ///
    /// If `g` is disconnected the returned subgraph covers as much of the
    /// input as possible and has fewer edges; callers that require a
    /// spanning tree must check the edge count.
    fn find_solution(&self, g: &WeightedGraph) -> Result<WeightedGraph>;
}
