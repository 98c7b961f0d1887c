//! Error taxonomy of the crate.
//!
//! Validation errors surface at the entry point that originated them and
//! never leave partially mutated state behind. Structural invariant
//! violations inside the data structures are bugs, not errors; those are
//! guarded by assertions and abort the query.

use thiserror::Error;

/// Errors reported by the public API.
#[derive(Debug, Error)]
pub enum SsspError {
    /// Malformed input: bad DIMACS data, an out-of-range vertex, a
    /// non-positive edge weight, a zero-vertex graph, or a disconnected
    /// graph handed to the prepare phase.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An argument outside the operation's domain, such as a decrease-cost
    /// to infinity or to a negative cost.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A query was issued for a vertex outside `0..n`.
    #[error("{vertex} is no valid source vertex (graph has {num_vertices} vertices)")]
    InvalidSourceVertex { vertex: usize, num_vertices: usize },

    /// A query or prepare step was issued before the required construction
    /// calls succeeded.
    #[error("engine is not prepared: {0}")]
    NotPrepared(&'static str),

    /// An edge between an ordered pair of vertices that is already
    /// connected.
    #[error("there already is an edge between vertices {u} and {target}")]
    ParallelEdge { u: usize, target: usize },

    /// The input could not be read at all.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SsspError>;
