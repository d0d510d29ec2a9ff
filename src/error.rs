//! Error types.
//!
//! Input problems are [`ValidationError`]s and are always raised before a
//! model is built.  Infeasibility is *not* an error; see [`crate::Outcome`].

use crate::model::ConstraintTag;
use thiserror::Error;

/// Result alias for `pdsc`.
pub type Result<T> = std::result::Result<T, Error>;

/// A rejected adjacency matrix or an unmet variant precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("adjacency matrix must be square: row {row} has {len} entries, expected {n}")]
    NotSquare { row: usize, len: usize, n: usize },

    #[error("adjacency matrix must be symmetric: A[{i}][{j}] != A[{j}][{i}]")]
    NotSymmetric { i: usize, j: usize },

    #[error("adjacency entry A[{i}][{j}] = {value} is not 0 or 1")]
    NonBinary { i: usize, j: usize, value: i64 },

    #[error("graph has fewer than {required} vertices (n = {n})")]
    TooFewVertices { n: usize, required: usize },

    #[error("the number of vertices must be at least 2*k (n = {n}, k = {k})")]
    TooManyCommunities { n: usize, k: usize },

    #[error("k must be at least 2 (k = {k})")]
    TooFewCommunities { k: usize },

    #[error("root anchor {vertex} is not a vertex of a graph with {n} vertices")]
    AnchorOutOfRange { vertex: usize, n: usize },
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The solver backend failed for a reason other than infeasibility.
    #[error("solver failure: {0}")]
    Solver(String),

    /// An indicator consequence with an unbounded side has no finite big-M.
    #[error("indicator constraint {tag:?} has no finite big-M bound")]
    UnboundedIndicator { tag: ConstraintTag },
}
