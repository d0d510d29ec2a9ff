//! Variant preconditions, checked before any model is built.
//!
//! Matrix shape and symmetry are checked earlier, by
//! [`Graph::from_adjacency`](crate::graph::Graph::from_adjacency).

use crate::{assemble::Variant, error::ValidationError, graph::Graph, params::Params};

/// Smallest graph a partition into k ≥ 2 communities is attempted on.
pub const MIN_PARTITION_VERTICES: usize = 4;
/// Smallest graph a max-community is attempted on.
pub const MIN_SET_VERTICES: usize = 3;

/// k-community variants: n ≥ 4, n ≥ 2k, k ≥ 2 (checked in that order).
pub fn check_partition(graph: &Graph, k: usize) -> Result<(), ValidationError> {
    let n = graph.n();
    if n < MIN_PARTITION_VERTICES {
        return Err(ValidationError::TooFewVertices { n, required: MIN_PARTITION_VERTICES });
    }
    if k > n / 2 {
        return Err(ValidationError::TooManyCommunities { n, k });
    }
    if k < 2 {
        return Err(ValidationError::TooFewCommunities { k });
    }
    Ok(())
}

/// Max-community variants: n ≥ 3; a pinned root must be a vertex.
pub fn check_set(graph: &Graph, p: &Params) -> Result<(), ValidationError> {
    let n = graph.n();
    if n < MIN_SET_VERTICES {
        return Err(ValidationError::TooFewVertices { n, required: MIN_SET_VERTICES });
    }
    if let Some(vertex) = p.anchor {
        if vertex >= n {
            return Err(ValidationError::AnchorOutOfRange { vertex, n });
        }
    }
    Ok(())
}

pub fn check(graph: &Graph, variant: &Variant, p: &Params) -> Result<(), ValidationError> {
    match *variant {
        Variant::KCommunity { k } | Variant::ConnectedKCommunity { k } => check_partition(graph, k),
        Variant::MaxCommunity => check_set(graph, &Params { anchor: None, ..p.clone() }),
        Variant::ConnectedMaxCommunity => check_set(graph, p),
    }
}
