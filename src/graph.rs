//! Simple undirected graph stored as an adjacency BitVec per row.
//! Built from a 0/1 adjacency matrix (validated) or an edge list.

use bitvec::prelude::*;
use log::warn;

use crate::error::ValidationError;

#[derive(Clone, Debug)]
pub struct Graph {
    /// Row‐major adjacency; `adj[i][j]` is 1 ⇔ edge (i,j) exists, j≠i.
    adj: Vec<BitVec>,
}

impl Graph {
    /*────────── constructors ──────────*/

    /// Empty graph with `n` isolated vertices.
    pub fn with_vertices(n: usize) -> Self {
        let mut rows = Vec::with_capacity(n);
        for _ in 0..n {
            rows.push(bitvec![0; n]);
        }
        Self { adj: rows }
    }

    /// Build from explicit edge list (0-based indices, undirected).
    pub fn from_edge_list(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut g = Self::with_vertices(n);
        for &(u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    /// Build from a square, symmetric 0/1 adjacency matrix.
    ///
    /// The diagonal is not part of the check: a non-zero `A[i][i]` is
    /// dropped with a warning, self-loops are never stored.
    pub fn from_adjacency<R, T>(rows: &[R]) -> Result<Self, ValidationError>
    where
        R: AsRef<[T]>,
        T: Copy + Into<i64>,
    {
        let n = rows.len();
        for (row, r) in rows.iter().enumerate() {
            let len = r.as_ref().len();
            if len != n {
                return Err(ValidationError::NotSquare { row, len, n });
            }
        }

        let mut g = Self::with_vertices(n);
        for i in 0..n {
            for j in 0..n {
                let value: i64 = rows[i].as_ref()[j].into();
                if value != 0 && value != 1 {
                    return Err(ValidationError::NonBinary { i, j, value });
                }
                let mirror: i64 = rows[j].as_ref()[i].into();
                if value != mirror {
                    return Err(ValidationError::NotSymmetric { i, j });
                }
                if value == 1 {
                    if i == j {
                        warn!("ignoring self-loop on vertex {i}");
                    } else if i < j {
                        g.add_edge(i, j);
                    }
                }
            }
        }
        Ok(g)
    }

    /*────────── getters ──────────*/

    #[inline] pub fn n(&self) -> usize { self.adj.len() }

    /// Number of edges (each counted once).
    pub fn m(&self) -> usize {
        self.adj.iter().map(|row| row.count_ones()).sum::<usize>() / 2
    }

    /// Degree of vertex v.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].count_ones()
    }

    /// All degrees, indexed by vertex.
    pub fn degrees(&self) -> Vec<usize> {
        (0..self.n()).map(|v| self.degree(v)).collect()
    }

    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u][v]
    }

    /// Immutable row slice for adjacency of v.
    #[inline]
    pub fn neigh_row(&self, v: usize) -> &BitSlice {
        &self.adj[v]
    }

    /// Both orientations of every edge, ordered by tail then head.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n()).flat_map(move |i| self.neigh_row(i).iter_ones().map(move |j| (i, j)))
    }

    /// Number of neighbours of `v` inside `members`.
    pub fn degree_into(&self, v: usize, members: &BitSlice) -> usize {
        self.neigh_row(v)
            .iter_ones()
            .filter(|&j| members[j])
            .count()
    }

    /*────────── mutators ──────────*/

    #[inline]
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(u < self.n() && v < self.n() && u != v);
        self.adj[u].set(v, true);
        self.adj[v].set(u, true);
    }
}

/// Whether `members` is a proportionally dense subgraph:
/// every u ∈ S satisfies d_S(u)·|V∖S| ≥ d_{V∖S}(u)·(|S|−1).
pub fn pds_holds(graph: &Graph, members: &[usize]) -> bool {
    let mut set = bitvec![0; graph.n()];
    for &v in members {
        set.set(v, true);
    }
    let size = set.count_ones();
    let outside = graph.n() - size;
    members.iter().all(|&u| {
        let inside = graph.degree_into(u, &set);
        let external = graph.degree(u) - inside;
        inside * outside >= external * size.saturating_sub(1)
    })
}

/*────────────────── tiny unit check ──────────────────*/
