//! Proportional-density rows.
//!
//! Partition form (k communities): for vertex i, communities p ≠ q,
//!     x[i,p] = 1  ⇒  N(i,p)·|C_q|  ≥  N(i,q)·(|C_p| − 1)
//! where N(i,p) counts i's neighbours in C_p.  Both products are written
//! through the interaction binaries, Σ_{j1,j2} A[i,j1]·w[j1,j2,p,q] = N(i,p)·|C_q|,
//! so no division by a variable set size is needed.
//!
//! Single-set form (max-community): for u ∈ S,
//!     d_S(u)·|V∖S|  ≥  d_{V∖S}(u)·(|S| − 1).
//! Substituting d_{V∖S}(u) = d(u) − d_S(u) cancels the bilinear terms:
//!     (n − 1)·d_S(u)  ≥  d(u)·(|S| − 1)
//! which is linear in x.

use log::debug;

use crate::{
    graph::Graph,
    model::{ConstraintTag, LinExpr, Model, Relation, VarGrid, VarId},
    product::Interactions,
};

/// Add one indicator per (vertex, p, q), p ≠ q.
pub fn encode_partition_density(model: &mut Model, graph: &Graph, x: &VarGrid, w: &Interactions) {
    let n = graph.n();
    let k = x.cols();
    assert_eq!(x.rows(), n, "assignment grid does not match graph");

    for i in 0..n {
        for p in 0..k {
            for q in (0..k).filter(|&q| q != p) {
                let mut e = LinExpr::new();
                for j in graph.neigh_row(i).iter_ones() {
                    for j2 in 0..n {
                        e.add(w.get(j, j2, p, q), 1.0);
                        e.add(w.get(j, j2, q, p), -1.0);
                    }
                    e.add(x.get(j, q), 1.0);
                }
                model.add_indicator(
                    ConstraintTag::Density { vertex: i, community: p, rival: q },
                    x.get(i, p),
                    true,
                    e,
                    Relation::Ge,
                    0.0,
                );
            }
        }
    }
    debug!("partition density: {} indicator rows", n * k * k.saturating_sub(1));
}

/// Add one indicator per vertex for the single candidate set `x`.
pub fn encode_set_density(model: &mut Model, graph: &Graph, x: &[VarId]) {
    let n = graph.n();
    assert_eq!(x.len(), n, "membership vector does not match graph");

    for u in 0..n {
        let d = graph.degree(u) as f64;
        let mut e = LinExpr::new();
        for v in graph.neigh_row(u).iter_ones() {
            e.add(x[v], (n - 1) as f64);
        }
        for &xv in x {
            e.add(xv, -d);
        }
        model.add_indicator(ConstraintTag::Proportional { vertex: u }, x[u], true, e, Relation::Ge, -d);
    }
    debug!("set density: {n} indicator rows");
}

/*──────────────────────── tests ───────────────────────────*/
