//! Flow-based reachability certificate for one vertex set (a "commodity").
//!
//! A single root injects flow, every member consumes exactly one unit, and
//! an arc may only carry flow when both endpoints are members:
//!
//!   inflow(v) − outflow(v) + supply(v) = x[v]          for every vertex v
//!   f[i,j] ≤ (n−1)·x[i],   f[i,j] ≤ (n−1)·x[j]          for every arc (i,j)
//!
//! Supply exists only at the root, so a feasible flow routes a unit from
//! the root to each member over intra-set edges: every member is reachable
//! from the root inside the set, i.e. the induced subgraph is connected.
//! Conversely every connected set admits such a flow (route along a BFS tree),
//! so the certificate does not cut off connected solutions.
//!
//! The root is either anchored to a fixed vertex (which is then forced into
//! the set) or chosen by the solver among the set's members.

use log::debug;

use crate::{
    graph::Graph,
    model::{ConstraintTag, LinExpr, Model, Relation, VarId, VarKind},
};

/// How the flow root of a commodity is picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Root {
    /// Fixed vertex; forced to be a member.
    Anchored(usize),
    /// One member, selected by root-choice binaries.
    Chosen,
}

/// Variables created for one commodity.
#[derive(Clone, Debug)]
pub struct Reachability {
    /// `(tail, head, f)` for every arc of the graph.
    pub flows:  Vec<(usize, usize, VarId)>,
    /// Root-choice binaries per vertex; empty when anchored.
    pub roots:  Vec<VarId>,
    /// `(vertex, s)` for every vertex allowed to inject flow.
    pub supply: Vec<(usize, VarId)>,
}

/// Certify that the vertices with `members[v] = 1` induce a connected
/// subgraph.  `members` holds one binary per vertex.
pub fn encode_reachability(
    model: &mut Model,
    graph: &Graph,
    members: &[VarId],
    commodity: usize,
    root: Root,
) -> Reachability {
    let n = graph.n();
    assert_eq!(members.len(), n, "membership vector does not match graph");
    let cap = n.saturating_sub(1) as f64;
    let total = n as f64;

    /*── arc flows and capacities ──*/
    let mut flows = Vec::with_capacity(2 * graph.m());
    for (tail, head) in graph.arcs() {
        let f = model.continuous(cap, VarKind::Flow { tail, head, commodity });
        model.add_linear(
            ConstraintTag::FlowTail { tail, head, commodity },
            LinExpr::new().with(f, 1.0).with(members[tail], -cap),
            Relation::Le,
            0.0,
        );
        model.add_linear(
            ConstraintTag::FlowHead { tail, head, commodity },
            LinExpr::new().with(f, 1.0).with(members[head], -cap),
            Relation::Le,
            0.0,
        );
        flows.push((tail, head, f));
    }

    /*── root and supply ──*/
    let mut roots = Vec::new();
    let mut supply = Vec::new();
    match root {
        Root::Anchored(r) => {
            assert!(r < n, "root anchor out of range");
            model.add_linear(
                ConstraintTag::RootMembership { commodity },
                LinExpr::sum([members[r]]),
                Relation::Eq,
                1.0,
            );
            supply.push((r, model.continuous(total, VarKind::Supply { vertex: r, commodity })));
        }
        Root::Chosen => {
            for (vertex, &x) in members.iter().enumerate() {
                let y = model.binary(VarKind::Root { vertex, commodity });
                let s = model.continuous(total, VarKind::Supply { vertex, commodity });
                model.add_linear(
                    ConstraintTag::RootInCommunity { vertex, commodity },
                    LinExpr::new().with(y, 1.0).with(x, -1.0),
                    Relation::Le,
                    0.0,
                );
                model.add_linear(
                    ConstraintTag::SupplyAtRoot { vertex, commodity },
                    LinExpr::new().with(s, 1.0).with(y, -total),
                    Relation::Le,
                    0.0,
                );
                roots.push(y);
                supply.push((vertex, s));
            }
            model.add_linear(
                ConstraintTag::RootUnique { commodity },
                LinExpr::sum(roots.iter().copied()),
                Relation::Eq,
                1.0,
            );
        }
    }

    /*── balance ──*/
    let mut balance: Vec<LinExpr> = members.iter().map(|&x| LinExpr::new().with(x, -1.0)).collect();
    for &(tail, head, f) in &flows {
        balance[head].add(f, 1.0);
        balance[tail].add(f, -1.0);
    }
    for &(vertex, s) in &supply {
        balance[vertex].add(s, 1.0);
    }
    for (vertex, e) in balance.into_iter().enumerate() {
        model.add_linear(ConstraintTag::FlowBalance { vertex, commodity }, e, Relation::Eq, 0.0);
    }

    debug!(
        "reachability for commodity {commodity}: {} arcs, root {:?}",
        flows.len(),
        root
    );
    Reachability { flows, roots, supply }
}

/*──────────────────────── tests ───────────────────────────*/
