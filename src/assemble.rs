//! Model assembly per problem variant.
//!
//! | variant                  | variables   | objective  |
//! |--------------------------|-------------|------------|
//! | k-community              | x, w        | feasibility|
//! | connected k-community    | x, w, f, r, s | feasibility|
//! | max-community            | x           | max Σx     |
//! | connected max-community  | x, f, s (r) | max Σx     |
//!
//! The caller is expected to have run [`crate::validate::check`] first.

use log::info;
use serde::Serialize;

use crate::{
    connectivity::{encode_reachability, Root},
    density::{encode_partition_density, encode_set_density},
    graph::Graph,
    model::{ConstraintTag, LinExpr, Model, Objective, Relation, VarGrid, VarId, VarKind},
    params::Params,
    product::Interactions,
};

/// Which structure to look for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Variant {
    KCommunity { k: usize },
    ConnectedKCommunity { k: usize },
    MaxCommunity,
    ConnectedMaxCommunity,
}

impl Variant {
    #[inline]
    pub fn is_connected(&self) -> bool {
        matches!(self, Variant::ConnectedKCommunity { .. } | Variant::ConnectedMaxCommunity)
    }

    /// Partition variants are pure feasibility problems.
    #[inline]
    pub fn is_partition(&self) -> bool {
        matches!(self, Variant::KCommunity { .. } | Variant::ConnectedKCommunity { .. })
    }
}

/// Variables the decoder reads back.
#[derive(Clone, Debug)]
pub enum Handles {
    /// x[vertex, community]
    Partition(VarGrid),
    /// x[vertex]
    Set(Vec<VarId>),
}

/// A complete model plus the handles needed to decode its solution.
#[derive(Clone, Debug)]
pub struct Formulation {
    pub variant: Variant,
    pub model:   Model,
    pub handles: Handles,
}

pub fn assemble(graph: &Graph, variant: &Variant, p: &Params) -> Formulation {
    let f = match *variant {
        Variant::KCommunity { k } | Variant::ConnectedKCommunity { k } => assemble_partition(graph, *variant, k),
        Variant::MaxCommunity | Variant::ConnectedMaxCommunity => assemble_set(graph, *variant, p),
    };
    info!(
        "{:?}: {} variables, {} linear rows, {} indicator rows",
        f.variant,
        f.model.num_vars(),
        f.model.linear().len(),
        f.model.indicators().len()
    );
    f
}

/*───────────────────────────────────────────────────────────*/
/*  k communities                                            */
/*───────────────────────────────────────────────────────────*/

fn assemble_partition(graph: &Graph, variant: Variant, k: usize) -> Formulation {
    let n = graph.n();
    let mut model = Model::new();

    let x = VarGrid::binaries(&mut model, n, k, |vertex, community| VarKind::Assign { vertex, community });
    let w = Interactions::link(&mut model, &x);

    encode_partition_density(&mut model, graph, &x, &w);

    for community in 0..k {
        model.add_linear(
            ConstraintTag::MinCommunitySize { community },
            LinExpr::sum(x.column(community)),
            Relation::Ge,
            2.0,
        );
    }
    for vertex in 0..n {
        model.add_linear(
            ConstraintTag::SingleCommunity { vertex },
            LinExpr::sum(x.row(vertex).iter().copied()),
            Relation::Eq,
            1.0,
        );
    }

    if variant.is_connected() {
        // Vertex 0 lies in some community and labels are interchangeable,
        // so it may root community 0; the others pick their own root.
        for community in 0..k {
            let members: Vec<VarId> = x.column(community).collect();
            let root = if community == 0 { Root::Anchored(0) } else { Root::Chosen };
            encode_reachability(&mut model, graph, &members, community, root);
        }
    }

    model.set_objective(Objective::Feasibility);
    Formulation { variant, model, handles: Handles::Partition(x) }
}

/*───────────────────────────────────────────────────────────*/
/*  single set S                                             */
/*───────────────────────────────────────────────────────────*/

fn assemble_set(graph: &Graph, variant: Variant, p: &Params) -> Formulation {
    let n = graph.n();
    let mut model = Model::new();

    let x: Vec<VarId> = (0..n).map(|vertex| model.binary(VarKind::Member { vertex })).collect();

    model.set_objective(Objective::Maximize(LinExpr::sum(x.iter().copied())));
    model.add_linear(ConstraintTag::MinSetSize, LinExpr::sum(x.iter().copied()), Relation::Ge, 2.0);
    if !p.allow_whole_graph {
        model.add_linear(
            ConstraintTag::MaxSetSize,
            LinExpr::sum(x.iter().copied()),
            Relation::Le,
            (n - 1) as f64,
        );
    }

    encode_set_density(&mut model, graph, &x);

    if variant.is_connected() {
        // vertex 0 unless the caller moved or released the anchor
        let root = p.anchor.map_or(Root::Chosen, Root::Anchored);
        encode_reachability(&mut model, graph, &x, 0, root);
    }

    Formulation { variant, model, handles: Handles::Set(x) }
}

/*──────────────────────── tests ───────────────────────────*/
