//! Public entry points: validate → assemble → solve → decode.
//!
//! Validation failures return before the solver is touched.

use log::info;

use crate::{
    assemble::{assemble, Variant},
    decode::{decode, Detection, MaxCommunity, Outcome, Partition},
    error::Result,
    graph::Graph,
    params::Params,
    solver::Solver,
    validate,
};

/// Run any variant.
pub fn solve<S>(graph: &Graph, variant: &Variant, solver: &mut S, p: &Params) -> Result<Detection>
where
    S: Solver + ?Sized,
{
    validate::check(graph, variant, p)?;
    let formulation = assemble(graph, variant, p);
    let solved = solver.solve(&formulation.model, p)?;
    info!("{variant:?}: solver status {:?}", solved.status);
    decode(&formulation, solved, p.tolerance)
}

fn partition<S: Solver + ?Sized>(graph: &Graph, variant: Variant, solver: &mut S, p: &Params) -> Result<Outcome<Partition>> {
    match solve(graph, &variant, solver, p)? {
        Detection::Partition(o) => Ok(o),
        Detection::Set(_) => unreachable!("partition variant decoded as a set"),
    }
}

fn single_set<S: Solver + ?Sized>(graph: &Graph, variant: Variant, solver: &mut S, p: &Params) -> Result<Outcome<MaxCommunity>> {
    match solve(graph, &variant, solver, p)? {
        Detection::Set(o) => Ok(o),
        Detection::Partition(_) => unreachable!("set variant decoded as a partition"),
    }
}

/// Partition into exactly `k` mutually proportionally dense communities.
pub fn find_k_community<S: Solver + ?Sized>(graph: &Graph, k: usize, solver: &mut S, p: &Params) -> Result<Outcome<Partition>> {
    partition(graph, Variant::KCommunity { k }, solver, p)
}

/// As [`find_k_community`], each community inducing a connected subgraph.
pub fn find_connected_k_community<S: Solver + ?Sized>(graph: &Graph, k: usize, solver: &mut S, p: &Params) -> Result<Outcome<Partition>> {
    partition(graph, Variant::ConnectedKCommunity { k }, solver, p)
}

/// Maximum proportionally dense subgraph.
pub fn find_max_community<S: Solver + ?Sized>(graph: &Graph, solver: &mut S, p: &Params) -> Result<Outcome<MaxCommunity>> {
    single_set(graph, Variant::MaxCommunity, solver, p)
}

/// Maximum proportionally dense subgraph inducing a connected subgraph.
pub fn find_connected_max_community<S: Solver + ?Sized>(graph: &Graph, solver: &mut S, p: &Params) -> Result<Outcome<MaxCommunity>> {
    single_set(graph, Variant::ConnectedMaxCommunity, solver, p)
}
