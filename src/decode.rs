//! Result decoding: solver status + assignment → community structure.
//!
//! Status mapping:
//!   OPTIMAL    → `Found`
//!   FEASIBLE   → `Found` for partitions (feasibility models),
//!                `Indeterminate(Some)` for max-community (optimality unproven)
//!   TIME_LIMIT → `Indeterminate(incumbent)`
//!   INFEASIBLE → `Infeasible`

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    assemble::{Formulation, Handles},
    error::{Error, Result},
    model::{Assignment, VarGrid, VarId},
    solver::{SolveStatus, Solved},
};

/// Partition into communities labelled 1..=k, members ascending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Partition {
    communities: BTreeMap<usize, Vec<usize>>,
}

impl Partition {
    #[inline] pub fn k(&self) -> usize { self.communities.len() }

    pub fn community(&self, label: usize) -> Option<&[usize]> {
        self.communities.get(&label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.communities.iter().map(|(&l, m)| (l, m.as_slice()))
    }

    /// Label of the community containing `v`.
    pub fn label_of(&self, v: usize) -> Option<usize> {
        self.iter().find(|(_, m)| m.binary_search(&v).is_ok()).map(|(l, _)| l)
    }

    pub fn into_map(self) -> BTreeMap<usize, Vec<usize>> { self.communities }
}

/// A maximum (connected) proportionally dense subgraph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MaxCommunity {
    pub members: Vec<usize>,
    pub size:    usize,
}

/// What a solve produced.  `Infeasible` is a proof that no structure exists
/// and is never represented as an empty structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome<T> {
    Found(T),
    Infeasible,
    /// Nothing proven; carries the incumbent when the solver had one.
    Indeterminate(Option<T>),
}

impl<T> Outcome<T> {
    #[inline] pub fn is_found(&self) -> bool { matches!(self, Outcome::Found(_)) }
    #[inline] pub fn is_infeasible(&self) -> bool { matches!(self, Outcome::Infeasible) }
}

/// Outcome of any variant, for the dispatching entry point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Detection {
    Partition(Outcome<Partition>),
    Set(Outcome<MaxCommunity>),
}

/*───────────────────────────────────────────────────────────*/

pub fn decode_partition(x: &VarGrid, a: &Assignment, tolerance: f64) -> Partition {
    let communities = (0..x.cols())
        .map(|p| {
            let members = (0..x.rows()).filter(|&i| a.value(x.get(i, p)) > tolerance).collect();
            (p + 1, members)
        })
        .collect();
    Partition { communities }
}

pub fn decode_set(x: &[VarId], a: &Assignment, tolerance: f64) -> MaxCommunity {
    let members: Vec<usize> = (0..x.len()).filter(|&i| a.value(x[i]) > tolerance).collect();
    MaxCommunity { size: members.len(), members }
}

fn classify<T, F>(solved: Solved, feasible_is_final: bool, read: F) -> Result<Outcome<T>>
where
    F: Fn(&Assignment) -> T,
{
    let Solved { status, assignment } = solved;
    let decoded = assignment.as_ref().map(read);
    match status {
        SolveStatus::Infeasible => Ok(Outcome::Infeasible),
        SolveStatus::TimeLimit => Ok(Outcome::Indeterminate(decoded)),
        SolveStatus::Feasible if !feasible_is_final => Ok(Outcome::Indeterminate(decoded)),
        SolveStatus::Optimal | SolveStatus::Feasible => decoded
            .map(Outcome::Found)
            .ok_or_else(|| Error::Solver(format!("status {status:?} without an assignment"))),
    }
}

/// Decode a solved formulation.
pub fn decode(f: &Formulation, solved: Solved, tolerance: f64) -> Result<Detection> {
    if let Some(a) = &solved.assignment {
        assert_eq!(a.len(), f.model.num_vars(), "assignment does not match model");
    }
    let feasible_is_final = f.variant.is_partition();
    match &f.handles {
        Handles::Partition(x) => classify(solved, feasible_is_final, |a| decode_partition(x, a, tolerance))
            .map(Detection::Partition),
        Handles::Set(x) => classify(solved, feasible_is_final, |a| decode_set(x, a, tolerance)).map(Detection::Set),
    }
}

/*──────────────────────── tests ───────────────────────────*/
