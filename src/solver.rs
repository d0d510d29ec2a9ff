//! The solver seam.  The formulation only needs one blocking call:
//! hand over a complete [`Model`], get back a terminal status and, unless
//! infeasible, an [`Assignment`].

use crate::{
    error::Result,
    model::{Assignment, Model},
    params::Params,
};

/// Terminal status reported by a solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal (or, for a feasibility model, feasible).
    Optimal,
    /// Feasible point found, optimality not proven.
    Feasible,
    /// Proven infeasible.
    Infeasible,
    /// Budget ran out before anything was proven; an incumbent may exist.
    TimeLimit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Solved {
    pub status:     SolveStatus,
    /// Present for every status except `Infeasible`, when the solver has one.
    pub assignment: Option<Assignment>,
}

impl Solved {
    pub fn infeasible() -> Self {
        Self { status: SolveStatus::Infeasible, assignment: None }
    }
}

pub trait Solver {
    /// Solve `model`.  Resource fields of `p` (threads, time limit) are
    /// passed through; everything else in `p` is for the formulation.
    fn solve(&mut self, model: &Model, p: &Params) -> Result<Solved>;
}

impl<S: Solver + ?Sized> Solver for &mut S {
    fn solve(&mut self, model: &Model, p: &Params) -> Result<Solved> {
        (**self).solve(model, p)
    }
}
