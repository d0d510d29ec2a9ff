//! Pure-Rust backend: `good_lp` over its `microlp` branch-and-bound solver.
//!
//! microlp has no native indicator rows, so indicators are lowered with the
//! bound-derived big-M of
//! [`big_m_relaxation`](crate::model::IndicatorConstraint::big_m_relaxation)
//! before submission.
//! It also has no thread or time controls; those parameters are ignored
//! with a warning.

use good_lp::{
    constraint, solvers::microlp::microlp, variable, Expression, ProblemVariables, ResolutionError,
    Solution, SolverModel, Variable,
};
use log::{debug, warn};

use crate::{
    error::{Error, Result},
    model::{Assignment, Domain, LinExpr, Model, Objective, Relation},
    params::Params,
    solver::{SolveStatus, Solved, Solver},
};

/// Stateless handle; every call builds a fresh `good_lp` problem.
#[derive(Clone, Copy, Debug, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self { Self }
}

fn to_expression(e: &LinExpr, vars: &[Variable]) -> Expression {
    let mut out = Expression::with_capacity(e.terms().len());
    for &(v, c) in e.terms() {
        out.add_mul(c, vars[v.index()]);
    }
    out
}

impl Solver for MicroLpSolver {
    fn solve(&mut self, model: &Model, p: &Params) -> Result<Solved> {
        if p.threads.is_some() {
            warn!("microlp backend is single-threaded; ignoring threads = {:?}", p.threads);
        }
        if p.time_limit.is_some() {
            warn!("microlp backend has no time limit; ignoring {:?}", p.time_limit);
        }

        /*── variables ──*/
        let mut problem_vars = ProblemVariables::new();
        let vars: Vec<Variable> = model
            .variables()
            .map(|(_, v)| match v.domain {
                Domain::Binary => problem_vars.add(variable().binary()),
                Domain::Continuous { upper } => problem_vars.add(variable().min(0.0).max(upper)),
            })
            .collect();

        /*── objective ──*/
        let mut problem = match model.objective() {
            Objective::Feasibility => problem_vars.minimise(Expression::with_capacity(0)).using(microlp),
            Objective::Maximize(e) => problem_vars.maximise(to_expression(e, &vars)).using(microlp),
        };

        /*── rows, indicators lowered ──*/
        let rows = model.lowered_rows()?;
        debug!(
            "microlp: {} rows ({} from {} indicators)",
            rows.len(),
            rows.len() - model.linear().len(),
            model.indicators().len()
        );
        for row in &rows {
            let lhs = to_expression(&row.expr, &vars);
            let rhs = row.rhs - row.expr.constant();
            let c = match row.relation {
                Relation::Le => constraint::leq(lhs, rhs),
                Relation::Ge => constraint::geq(lhs, rhs),
                Relation::Eq => constraint::eq(lhs, rhs),
            };
            problem.add_constraint(c);
        }

        /*── solve ──*/
        match problem.solve() {
            Ok(solution) => {
                let values = vars.iter().map(|&v| solution.value(v)).collect();
                Ok(Solved { status: SolveStatus::Optimal, assignment: Some(Assignment::new(values)) })
            }
            Err(ResolutionError::Infeasible) => Ok(Solved::infeasible()),
            Err(e) => Err(Error::Solver(e.to_string())),
        }
    }
}
