// src/params.rs
//! Parameter bundle for the community formulations.
//!
//! Two groups live here:
//! - formulation switches (`allow_whole_graph`, `anchor`) that change the
//!   model that gets built, and
//! - solver pass-through (`threads`, `time_limit`), handed to the backend
//!   untouched.  A backend that cannot honour one of them logs a warning.
//!
//! `tolerance` is the decode threshold: a binary counts as a member when
//! its value exceeds it.  It only affects decoding; model-level checks
//! ([`Assignment::is_set`](crate::model::Assignment::is_set)) round at 0.5.

use std::time::Duration;

/// All tunable controls.
#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    /// Worker threads for the solver, `None` = solver default.
    pub threads:           Option<usize>,

    /// Wall-clock budget for one solve, `None` = no limit.
    /// Running out of it yields an indeterminate outcome, never infeasible.
    pub time_limit:        Option<Duration>,

    /// Max-community only: allow S = V (the trivial PDS).
    /// Default `false` keeps 2 ≤ |S| ≤ n − 1.
    pub allow_whole_graph: bool,

    /// Connected max-community only: the flow root, which is forced into S.
    /// Defaults to vertex 0.  `None` lets the solver choose the root.
    pub anchor:            Option<usize>,

    /// Decode threshold for x binaries.
    pub tolerance:         f64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            threads:           None,
            time_limit:        None,
            allow_whole_graph: false,
            anchor:            Some(0),
            tolerance:         0.5,
        }
    }
}
