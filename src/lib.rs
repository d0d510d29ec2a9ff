//! PDSC – proportionally dense subgraphs and k-communities as mixed-integer
//! programs, with optional PyO3 bindings (feature `python`).
//!
//! The crate builds the formulation; the search is delegated to a
//! [`Solver`].  [`MicroLpSolver`] is the bundled pure-Rust backend.

/*───────── interne modules ─────────*/
pub mod error;
pub mod graph;
pub mod params;
pub mod validate;
pub mod model;
pub mod product;
pub mod density;
pub mod connectivity;
pub mod assemble;
pub mod solver;
pub mod microlp;
pub mod decode;
pub mod community;

/*───────── re-exports voor Rust-gebruikers ─────────*/
pub use assemble::{assemble, Formulation, Variant};
pub use community::{
    find_connected_k_community, find_connected_max_community, find_k_community, find_max_community, solve,
};
pub use decode::{Detection, MaxCommunity, Outcome, Partition};
pub use error::{Error, Result, ValidationError};
pub use graph::Graph;
pub use microlp::MicroLpSolver;
pub use params::Params;
pub use solver::{SolveStatus, Solved, Solver};

/*======================================================================
│  Python-functies
└=====================================================================*/

#[cfg(feature = "python")]
mod python {
    use std::collections::BTreeMap;

    use pyo3::exceptions::{PyRuntimeError, PyValueError};
    use pyo3::prelude::*;
    use pyo3::types::PyModule;
    use pyo3::wrap_pyfunction;

    use crate::{Error, Graph, MicroLpSolver, Outcome, Params};

    fn to_py(e: Error) -> PyErr {
        match e {
            Error::Validation(v) => PyValueError::new_err(v.to_string()),
            other => PyRuntimeError::new_err(other.to_string()),
        }
    }

    fn graph(adjacency: &[Vec<i64>]) -> PyResult<Graph> {
        Graph::from_adjacency(adjacency).map_err(|e| to_py(e.into()))
    }

    /// `Found` → `Some`, `Infeasible` → `None`, indeterminate → RuntimeError.
    fn settle<T>(o: Outcome<T>) -> PyResult<Option<T>> {
        match o {
            Outcome::Found(t) => Ok(Some(t)),
            Outcome::Infeasible => Ok(None),
            Outcome::Indeterminate(_) => Err(PyRuntimeError::new_err("solver stopped before a proof")),
        }
    }

    /// k-community – returns {label: [vertices]} or None.
    #[pyfunction]
    #[pyo3(signature = (adjacency, k, connected = false))]
    fn find_k_community_py(
        adjacency: Vec<Vec<i64>>,
        k: usize,
        connected: bool,
    ) -> PyResult<Option<BTreeMap<usize, Vec<usize>>>> {
        let g = graph(&adjacency)?;
        let p = Params::default();
        let mut solver = MicroLpSolver::new();
        let o = if connected {
            crate::find_connected_k_community(&g, k, &mut solver, &p)
        } else {
            crate::find_k_community(&g, k, &mut solver, &p)
        }
        .map_err(to_py)?;
        Ok(settle(o)?.map(|part| part.into_map()))
    }

    /// Max-community – returns (members, size) or None.
    #[pyfunction]
    #[pyo3(signature = (adjacency, connected = false))]
    fn find_max_community_py(adjacency: Vec<Vec<i64>>, connected: bool) -> PyResult<Option<(Vec<usize>, usize)>> {
        let g = graph(&adjacency)?;
        let p = Params::default();
        let mut solver = MicroLpSolver::new();
        let o = if connected {
            crate::find_connected_max_community(&g, &mut solver, &p)
        } else {
            crate::find_max_community(&g, &mut solver, &p)
        }
        .map_err(to_py)?;
        Ok(settle(o)?.map(|s| (s.members, s.size)))
    }

    /// ***Important***: name `_native` must match `pyproject.toml -> module-name`.
    #[pymodule]
    fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(find_k_community_py, m)?)?;
        m.add_function(wrap_pyfunction!(find_max_community_py, m)?)?;
        Ok(())
    }
}
