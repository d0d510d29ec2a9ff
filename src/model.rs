//! Declarative mixed-integer model: variables, linear rows, indicator rows
//! and an objective.  Nothing here knows about graphs; the encoders fill a
//! [`Model`] and a [`crate::solver::Solver`] consumes it.
//!
//! • Every variable carries a [`VarKind`] and every row a [`ConstraintTag`],
//!   so a row can be traced back to the vertex/community it encodes.
//! • Indicator rows can be lowered to plain linear rows with a big-M
//!   derived from variable bounds ([`IndicatorConstraint::big_m_relaxation`]).

use crate::error::{Error, Result};

/*───────────────────────────────────────────────────────────*/
/*  Variables                                                */
/*───────────────────────────────────────────────────────────*/

/// Handle of a variable inside one [`Model`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    #[inline] pub fn index(self) -> usize { self.0 }
}

/// Every variable is bounded below by 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Domain {
    Binary,
    Continuous { upper: f64 },
}

impl Domain {
    /// `(lower, upper)`.
    #[inline]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Domain::Binary => (0.0, 1.0),
            Domain::Continuous { upper } => (0.0, upper),
        }
    }
}

/// What a variable stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// x[vertex, community]
    Assign { vertex: usize, community: usize },
    /// x[vertex]: membership in the single candidate set S.
    Member { vertex: usize },
    /// w[v1, v2, p, q] = x[v1, p] ∧ x[v2, q]
    Interaction { v1: usize, v2: usize, p: usize, q: usize },
    /// f[tail, head, commodity]
    Flow { tail: usize, head: usize, commodity: usize },
    /// `vertex` is the flow root of `commodity`.
    Root { vertex: usize, commodity: usize },
    /// Flow injected at `vertex` for `commodity`.
    Supply { vertex: usize, commodity: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variable {
    pub domain: Domain,
    pub kind:   VarKind,
}

/// Row-major table of binaries, e.g. x[vertex, community].
#[derive(Clone, Debug)]
pub struct VarGrid {
    cols: usize,
    ids:  Vec<VarId>,
}

impl VarGrid {
    /// Declare `rows × cols` binaries.
    pub fn binaries<F>(model: &mut Model, rows: usize, cols: usize, mut kind: F) -> Self
    where
        F: FnMut(usize, usize) -> VarKind,
    {
        let mut ids = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                ids.push(model.binary(kind(r, c)));
            }
        }
        Self { cols, ids }
    }

    #[inline] pub fn rows(&self) -> usize { if self.cols == 0 { 0 } else { self.ids.len() / self.cols } }
    #[inline] pub fn cols(&self) -> usize { self.cols }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> VarId {
        assert!(c < self.cols);
        self.ids[r * self.cols + c]
    }

    #[inline]
    pub fn row(&self, r: usize) -> &[VarId] {
        &self.ids[r * self.cols..(r + 1) * self.cols]
    }

    pub fn column(&self, c: usize) -> impl Iterator<Item = VarId> + '_ {
        assert!(c < self.cols);
        self.ids.iter().skip(c).step_by(self.cols).copied()
    }
}

/*───────────────────────────────────────────────────────────*/
/*  Expressions and rows                                     */
/*───────────────────────────────────────────────────────────*/

/// Σ coef·var + constant.  Terms are kept as pushed; repeated variables are
/// allowed and simply add up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinExpr {
    terms:    Vec<(VarId, f64)>,
    constant: f64,
}

impl LinExpr {
    pub fn new() -> Self { Self::default() }

    /// Σ vars with unit coefficients.
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        vars.into_iter().map(|v| (v, 1.0)).collect()
    }

    /// Builder form of [`LinExpr::add`].
    pub fn with(mut self, var: VarId, coef: f64) -> Self {
        self.add(var, coef);
        self
    }

    pub fn add(&mut self, var: VarId, coef: f64) {
        if coef != 0.0 {
            self.terms.push((var, coef));
        }
    }

    pub fn add_constant(&mut self, c: f64) { self.constant += c; }

    #[inline] pub fn terms(&self) -> &[(VarId, f64)] { &self.terms }
    #[inline] pub fn constant(&self) -> f64         { self.constant }

    pub fn eval(&self, a: &Assignment) -> f64 {
        self.terms.iter().map(|&(v, c)| c * a.value(v)).sum::<f64>() + self.constant
    }

    /// Interval bounds of the expression over the variables' domains.
    pub fn bounds(&self, model: &Model) -> (f64, f64) {
        let mut lo = self.constant;
        let mut hi = self.constant;
        for &(v, c) in &self.terms {
            let (vl, vu) = model.variable(v).domain.bounds();
            if c > 0.0 {
                lo += c * vl;
                hi += c * vu;
            } else {
                lo += c * vu;
                hi += c * vl;
            }
        }
        (lo, hi)
    }
}

impl FromIterator<(VarId, f64)> for LinExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        let mut e = LinExpr::new();
        for (v, c) in iter {
            e.add(v, c);
        }
        e
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation { Le, Ge, Eq }

impl Relation {
    pub fn holds(self, lhs: f64, rhs: f64, tol: f64) -> bool {
        match self {
            Relation::Le => lhs <= rhs + tol,
            Relation::Ge => lhs + tol >= rhs,
            Relation::Eq => (lhs - rhs).abs() <= tol,
        }
    }
}

/// Which of the three product-linking inequalities a row is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkBound {
    /// w ≤ left
    Left,
    /// w ≤ right
    Right,
    /// w ≥ left + right − 1
    Lower,
}

/// Structured identity of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintTag {
    /// Community `community` is proportionally dense w.r.t. `rival`, seen from `vertex`.
    Density { vertex: usize, community: usize, rival: usize },
    /// PDS inequality of `vertex` in the single set S.
    Proportional { vertex: usize },
    ProductLink { product: VarId, bound: LinkBound },
    MinCommunitySize { community: usize },
    SingleCommunity { vertex: usize },
    MinSetSize,
    MaxSetSize,
    RootMembership { commodity: usize },
    RootUnique { commodity: usize },
    RootInCommunity { vertex: usize, commodity: usize },
    SupplyAtRoot { vertex: usize, commodity: usize },
    FlowBalance { vertex: usize, commodity: usize },
    FlowTail { tail: usize, head: usize, commodity: usize },
    FlowHead { tail: usize, head: usize, commodity: usize },
}

/// `expr  relation  rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint {
    pub tag:      ConstraintTag,
    pub expr:     LinExpr,
    pub relation: Relation,
    pub rhs:      f64,
}

impl LinearConstraint {
    pub fn is_satisfied(&self, a: &Assignment, tol: f64) -> bool {
        self.relation.holds(self.expr.eval(a), self.rhs, tol)
    }
}

/// `trigger = active_when  ⇒  expr relation rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorConstraint {
    pub tag:         ConstraintTag,
    pub trigger:     VarId,
    pub active_when: bool,
    pub expr:        LinExpr,
    pub relation:    Relation,
    pub rhs:         f64,
}

impl IndicatorConstraint {
    pub fn is_active(&self, a: &Assignment) -> bool {
        a.is_set(self.trigger) == self.active_when
    }

    pub fn is_satisfied(&self, a: &Assignment, tol: f64) -> bool {
        !self.is_active(a) || self.relation.holds(self.expr.eval(a), self.rhs, tol)
    }

    /// Lower to linear rows that are exact when the trigger is active and
    /// implied by the variable bounds when it is not.
    ///
    /// With u = 1 − z (or u = z when `active_when` is false):
    ///   `expr ≥ rhs`  becomes  `expr + M·u ≥ rhs`,  M = rhs − min(expr)
    ///   `expr ≤ rhs`  becomes  `expr − M·u ≤ rhs`,  M = max(expr) − rhs
    /// A side with M ≤ 0 holds everywhere and produces no row.
    pub fn big_m_relaxation(&self, model: &Model) -> Result<Vec<LinearConstraint>> {
        let (lo, hi) = self.expr.bounds(model);
        if !lo.is_finite() || !hi.is_finite() {
            return Err(Error::UnboundedIndicator { tag: self.tag });
        }

        // u = u0 + uz·z
        let (u0, uz) = if self.active_when { (1.0, -1.0) } else { (0.0, 1.0) };

        let mut rows = Vec::with_capacity(2);
        if matches!(self.relation, Relation::Ge | Relation::Eq) {
            let m = self.rhs - lo;
            if m > 0.0 {
                rows.push(LinearConstraint {
                    tag:      self.tag,
                    expr:     self.expr.clone().with(self.trigger, m * uz),
                    relation: Relation::Ge,
                    rhs:      self.rhs - m * u0,
                });
            }
        }
        if matches!(self.relation, Relation::Le | Relation::Eq) {
            let m = hi - self.rhs;
            if m > 0.0 {
                rows.push(LinearConstraint {
                    tag:      self.tag,
                    expr:     self.expr.clone().with(self.trigger, -m * uz),
                    relation: Relation::Le,
                    rhs:      self.rhs + m * u0,
                });
            }
        }
        Ok(rows)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Objective {
    /// Any feasible point will do.
    #[default]
    Feasibility,
    Maximize(LinExpr),
}

/*───────────────────────────────────────────────────────────*/
/*  Assignment                                               */
/*───────────────────────────────────────────────────────────*/

/// Variable values returned by a solver, indexed by [`VarId`].
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    pub fn new(values: Vec<f64>) -> Self { Self { values } }

    #[inline] pub fn value(&self, v: VarId) -> f64 { self.values[v.index()] }

    /// Binary reading of a variable (value > 0.5), used for indicator
    /// activation.  Independent of the decode tolerance.
    #[inline] pub fn is_set(&self, v: VarId) -> bool { self.value(v) > 0.5 }

    #[inline] pub fn len(&self) -> usize { self.values.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

/*───────────────────────────────────────────────────────────*/
/*  Model                                                    */
/*───────────────────────────────────────────────────────────*/

#[derive(Clone, Debug, Default)]
pub struct Model {
    vars:       Vec<Variable>,
    linear:     Vec<LinearConstraint>,
    indicators: Vec<IndicatorConstraint>,
    objective:  Objective,
}

impl Model {
    pub fn new() -> Self { Self::default() }

    /* variables */

    pub fn add_var(&mut self, domain: Domain, kind: VarKind) -> VarId {
        self.vars.push(Variable { domain, kind });
        VarId(self.vars.len() - 1)
    }

    #[inline]
    pub fn binary(&mut self, kind: VarKind) -> VarId {
        self.add_var(Domain::Binary, kind)
    }

    #[inline]
    pub fn continuous(&mut self, upper: f64, kind: VarKind) -> VarId {
        self.add_var(Domain::Continuous { upper }, kind)
    }

    /* rows */

    pub fn add_linear(&mut self, tag: ConstraintTag, expr: LinExpr, relation: Relation, rhs: f64) {
        self.linear.push(LinearConstraint { tag, expr, relation, rhs });
    }

    pub fn add_indicator(
        &mut self,
        tag: ConstraintTag,
        trigger: VarId,
        active_when: bool,
        expr: LinExpr,
        relation: Relation,
        rhs: f64,
    ) {
        assert_eq!(self.variable(trigger).domain, Domain::Binary, "indicator trigger must be binary");
        self.indicators.push(IndicatorConstraint { tag, trigger, active_when, expr, relation, rhs });
    }

    pub fn set_objective(&mut self, objective: Objective) { self.objective = objective; }

    /* queries */

    #[inline] pub fn num_vars(&self) -> usize                        { self.vars.len() }
    #[inline] pub fn variable(&self, v: VarId) -> &Variable           { &self.vars[v.index()] }
    #[inline] pub fn linear(&self) -> &[LinearConstraint]             { &self.linear }
    #[inline] pub fn indicators(&self) -> &[IndicatorConstraint]      { &self.indicators }
    #[inline] pub fn objective(&self) -> &Objective                   { &self.objective }

    pub fn variables(&self) -> impl Iterator<Item = (VarId, &Variable)> + '_ {
        self.vars.iter().enumerate().map(|(i, v)| (VarId(i), v))
    }

    /// Tags of every row `a` violates; an inactive indicator never does.
    pub fn violated(&self, a: &Assignment, tol: f64) -> Vec<ConstraintTag> {
        assert_eq!(a.len(), self.num_vars(), "assignment does not match model");
        let lin = self.linear.iter().filter(|c| !c.is_satisfied(a, tol)).map(|c| c.tag);
        let ind = self.indicators.iter().filter(|c| !c.is_satisfied(a, tol)).map(|c| c.tag);
        lin.chain(ind).collect()
    }

    /// Domains respected and no row violated.
    pub fn is_feasible(&self, a: &Assignment, tol: f64) -> bool {
        let in_domain = self.variables().all(|(id, var)| {
            let x = a.value(id);
            let (lo, hi) = var.domain.bounds();
            let integral = var.domain != Domain::Binary || (x - x.round()).abs() <= tol;
            integral && x + tol >= lo && x <= hi + tol
        });
        in_domain && self.violated(a, tol).is_empty()
    }

    /// All rows as plain linear constraints, indicators lowered by big-M.
    pub fn lowered_rows(&self) -> Result<Vec<LinearConstraint>> {
        let mut rows = self.linear.clone();
        for ind in &self.indicators {
            rows.extend(ind.big_m_relaxation(self)?);
        }
        Ok(rows)
    }
}

/*──────────────────────── tests ───────────────────────────*/

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn all_binary(n: usize) -> impl Iterator<Item = Assignment> {
        (0..1usize << n).map(move |mask| {
            Assignment::new((0..n).map(|i| ((mask >> i) & 1) as f64).collect())
        })
    }

    #[test]
    fn bounds_follow_coefficient_signs() {
        let mut m = Model::new();
        let x = m.binary(VarKind::Member { vertex: 0 });
        let f = m.continuous(3.0, VarKind::Flow { tail: 0, head: 1, commodity: 0 });
        let mut e = LinExpr::new().with(x, 2.0).with(f, -1.0);
        e.add_constant(1.0);
        assert_eq!(e.bounds(&m), (-2.0, 3.0));
    }

    #[test]
    fn big_m_matches_indicator_semantics() {
        // z = 1  ⇒  a + b ≥ 2      and     z = 0  ⇒  a − b ≤ −1
        let mut m = Model::new();
        let z = m.binary(VarKind::Member { vertex: 0 });
        let a = m.binary(VarKind::Member { vertex: 1 });
        let b = m.binary(VarKind::Member { vertex: 2 });
        let tag = ConstraintTag::Proportional { vertex: 0 };
        m.add_indicator(tag, z, true, LinExpr::sum([a, b]), Relation::Ge, 2.0);
        m.add_indicator(tag, z, false, LinExpr::new().with(a, 1.0).with(b, -1.0), Relation::Le, -1.0);

        let rows = m.lowered_rows().unwrap();
        for point in all_binary(3) {
            let by_rows = rows.iter().all(|r| r.is_satisfied(&point, TOL));
            let by_indicator = m.indicators().iter().all(|c| c.is_satisfied(&point, TOL));
            assert_eq!(by_rows, by_indicator, "disagreement at {point:?}");
        }
    }

    #[test]
    fn big_m_equality_and_implied_rows() {
        let mut m = Model::new();
        let z = m.binary(VarKind::Member { vertex: 0 });
        let a = m.binary(VarKind::Member { vertex: 1 });
        let tag = ConstraintTag::MinSetSize;

        // a ≥ 0 always holds: nothing to emit.
        m.add_indicator(tag, z, true, LinExpr::sum([a]), Relation::Ge, 0.0);
        assert!(m.indicators()[0].big_m_relaxation(&m).unwrap().is_empty());

        // z = 1 ⇒ a = 1  needs only the ≥ side.
        m.add_indicator(tag, z, true, LinExpr::sum([a]), Relation::Eq, 1.0);
        let rows = m.indicators()[1].big_m_relaxation(&m).unwrap();
        assert_eq!(rows.len(), 1);
        for point in all_binary(2) {
            assert_eq!(rows[0].is_satisfied(&point, TOL), m.indicators()[1].is_satisfied(&point, TOL));
        }
    }

    #[test]
    fn unbounded_indicator_is_rejected() {
        let mut m = Model::new();
        let z = m.binary(VarKind::Member { vertex: 0 });
        let f = m.continuous(f64::INFINITY, VarKind::Supply { vertex: 0, commodity: 0 });
        m.add_indicator(ConstraintTag::MinSetSize, z, true, LinExpr::sum([f]), Relation::Le, 1.0);
        assert!(matches!(m.lowered_rows(), Err(Error::UnboundedIndicator { .. })));
    }

    #[test]
    fn grid_rows_and_columns() {
        let mut m = Model::new();
        let x = VarGrid::binaries(&mut m, 3, 2, |vertex, community| VarKind::Assign { vertex, community });
        assert_eq!((x.rows(), x.cols()), (3, 2));
        assert_eq!(x.row(1), &[x.get(1, 0), x.get(1, 1)]);
        let col: Vec<_> = x.column(1).collect();
        assert_eq!(col, vec![x.get(0, 1), x.get(1, 1), x.get(2, 1)]);
        assert_eq!(m.variable(x.get(2, 1)).kind, VarKind::Assign { vertex: 2, community: 1 });
    }

    #[test]
    fn feasibility_checks_domains() {
        let mut m = Model::new();
        let x = m.binary(VarKind::Member { vertex: 0 });
        m.add_linear(ConstraintTag::MinSetSize, LinExpr::sum([x]), Relation::Ge, 0.0);
        assert!(m.is_feasible(&Assignment::new(vec![1.0]), TOL));
        assert!(!m.is_feasible(&Assignment::new(vec![0.5]), TOL));
        assert!(!m.is_feasible(&Assignment::new(vec![2.0]), TOL));
    }
}
