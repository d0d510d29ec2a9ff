//! Boolean-product linearization.
//!
//! For binaries `left`, `right` and `w`:
//!     w ≤ left,   w ≤ right,   w ≥ left + right − 1
//! At any integral point this forces w = left ∧ right.

use crate::model::{ConstraintTag, LinExpr, LinkBound, Model, Relation, VarGrid, VarId, VarKind};

/// Add the three linking rows tying `product` to `left ∧ right`.
pub fn link_product(model: &mut Model, product: VarId, left: VarId, right: VarId) {
    let tag = |bound| ConstraintTag::ProductLink { product, bound };

    model.add_linear(
        tag(LinkBound::Left),
        LinExpr::new().with(product, 1.0).with(left, -1.0),
        Relation::Le,
        0.0,
    );
    model.add_linear(
        tag(LinkBound::Right),
        LinExpr::new().with(product, 1.0).with(right, -1.0),
        Relation::Le,
        0.0,
    );
    model.add_linear(
        tag(LinkBound::Lower),
        LinExpr::new().with(product, 1.0).with(left, -1.0).with(right, -1.0),
        Relation::Ge,
        -1.0,
    );
}

/// Declare a fresh binary of the given kind and link it to `left ∧ right`.
pub fn product_of(model: &mut Model, left: VarId, right: VarId, kind: VarKind) -> VarId {
    let w = model.binary(kind);
    link_product(model, w, left, right);
    w
}

/// w[v1, v2, p, q] = x[v1, p] ∧ x[v2, q] for every vertex pair and every
/// ordered community pair p ≠ q.  Pairs with p = q are never referenced by
/// the density rows and are not declared.
#[derive(Clone, Debug)]
pub struct Interactions {
    n:   usize,
    k:   usize,
    ids: Vec<Option<VarId>>,
}

impl Interactions {
    /// Declare and link all interaction binaries for the assignment grid `x`
    /// (rows = vertices, columns = communities).
    pub fn link(model: &mut Model, x: &VarGrid) -> Self {
        let (n, k) = (x.rows(), x.cols());
        let mut ids = Vec::with_capacity(n * n * k * k);
        for v1 in 0..n {
            for v2 in 0..n {
                for p in 0..k {
                    for q in 0..k {
                        ids.push((p != q).then(|| {
                            product_of(model, x.get(v1, p), x.get(v2, q), VarKind::Interaction { v1, v2, p, q })
                        }));
                    }
                }
            }
        }
        Self { n, k, ids }
    }

    #[inline]
    pub fn get(&self, v1: usize, v2: usize, p: usize, q: usize) -> VarId {
        assert!(v1 < self.n && v2 < self.n && p < self.k && q < self.k);
        self.ids[((v1 * self.n + v2) * self.k + p) * self.k + q]
            .expect("interaction variables exist only for p != q")
    }

    /// Number of declared interaction binaries.
    #[cfg(test)]
    fn len(&self) -> usize { self.ids.iter().flatten().count() }
}
