use crate::error::Result;
use crate::keys::Key;
use crate::values::VectorValues;

use super::jacobian::JacobianFactor;

/// Linearized inequality a·δ ≤ b, tagged with the dual key of the constraint
/// it came from.
///
/// The QP stage flips `active` on its own copies while it searches for the
/// active set; freshly linearized inequalities start inactive.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearInequality {
    jacobian: JacobianFactor,
    dual_key: Key,
    active: bool,
}

impl LinearInequality {
    pub fn new(jacobian: JacobianFactor, dual_key: Key) -> Self {
        Self {
            jacobian,
            dual_key,
            active: false,
        }
    }

    pub fn jacobian(&self) -> &JacobianFactor {
        &self.jacobian
    }

    pub fn dual_key(&self) -> Key {
        self.dual_key
    }

    pub fn keys(&self) -> &[Key] {
        self.jacobian.keys()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// a·δ for the single row.
    pub fn dot_product_row(&self, delta: &VectorValues) -> Result<f64> {
        Ok(self.jacobian.multiply(delta)?[0])
    }

    /// a·δ - b; the linearized constraint holds when this is ≤ 0.
    pub fn error(&self, delta: &VectorValues) -> Result<f64> {
        Ok(self.dot_product_row(delta)? - self.jacobian.b()[0])
    }
}

/// Ordered linear inequalities; entry i comes from constraint i.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InequalityGraph {
    inequalities: Vec<LinearInequality>,
}

impl InequalityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inequalities: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, inequality: LinearInequality) {
        self.inequalities.push(inequality);
    }

    pub fn len(&self) -> usize {
        self.inequalities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inequalities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LinearInequality> {
        self.inequalities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut LinearInequality> {
        self.inequalities.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinearInequality> {
        self.inequalities.iter()
    }

    /// Dual keys of the inequalities currently flagged active, in order.
    pub fn active_dual_keys(&self) -> Vec<Key> {
        self.inequalities
            .iter()
            .filter(|ineq| ineq.is_active())
            .map(LinearInequality::dual_key)
            .collect()
    }

    /// True when every linearized inequality holds at `delta` within `tol`.
    pub fn is_feasible(&self, delta: &VectorValues, tol: f64) -> Result<bool> {
        for ineq in &self.inequalities {
            if ineq.error(delta)? > tol {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<'a> IntoIterator for &'a InequalityGraph {
    type Item = &'a LinearInequality;
    type IntoIter = std::slice::Iter<'a, LinearInequality>;

    fn into_iter(self) -> Self::IntoIter {
        self.inequalities.iter()
    }
}
