use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::error::{ConstraintError, Result};
use crate::keys::Key;
use crate::linear::{HessianCorrection, InequalityGraph, LinearInequality};
use crate::trace::{ConstraintTracer, TraceRow};
use crate::values::{Values, VectorValues};

use super::constraint::InequalityConstraint;

/// Constraint object stored by the graph.
pub type DynConstraint = dyn InequalityConstraint + Send + Sync;

/// Position of a constraint in its graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintIndex(pub usize);

impl fmt::Display for ConstraintIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered set of nonlinear inequality constraints.
///
/// The graph owns its constraints; callers refer to them by
/// [`ConstraintIndex`]. Iteration order is insertion order, and every pass
/// over the graph (linearization, KKT check, Hessian aggregation, merit)
/// visits constraints in that order.
#[derive(Default)]
pub struct NonlinearInequalityGraph {
    constraints: Vec<Box<DynConstraint>>,
    dual_keys: BTreeSet<Key>,
}

impl NonlinearInequalityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint. Fails if its dual key is already taken.
    pub fn add<C>(&mut self, constraint: C) -> Result<ConstraintIndex>
    where
        C: InequalityConstraint + Send + Sync + 'static,
    {
        self.add_boxed(Box::new(constraint))
    }

    pub fn add_boxed(&mut self, constraint: Box<DynConstraint>) -> Result<ConstraintIndex> {
        let dual_key = constraint.dual_key();
        if !self.dual_keys.insert(dual_key) {
            return Err(ConstraintError::DuplicateDualKey(dual_key));
        }
        self.constraints.push(constraint);
        Ok(ConstraintIndex(self.constraints.len() - 1))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn get(&self, index: ConstraintIndex) -> Option<&DynConstraint> {
        self.constraints.get(index.0).map(|c| c.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DynConstraint> + '_ {
        self.constraints.iter().map(|c| c.as_ref())
    }

    /// Index of the constraint owning `dual_key`.
    pub fn index_of(&self, dual_key: Key) -> Option<ConstraintIndex> {
        if !self.dual_keys.contains(&dual_key) {
            return None;
        }
        self.constraints
            .iter()
            .position(|c| c.dual_key() == dual_key)
            .map(ConstraintIndex)
    }

    /// Dual keys in constraint order.
    pub fn dual_keys(&self) -> Vec<Key> {
        self.constraints.iter().map(|c| c.dual_key()).collect()
    }

    /// Linearize every constraint at `values`.
    ///
    /// Entry i of the result comes from constraint i and carries its dual
    /// key. Fails on the first constraint that does not linearize to a
    /// one-row Jacobian factor.
    pub fn linearize(&self, values: &Values) -> Result<InequalityGraph> {
        let tracer = ConstraintTracer::new("linearize");
        let mut linear = InequalityGraph::with_capacity(self.constraints.len());

        for (i, constraint) in self.constraints.iter().enumerate() {
            let dual_key = constraint.dual_key();
            let factor = constraint.linearize(values)?;
            let kind = factor.kind();
            let jacobian = factor
                .into_jacobian()
                .ok_or(ConstraintError::MalformedConstraint { dual_key, kind })?;
            if jacobian.rows() != 1 {
                return Err(ConstraintError::NonScalarConstraint {
                    dual_key,
                    rows: jacobian.rows(),
                });
            }

            tracer.emit(TraceRow::constraint(i, dual_key).violation(-jacobian.b()[0]));
            linear.push(LinearInequality::new(jacobian, dual_key));
        }

        debug!(constraints = linear.len(), "linearized inequality constraints");
        Ok(linear)
    }

    /// Sum of -λ·∇²g over the active constraints, in insertion order.
    ///
    /// Constraints without an entry in `duals` are skipped entirely.
    pub fn multiplied_hessians(
        &self,
        values: &Values,
        duals: &VectorValues,
    ) -> Result<HessianCorrection> {
        let tracer = ConstraintTracer::new("hessian");
        let mut correction = HessianCorrection::new();

        for (i, constraint) in self.constraints.iter().enumerate() {
            let dual_key = constraint.dual_key();
            if !duals.exists(dual_key) {
                continue;
            }
            if let Some(term) = constraint.hessian_contribution(values, duals)? {
                let mut row = TraceRow::constraint(i, dual_key).active(true);
                if let Some(lambda) = duals.scalar(dual_key) {
                    row = row.multiplier(lambda);
                }
                tracer.emit(row);
                correction.push(term);
            }
        }

        debug!(
            active = correction.len(),
            constraints = self.constraints.len(),
            "aggregated constraint Hessian corrections"
        );
        Ok(correction)
    }

    /// Σ |g_i(x)|, a merit / diagnostic value. Zero only if every violation
    /// is exactly zero.
    pub fn total_violation(&self, values: &Values) -> Result<f64> {
        let tracer = ConstraintTracer::new("merit");
        let mut total = 0.0;

        for (i, constraint) in self.constraints.iter().enumerate() {
            let dual_key = constraint.dual_key();
            let violation = constraint.violation(values)?;
            if !violation.is_finite() {
                return Err(ConstraintError::NonFiniteViolation {
                    dual_key,
                    value: violation,
                });
            }
            tracer.emit(TraceRow::constraint(i, dual_key).violation(violation));
            total += violation.abs();
        }
        Ok(total)
    }
}

impl fmt::Debug for NonlinearInequalityGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonlinearInequalityGraph")
            .field("dual_keys", &self.dual_keys())
            .finish()
    }
}
