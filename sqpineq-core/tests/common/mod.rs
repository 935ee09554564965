#![allow(dead_code)]

use sqpineq::{
    HessianFactor, InequalityConstraint, JacobianFactor, Key, LinearFactor, Result, Values,
    VectorValues,
};

pub fn x(i: u64) -> Key {
    Key::symbol('x', i)
}

pub fn l(i: u64) -> Key {
    Key::symbol('l', i)
}

/// Constraint with a fixed violation, independent of the point.
pub struct FixedViolation {
    pub keys: Vec<Key>,
    pub dual_key: Key,
    pub violation: f64,
    /// Diagonal of ∇²g used for the Hessian contribution.
    pub curvature: f64,
}

impl FixedViolation {
    pub fn new(var: Key, dual_key: Key, violation: f64) -> Self {
        Self {
            keys: vec![var],
            dual_key,
            violation,
            curvature: 1.0,
        }
    }
}

impl InequalityConstraint for FixedViolation {
    fn keys(&self) -> &[Key] {
        &self.keys
    }

    fn dual_key(&self) -> Key {
        self.dual_key
    }

    fn violation(&self, _values: &Values) -> Result<f64> {
        Ok(self.violation)
    }

    fn linearize(&self, _values: &Values) -> Result<LinearFactor> {
        Ok(JacobianFactor::new(vec![(self.keys[0], vec![1.0])], vec![-self.violation]).into())
    }

    fn hessian_contribution(
        &self,
        _values: &Values,
        duals: &VectorValues,
    ) -> Result<Option<HessianFactor>> {
        let Some(lambda) = duals.scalar(self.dual_key) else {
            return Ok(None);
        };
        Ok(Some(HessianFactor::from_curvature(
            vec![(self.keys[0], 1)],
            vec![-lambda * self.curvature],
        )))
    }
}

/// Constraint whose linearization is a Hessian factor.
pub struct QuadraticLinearization {
    pub keys: Vec<Key>,
    pub dual_key: Key,
}

impl InequalityConstraint for QuadraticLinearization {
    fn keys(&self) -> &[Key] {
        &self.keys
    }

    fn dual_key(&self) -> Key {
        self.dual_key
    }

    fn violation(&self, _values: &Values) -> Result<f64> {
        Ok(0.0)
    }

    fn linearize(&self, _values: &Values) -> Result<LinearFactor> {
        Ok(HessianFactor::from_curvature(vec![(self.keys[0], 1)], vec![1.0]).into())
    }

    fn hessian_contribution(
        &self,
        _values: &Values,
        _duals: &VectorValues,
    ) -> Result<Option<HessianFactor>> {
        Ok(None)
    }
}

/// Constraint whose Jacobian has two rows.
pub struct TwoRowConstraint {
    pub keys: Vec<Key>,
    pub dual_key: Key,
}

impl InequalityConstraint for TwoRowConstraint {
    fn keys(&self) -> &[Key] {
        &self.keys
    }

    fn dual_key(&self) -> Key {
        self.dual_key
    }

    fn violation(&self, _values: &Values) -> Result<f64> {
        Ok(0.0)
    }

    fn linearize(&self, _values: &Values) -> Result<LinearFactor> {
        Ok(JacobianFactor::new(vec![(self.keys[0], vec![1.0, 0.0])], vec![0.0, 0.0]).into())
    }

    fn hessian_contribution(
        &self,
        _values: &Values,
        _duals: &VectorValues,
    ) -> Result<Option<HessianFactor>> {
        Ok(None)
    }
}

/// Unit disk x0² + x1² - 1 ≤ 0 on a 2D variable.
pub fn unit_disk(var: Key, dual_key: Key) -> sqpineq::ScalarInequality {
    sqpineq::ScalarInequality::new(
        vec![(var, 2)],
        dual_key,
        |x: &[f64]| x[0] * x[0] + x[1] * x[1] - 1.0,
        |x: &[f64], g: &mut [f64]| {
            g[0] = 2.0 * x[0];
            g[1] = 2.0 * x[1];
        },
    )
}

pub fn point(entries: Vec<(Key, Vec<f64>)>) -> Values {
    entries.into_iter().collect()
}

pub fn duals(entries: &[(Key, f64)]) -> VectorValues {
    entries.iter().map(|(k, v)| (*k, vec![*v])).collect()
}
