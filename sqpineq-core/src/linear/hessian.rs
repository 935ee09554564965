use crate::error::{ConstraintError, Result};
use crate::keys::Key;
use crate::numerics::linalg::{dot, quadratic_form};
use crate::values::VectorValues;

/// Quadratic form ½δᵀGδ - gᵀδ + f over a set of variables.
///
/// `G` is dense and symmetric over the stacked key dimensions, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct HessianFactor {
    keys: Vec<Key>,
    dims: Vec<usize>,
    info: Vec<f64>,
    linear: Vec<f64>,
    constant: f64,
}

impl HessianFactor {
    pub fn new(
        keys_dims: Vec<(Key, usize)>,
        info: Vec<f64>,
        linear: Vec<f64>,
        constant: f64,
    ) -> Self {
        let (keys, dims): (Vec<Key>, Vec<usize>) = keys_dims.into_iter().unzip();
        let n: usize = dims.iter().sum();
        assert_eq!(info.len(), n * n, "G must be {n} x {n}");
        assert_eq!(linear.len(), n, "g must have length {n}");
        Self {
            keys,
            dims,
            info,
            linear,
            constant,
        }
    }

    /// Pure curvature term ½δᵀGδ with zero linear and constant parts.
    pub fn from_curvature(keys_dims: Vec<(Key, usize)>, info: Vec<f64>) -> Self {
        let n: usize = keys_dims.iter().map(|(_, d)| d).sum();
        Self::new(keys_dims, info, vec![0.0; n], 0.0)
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Stacked dimension of all keys.
    pub fn dim(&self) -> usize {
        self.linear.len()
    }

    pub fn info(&self) -> &[f64] {
        &self.info
    }

    pub fn linear_term(&self) -> &[f64] {
        &self.linear
    }

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    /// Entry G[row, col] of the stacked matrix.
    pub fn entry(&self, row: usize, col: usize) -> f64 {
        self.info[row * self.dim() + col]
    }

    /// ½δᵀGδ - gᵀδ + f. Keys absent from `delta` count as zeros.
    pub fn error(&self, delta: &VectorValues) -> Result<f64> {
        let x = self.stack(delta)?;
        Ok(0.5 * quadratic_form(&self.info, &x, self.dim()) - dot(&self.linear, &x)
            + self.constant)
    }

    fn stack(&self, delta: &VectorValues) -> Result<Vec<f64>> {
        let mut x = Vec::with_capacity(self.dim());
        for (&key, &dim) in self.keys.iter().zip(&self.dims) {
            match delta.get(key) {
                Some(d) if d.len() != dim => {
                    return Err(ConstraintError::DimensionMismatch {
                        key,
                        expected: dim,
                        actual: d.len(),
                    });
                }
                Some(d) => x.extend_from_slice(d),
                None => x.extend(std::iter::repeat(0.0).take(dim)),
            }
        }
        Ok(x)
    }
}

/// Sum of dual-weighted constraint curvature terms, added to the objective
/// Hessian to form the Lagrangian Hessian of the QP subproblem.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HessianCorrection {
    factors: Vec<HessianFactor>,
}

impl HessianCorrection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, factor: HessianFactor) {
        self.factors.push(factor);
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HessianFactor> {
        self.factors.iter()
    }

    /// Sorted union of the keys touched by every term.
    pub fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self
            .factors
            .iter()
            .flat_map(|f| f.keys().iter().copied())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Sum of term errors at `delta`.
    pub fn error(&self, delta: &VectorValues) -> Result<f64> {
        self.factors.iter().map(|f| f.error(delta)).sum()
    }
}

impl<'a> IntoIterator for &'a HessianCorrection {
    type Item = &'a HessianFactor;
    type IntoIter = std::slice::Iter<'a, HessianFactor>;

    fn into_iter(self) -> Self::IntoIter {
        self.factors.iter()
    }
}
