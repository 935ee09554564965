use std::fmt;

use crate::error::{ConstraintError, Result};
use crate::keys::Key;
use crate::linear::{HessianFactor, JacobianFactor, LinearFactor};
use crate::numerics::linalg::{scale_inplace, symmetrize_inplace};
use crate::values::{Values, VectorValues};

use super::constraint::InequalityConstraint;

type ValueFn = dyn Fn(&[f64]) -> f64 + Send + Sync;
type GradientFn = dyn Fn(&[f64], &mut [f64]) + Send + Sync;
type HessianFn = dyn Fn(&[f64], &mut [f64]) + Send + Sync;

/// Inequality g(x) ≤ 0 defined by closures over the stacked coordinates of
/// its keys.
///
/// - `value(x)`: g(x), with `x` the concatenation of the key values in order
/// - `gradient(x, out)`: fill ∇g(x), len = n
/// - `hessian(x, out)` (optional): fill ∇²g(x), len = n*n, row-major.
///   Without it the Hessian is a central difference of the gradient.
pub struct ScalarInequality {
    keys: Vec<Key>,
    dims: Vec<usize>,
    dual_key: Key,
    value_fn: Box<ValueFn>,
    gradient_fn: Box<GradientFn>,
    hessian_fn: Option<Box<HessianFn>>,
    fd_step: f64,
}

impl ScalarInequality {
    pub fn new<V, G>(
        keys_dims: Vec<(Key, usize)>,
        dual_key: Key,
        value: V,
        gradient: G,
    ) -> Self
    where
        V: Fn(&[f64]) -> f64 + Send + Sync + 'static,
        G: Fn(&[f64], &mut [f64]) + Send + Sync + 'static,
    {
        let (keys, dims) = keys_dims.into_iter().unzip();
        Self {
            keys,
            dims,
            dual_key,
            value_fn: Box::new(value),
            gradient_fn: Box::new(gradient),
            hessian_fn: None,
            fd_step: 1e-5,
        }
    }

    /// Use an analytic Hessian instead of finite differences.
    pub fn with_hessian<H>(mut self, hessian: H) -> Self
    where
        H: Fn(&[f64], &mut [f64]) + Send + Sync + 'static,
    {
        self.hessian_fn = Some(Box::new(hessian));
        self
    }

    /// Step of the finite-difference Hessian.
    pub fn with_fd_step(mut self, fd_step: f64) -> Self {
        self.fd_step = fd_step;
        self
    }

    /// Stacked dimension of all keys.
    pub fn dim(&self) -> usize {
        self.dims.iter().sum()
    }

    fn stack(&self, values: &Values) -> Result<Vec<f64>> {
        let mut x = Vec::with_capacity(self.dim());
        for (&key, &dim) in self.keys.iter().zip(&self.dims) {
            let v = values
                .get(key)
                .ok_or(ConstraintError::MissingVariable { key })?;
            if v.len() != dim {
                return Err(ConstraintError::DimensionMismatch {
                    key,
                    expected: dim,
                    actual: v.len(),
                });
            }
            x.extend_from_slice(v);
        }
        Ok(x)
    }

    fn curvature(&self, x: &[f64]) -> Vec<f64> {
        let n = x.len();
        let mut h = vec![0.0f64; n * n];
        if let Some(hessian_fn) = &self.hessian_fn {
            hessian_fn(x, &mut h);
            return h;
        }

        let step = self.fd_step;
        let mut xp = x.to_vec();
        let mut gp = vec![0.0f64; n];
        let mut gm = vec![0.0f64; n];
        for i in 0..n {
            xp[i] = x[i] + step;
            (self.gradient_fn)(&xp, &mut gp);
            xp[i] = x[i] - step;
            (self.gradient_fn)(&xp, &mut gm);
            xp[i] = x[i];

            // column i of the Hessian
            for k in 0..n {
                h[k * n + i] = (gp[k] - gm[k]) / (2.0 * step);
            }
        }
        symmetrize_inplace(&mut h, n);
        h
    }
}

impl InequalityConstraint for ScalarInequality {
    fn keys(&self) -> &[Key] {
        &self.keys
    }

    fn dual_key(&self) -> Key {
        self.dual_key
    }

    fn violation(&self, values: &Values) -> Result<f64> {
        let x = self.stack(values)?;
        Ok((self.value_fn)(&x))
    }

    fn linearize(&self, values: &Values) -> Result<LinearFactor> {
        let x = self.stack(values)?;
        let g = (self.value_fn)(&x);
        let mut grad = vec![0.0f64; x.len()];
        (self.gradient_fn)(&x, &mut grad);

        let mut terms = Vec::with_capacity(self.keys.len());
        let mut offset = 0;
        for (&key, &dim) in self.keys.iter().zip(&self.dims) {
            terms.push((key, grad[offset..offset + dim].to_vec()));
            offset += dim;
        }
        // A δ ≤ b  <=>  g(x) + ∇g(x)ᵀ δ ≤ 0
        Ok(JacobianFactor::new(terms, vec![-g]).into())
    }

    fn hessian_contribution(
        &self,
        values: &Values,
        duals: &VectorValues,
    ) -> Result<Option<HessianFactor>> {
        let Some(lambda) = duals.scalar(self.dual_key) else {
            return Ok(None);
        };
        let x = self.stack(values)?;
        let mut h = self.curvature(&x);
        scale_inplace(&mut h, -lambda);

        let keys_dims = self
            .keys
            .iter()
            .copied()
            .zip(self.dims.iter().copied())
            .collect();
        Ok(Some(HessianFactor::from_curvature(keys_dims, h)))
    }
}

impl fmt::Debug for ScalarInequality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarInequality")
            .field("keys", &self.keys)
            .field("dims", &self.dims)
            .field("dual_key", &self.dual_key)
            .field("analytic_hessian", &self.hessian_fn.is_some())
            .field("fd_step", &self.fd_step)
            .finish()
    }
}
