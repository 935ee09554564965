use crate::error::{ConstraintError, Result};
use crate::keys::Key;
use crate::numerics::linalg::dot;
use crate::values::VectorValues;

/// Linear factor A·δ - b with one coefficient block per variable.
///
/// Each block is `rows x dim` row-major; the i-th row of the block for key k
/// multiplies `delta[k]`.
#[derive(Clone, Debug, PartialEq)]
pub struct JacobianFactor {
    keys: Vec<Key>,
    dims: Vec<usize>,
    blocks: Vec<Vec<f64>>,
    b: Vec<f64>,
}

impl JacobianFactor {
    /// Build from `(key, block)` terms and the right-hand side.
    ///
    /// The row count is `b.len()`; every block length must be a multiple of it.
    pub fn new(terms: Vec<(Key, Vec<f64>)>, b: Vec<f64>) -> Self {
        let rows = b.len();
        assert!(rows > 0, "Jacobian factor needs at least one row");

        let mut keys = Vec::with_capacity(terms.len());
        let mut dims = Vec::with_capacity(terms.len());
        let mut blocks = Vec::with_capacity(terms.len());
        for (key, block) in terms {
            assert!(
                block.len() % rows == 0,
                "block for {key} has {} entries, not a multiple of {rows} rows",
                block.len()
            );
            keys.push(key);
            dims.push(block.len() / rows);
            blocks.push(block);
        }

        Self {
            keys,
            dims,
            blocks,
            b,
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn rows(&self) -> usize {
        self.b.len()
    }

    /// Column count of the block for `key`.
    pub fn dim(&self, key: Key) -> Option<usize> {
        self.position(key).map(|i| self.dims[i])
    }

    pub fn block(&self, key: Key) -> Option<&[f64]> {
        self.position(key).map(|i| self.blocks[i].as_slice())
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// A·δ. Keys absent from `delta` contribute zero; a present entry must
    /// match the block width.
    pub fn multiply(&self, delta: &VectorValues) -> Result<Vec<f64>> {
        let rows = self.rows();
        let mut out = vec![0.0; rows];
        for ((&key, &dim), block) in self.keys.iter().zip(&self.dims).zip(&self.blocks) {
            let Some(d) = delta.get(key) else {
                continue;
            };
            if d.len() != dim {
                return Err(ConstraintError::DimensionMismatch {
                    key,
                    expected: dim,
                    actual: d.len(),
                });
            }
            for (i, o) in out.iter_mut().enumerate() {
                *o += dot(&block[i * dim..(i + 1) * dim], d);
            }
        }
        Ok(out)
    }

    /// A·δ - b.
    pub fn error_vector(&self, delta: &VectorValues) -> Result<Vec<f64>> {
        let mut e = self.multiply(delta)?;
        for (ei, bi) in e.iter_mut().zip(&self.b) {
            *ei -= bi;
        }
        Ok(e)
    }

    fn position(&self, key: Key) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }
}
