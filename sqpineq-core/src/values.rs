//! Variable and dual assignments.

use std::collections::BTreeMap;

use crate::keys::Key;

/// Linearization point: variable key -> coordinates.
///
/// The outer solver owns the point and replaces it every iteration; this
/// crate only reads it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Values {
    map: BTreeMap<Key, Vec<f64>>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value of `key`.
    pub fn insert(&mut self, key: Key, value: Vec<f64>) {
        self.map.insert(key, value);
    }

    pub fn get(&self, key: Key) -> Option<&[f64]> {
        self.map.get(&key).map(Vec::as_slice)
    }

    pub fn exists(&self, key: Key) -> bool {
        self.map.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, &[f64])> + '_ {
        self.map.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

impl FromIterator<(Key, Vec<f64>)> for Values {
    fn from_iter<I: IntoIterator<Item = (Key, Vec<f64>)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

/// Sparse key -> vector map.
///
/// Used for dual assignments, where presence of a dual key marks its
/// constraint as active, and for the deltas the QP stage evaluates linear
/// terms against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorValues {
    map: BTreeMap<Key, Vec<f64>>,
}

impl VectorValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Key, value: Vec<f64>) {
        self.map.insert(key, value);
    }

    pub fn get(&self, key: Key) -> Option<&[f64]> {
        self.map.get(&key).map(Vec::as_slice)
    }

    pub fn exists(&self, key: Key) -> bool {
        self.map.contains_key(&key)
    }

    /// First component of the entry, the multiplier of a scalar constraint.
    pub fn scalar(&self, key: Key) -> Option<f64> {
        self.map.get(&key).and_then(|v| v.first().copied())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, &[f64])> + '_ {
        self.map.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

impl FromIterator<(Key, Vec<f64>)> for VectorValues {
    fn from_iter<I: IntoIterator<Item = (Key, Vec<f64>)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
