//! Scalar-or-vector numeric inputs.
//!
//! Most model inputs accept either one value or a sweep of values. At most one
//! input of a computation may be a vector; the output then has its length.

use serde::{Deserialize, Serialize};

use crate::error::{GroundRiskError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Param {
    pub fn is_vector(&self) -> bool {
        matches!(self, Param::Vector(_))
    }

    /// Number of elements; a scalar counts as one.
    pub fn len(&self) -> usize {
        match self {
            Param::Scalar(_) => 1,
            Param::Vector(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i` of a vector, or the scalar itself for any `i`.
    ///
    /// Indices past the end of a vector repeat its last element, which only
    /// happens when the caller skipped [`broadcast_len`].
    pub fn at(&self, i: usize) -> f64 {
        match self {
            Param::Scalar(x) => *x,
            Param::Vector(v) => v.get(i).or(v.last()).copied().unwrap_or(f64::NAN),
        }
    }

    /// First element (the scalar value for scalars).
    pub fn first(&self) -> f64 {
        self.at(0)
    }

    pub fn values(&self) -> Vec<f64> {
        match self {
            Param::Scalar(x) => vec![*x],
            Param::Vector(v) => v.clone(),
        }
    }

    /// Apply `f` element-wise, keeping the shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Param {
        match self {
            Param::Scalar(x) => Param::Scalar(f(*x)),
            Param::Vector(v) => Param::Vector(v.iter().map(|&x| f(x)).collect()),
        }
    }

    pub fn all(&self, f: impl Fn(f64) -> bool) -> bool {
        match self {
            Param::Scalar(x) => f(*x),
            Param::Vector(v) => v.iter().all(|&x| f(x)),
        }
    }

    /// Smallest element, used for range warnings on sweeps.
    pub fn min(&self) -> f64 {
        match self {
            Param::Scalar(x) => *x,
            Param::Vector(v) => v.iter().copied().fold(f64::INFINITY, f64::min),
        }
    }

    pub fn max(&self) -> f64 {
        match self {
            Param::Scalar(x) => *x,
            Param::Vector(v) => v.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl Default for Param {
    fn default() -> Self {
        Param::Scalar(0.0)
    }
}

impl From<f64> for Param {
    fn from(x: f64) -> Self {
        Param::Scalar(x)
    }
}

impl From<Vec<f64>> for Param {
    fn from(v: Vec<f64>) -> Self {
        Param::Vector(v)
    }
}

impl From<&[f64]> for Param {
    fn from(v: &[f64]) -> Self {
        Param::Vector(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Param {
    fn from(v: [f64; N]) -> Self {
        Param::Vector(v.to_vec())
    }
}

/// Common length of a set of named inputs.
///
/// Returns 1 when all are scalars and the vector length when exactly one is a
/// vector. Two vectors, or an empty vector, are errors.
pub fn broadcast_len(params: &[(&'static str, &Param)]) -> Result<usize> {
    let mut found: Option<(&'static str, usize)> = None;
    for &(name, p) in params {
        if let Param::Vector(v) = p {
            if v.is_empty() {
                return Err(GroundRiskError::EmptyVector(name));
            }
            if let Some((first, _)) = found {
                return Err(GroundRiskError::MultipleVectors { first, second: name });
            }
            found = Some((name, v.len()));
        }
    }
    Ok(found.map_or(1, |(_, n)| n))
}
