//! Linear factors handed to the QP stage.

pub mod hessian;
pub mod inequality;
pub mod jacobian;

pub use hessian::{HessianCorrection, HessianFactor};
pub use inequality::{InequalityGraph, LinearInequality};
pub use jacobian::JacobianFactor;

/// Result of linearizing a nonlinear factor.
#[derive(Clone, Debug, PartialEq)]
pub enum LinearFactor {
    /// Coefficient rows and right-hand side: A·δ - b.
    Jacobian(JacobianFactor),
    /// Quadratic form ½δᵀGδ - gᵀδ + f.
    Hessian(HessianFactor),
}

impl LinearFactor {
    pub fn kind(&self) -> &'static str {
        match self {
            LinearFactor::Jacobian(_) => "Jacobian",
            LinearFactor::Hessian(_) => "Hessian",
        }
    }

    pub fn into_jacobian(self) -> Option<JacobianFactor> {
        match self {
            LinearFactor::Jacobian(j) => Some(j),
            LinearFactor::Hessian(_) => None,
        }
    }
}

impl From<JacobianFactor> for LinearFactor {
    fn from(j: JacobianFactor) -> Self {
        LinearFactor::Jacobian(j)
    }
}

impl From<HessianFactor> for LinearFactor {
    fn from(h: HessianFactor) -> Self {
        LinearFactor::Hessian(h)
    }
}
