//! sqpineq: the nonlinear inequality constraint layer of an SQP solver
//!
//! - `InequalityConstraint`: one scalar constraint g(x) ≤ 0 with its dual key
//! - `ScalarInequality`: a closure-based implementation of it
//! - `NonlinearInequalityGraph`: an ordered set of constraints, with
//!   - `linearize`: linear inequalities for the QP subproblem
//!   - `check_feasibility_and_complementarity`: the KKT termination test
//!   - `multiplied_hessians`: the -Σ λ_i ∇²g_i(x) Lagrangian correction
//!   - `total_violation`: Σ |g_i(x)| as a merit value
//!
//! Dual assignments are sparse: a constraint whose dual key has an entry in
//! the `VectorValues` is active, every other constraint is inactive.

pub mod error;
pub mod keys;
pub mod linear;
pub mod nonlinear;
mod numerics;
pub mod trace;
pub mod values;

pub use error::{ConstraintError, Result};
pub use keys::Key;
pub use linear::{
    HessianCorrection, HessianFactor, InequalityGraph, JacobianFactor, LinearFactor,
    LinearInequality,
};
pub use nonlinear::{
    ConstraintIndex, InequalityConstraint, KktOptions, KktReport, KktStatus,
    NonlinearInequalityGraph, ScalarInequality,
};
pub use trace::ConstraintTraceRecord;
pub use values::{Values, VectorValues};
