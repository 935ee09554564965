//! Nonlinear inequality constraints and the graph that owns them.

pub mod constraint;
pub mod graph;
pub mod kkt;
pub mod scalar;

pub use constraint::InequalityConstraint;
pub use graph::{ConstraintIndex, DynConstraint, NonlinearInequalityGraph};
pub use kkt::{KktOptions, KktReport, KktStatus};
pub use scalar::ScalarInequality;
