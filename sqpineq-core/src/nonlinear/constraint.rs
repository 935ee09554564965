use crate::error::Result;
use crate::keys::Key;
use crate::linear::{HessianFactor, LinearFactor};
use crate::values::{Values, VectorValues};

/// One scalar nonlinear inequality g(x) ≤ 0 bound to a single dual variable.
///
/// The dual key is fixed at construction and never shared with another
/// constraint of the same graph.
pub trait InequalityConstraint {
    /// Variables the constraint depends on.
    fn keys(&self) -> &[Key];

    /// Key of the Lagrange multiplier of this constraint.
    fn dual_key(&self) -> Key;

    /// g(x) at `values`. Feasible when ≤ tol.
    fn violation(&self, values: &Values) -> Result<f64>;

    /// First-order approximation of g around `values`.
    ///
    /// Must be a one-row [`LinearFactor::Jacobian`] with A = ∇g(x)ᵀ and
    /// b = -g(x). Anything else is rejected by the graph.
    fn linearize(&self, values: &Values) -> Result<LinearFactor>;

    /// Curvature term -λ·∇²g(x), with λ read from `duals` at
    /// [`dual_key`](Self::dual_key). `None` when the constraint is inactive.
    fn hessian_contribution(
        &self,
        values: &Values,
        duals: &VectorValues,
    ) -> Result<Option<HessianFactor>>;
}
