use tracing::{debug, warn};

use crate::error::Result;
use crate::keys::Key;
use crate::trace::{ConstraintTraceRecord, ConstraintTracer, TraceRow};
use crate::values::{Values, VectorValues};

use super::graph::{ConstraintIndex, NonlinearInequalityGraph};

/// Options for the KKT feasibility / complementarity check.
#[derive(Clone, Debug)]
pub struct KktOptions {
    /// Violations ≤ tol count as feasible; active constraints need |g| ≤ tol.
    pub tol: f64,
    /// Keep a per-constraint trace in the report.
    pub collect_trace: bool,
}

impl KktOptions {
    pub fn new(tol: f64) -> Self {
        Self {
            tol,
            collect_trace: false,
        }
    }
}

impl Default for KktOptions {
    fn default() -> Self {
        Self::new(1e-6)
    }
}

/// Verdict of a KKT check, naming the first constraint that failed.
///
/// Equality compares violations bit for bit, so two `NonFinite` verdicts
/// carrying the same NaN are equal.
#[derive(Clone, Copy, Debug)]
pub enum KktStatus {
    Satisfied,
    /// g(x) > tol.
    Infeasible {
        index: ConstraintIndex,
        dual_key: Key,
        violation: f64,
    },
    /// The constraint has a dual entry but |g(x)| > tol.
    NotBinding {
        index: ConstraintIndex,
        dual_key: Key,
        violation: f64,
    },
    /// g(x) is NaN or infinite.
    NonFinite {
        index: ConstraintIndex,
        dual_key: Key,
        violation: f64,
    },
}

impl KktStatus {
    fn parts(&self) -> Option<(u8, ConstraintIndex, Key, u64)> {
        match *self {
            KktStatus::Satisfied => None,
            KktStatus::Infeasible {
                index,
                dual_key,
                violation,
            } => Some((0, index, dual_key, violation.to_bits())),
            KktStatus::NotBinding {
                index,
                dual_key,
                violation,
            } => Some((1, index, dual_key, violation.to_bits())),
            KktStatus::NonFinite {
                index,
                dual_key,
                violation,
            } => Some((2, index, dual_key, violation.to_bits())),
        }
    }
}

impl PartialEq for KktStatus {
    fn eq(&self, other: &Self) -> bool {
        self.parts() == other.parts()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KktReport {
    pub status: KktStatus,
    /// Constraints evaluated before the check stopped.
    pub checked: usize,
    pub trace: Option<Vec<ConstraintTraceRecord>>,
}

impl KktReport {
    pub fn is_satisfied(&self) -> bool {
        matches!(self.status, KktStatus::Satisfied)
    }
}

impl NonlinearInequalityGraph {
    /// True if every constraint is feasible (g ≤ tol) and every constraint
    /// with an entry in `duals` is binding (|g| ≤ tol).
    ///
    /// Constraints missing from `duals` are inactive and only need to be
    /// feasible. A non-finite violation never passes.
    pub fn check_feasibility_and_complementarity(
        &self,
        values: &Values,
        duals: &VectorValues,
        tol: f64,
    ) -> Result<bool> {
        let report = self.kkt_report(values, duals, &KktOptions::new(tol))?;
        Ok(report.is_satisfied())
    }

    /// Same check as [`check_feasibility_and_complementarity`], reporting
    /// which constraint failed and why.
    ///
    /// [`check_feasibility_and_complementarity`]: Self::check_feasibility_and_complementarity
    pub fn kkt_report(
        &self,
        values: &Values,
        duals: &VectorValues,
        options: &KktOptions,
    ) -> Result<KktReport> {
        let tol = options.tol;
        let tracer = if options.collect_trace {
            ConstraintTracer::with_history("kkt")
        } else {
            ConstraintTracer::new("kkt")
        };

        let mut checked = 0;
        let mut status = KktStatus::Satisfied;

        for (i, constraint) in self.iter().enumerate() {
            let index = ConstraintIndex(i);
            let dual_key = constraint.dual_key();
            let violation = constraint.violation(values)?;
            let active = duals.exists(dual_key);
            checked += 1;

            let row = TraceRow::constraint(i, dual_key)
                .violation(violation)
                .active(active);

            if !violation.is_finite() {
                warn!(%dual_key, violation, "non-finite constraint violation");
                tracer.emit(row.note("non_finite"));
                status = KktStatus::NonFinite {
                    index,
                    dual_key,
                    violation,
                };
                break;
            }

            // primal feasibility: g(x) <= tol
            if violation > tol {
                tracer.emit(row.note("infeasible"));
                status = KktStatus::Infeasible {
                    index,
                    dual_key,
                    violation,
                };
                break;
            }

            // complementary slackness: active constraints must be binding
            if active && violation.abs() > tol {
                tracer.emit(row.note("not_binding"));
                status = KktStatus::NotBinding {
                    index,
                    dual_key,
                    violation,
                };
                break;
            }

            tracer.emit(row);
        }

        match status {
            KktStatus::Satisfied => debug!(checked, tol, "KKT conditions satisfied"),
            failed => debug!(?failed, tol, "KKT conditions not satisfied"),
        }

        Ok(KktReport {
            status,
            checked,
            trace: tracer.into_history(),
        })
    }
}
