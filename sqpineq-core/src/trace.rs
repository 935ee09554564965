use std::cell::RefCell;
use std::fmt::{self, Write};

use crate::keys::Key;

/// One per-constraint event of a graph pass (KKT check, linearization,
/// Hessian aggregation or merit evaluation).
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintTraceRecord {
    pub pass: &'static str,
    pub index: usize,
    pub dual_key: Key,
    pub violation: Option<f64>,
    pub multiplier: Option<f64>,
    pub active: Option<bool>,
    pub note: Option<&'static str>,
}

impl ConstraintTraceRecord {
    fn format_line(&self) -> String {
        let mut line = format!("[{}] #{:>4} | dual {}", self.pass, self.index, self.dual_key);
        if let Some(v) = self.violation {
            let _ = write!(line, " | g {:>13.6e}", v);
        }
        if let Some(v) = self.multiplier {
            let _ = write!(line, " | lambda {:>13.6e}", v);
        }
        if let Some(active) = self.active {
            let _ = write!(line, " | {}", if active { "active" } else { "inactive" });
        }
        if let Some(note) = self.note {
            let _ = write!(line, " | note {note}");
        }
        line
    }
}

impl fmt::Display for ConstraintTraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_line())
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TraceRow {
    index: usize,
    dual_key: Key,
    violation: Option<f64>,
    multiplier: Option<f64>,
    active: Option<bool>,
    note: Option<&'static str>,
}

impl TraceRow {
    pub(crate) fn constraint(index: usize, dual_key: Key) -> Self {
        Self {
            index,
            dual_key,
            violation: None,
            multiplier: None,
            active: None,
            note: None,
        }
    }

    pub(crate) fn violation(mut self, violation: f64) -> Self {
        self.violation = Some(violation);
        self
    }

    pub(crate) fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    pub(crate) fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub(crate) fn note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }
}

/// Emits per-constraint rows as `tracing` events and optionally keeps them.
#[derive(Clone, Debug)]
pub(crate) struct ConstraintTracer {
    pass: &'static str,
    history: Option<RefCell<Vec<ConstraintTraceRecord>>>,
}

impl ConstraintTracer {
    pub(crate) fn new(pass: &'static str) -> Self {
        Self {
            pass,
            history: None,
        }
    }

    pub(crate) fn with_history(pass: &'static str) -> Self {
        Self {
            pass,
            history: Some(RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn emit(&self, row: TraceRow) {
        let record = ConstraintTraceRecord {
            pass: self.pass,
            index: row.index,
            dual_key: row.dual_key,
            violation: row.violation,
            multiplier: row.multiplier,
            active: row.active,
            note: row.note,
        };

        tracing::trace!(
            pass = record.pass,
            index = record.index,
            dual_key = %record.dual_key,
            violation = ?record.violation,
            multiplier = ?record.multiplier,
            "{}",
            record
        );

        if let Some(history) = &self.history {
            history.borrow_mut().push(record);
        }
    }

    pub(crate) fn into_history(self) -> Option<Vec<ConstraintTraceRecord>> {
        self.history.map(RefCell::into_inner)
    }
}
