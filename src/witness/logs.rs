//! Deferred log resolution
//!
//! Log entries are resolved once the wire vector reaches its final state.
//! [`LogFlush`] owns the solver's view of the wire vector for the duration of
//! the constraint walk and resolves the entries when dropped, so they are
//! emitted whether the walk completes or stops at a violated constraint.
//! After an early stop, wires past the failing constraint render as
//! [`UNSOLVED`] instead of aborting.

use tracing::info;

use super::error::{fault, InvariantViolation};
use crate::field::SolverField;
use crate::r1cs::R1cs;

/// Placeholder for wires left unsolved by a solve that stopped early.
pub const UNSOLVED: &str = "<unsolved>";

/// Resolve every log entry of `r1cs` against the current wire values.
///
/// Aborts if an entry references a wire that was never instantiated.
pub fn resolve_logs<F: SolverField>(
    r1cs: &R1cs<F>,
    wire_values: &[F],
    instantiated: &[bool],
) -> Vec<String> {
    render_logs(r1cs, wire_values, instantiated, true)
}

fn render_logs<F: SolverField>(
    r1cs: &R1cs<F>,
    wire_values: &[F],
    instantiated: &[bool],
    strict: bool,
) -> Vec<String> {
    r1cs.logs()
        .iter()
        .enumerate()
        .map(|(entry, log)| {
            let resolved: Vec<String> = log
                .to_resolve
                .iter()
                .map(|&wire| {
                    if instantiated[wire] {
                        wire_values[wire].to_decimal()
                    } else if strict {
                        fault(InvariantViolation::UninstantiatedLogWire { entry, wire })
                    } else {
                        UNSOLVED.to_string()
                    }
                })
                .collect();
            log.render(&resolved)
        })
        .collect()
}

/// Scope guard holding the wire vector while constraints are walked.
pub(crate) struct LogFlush<'s, F: SolverField> {
    r1cs: &'s R1cs<F>,
    emit: bool,
    completed: bool,
    pub(crate) wire_values: &'s mut [F],
    pub(crate) instantiated: Vec<bool>,
}

impl<'s, F: SolverField> LogFlush<'s, F> {
    pub(crate) fn new(
        r1cs: &'s R1cs<F>,
        emit: bool,
        wire_values: &'s mut [F],
        instantiated: Vec<bool>,
    ) -> Self {
        Self {
            r1cs,
            emit,
            completed: false,
            wire_values,
            instantiated,
        }
    }

    /// Mark the walk as finished; every referenced wire must now be set.
    pub(crate) fn complete(&mut self) {
        self.completed = true;
    }
}

impl<F: SolverField> Drop for LogFlush<'_, F> {
    fn drop(&mut self) {
        // Already unwinding from a fault: the wire vector is not trustworthy.
        if std::thread::panicking() {
            return;
        }
        let lines = render_logs(
            self.r1cs,
            self.wire_values,
            &self.instantiated,
            self.completed,
        );
        if self.emit {
            for line in lines {
                info!(target: "r1cs_solver::logs", "{}", line);
            }
        }
    }
}
