//! Solver errors and invariant violations

use thiserror::Error;
use tracing::error;

use crate::types::ConversionError;

/// Result type for solving
pub type SolveResult<T> = Result<T, SolveError>;

/// Recoverable solving failures, caused by the caller's inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error(
        "invalid input size: len(a, b, c) must be {nb_constraints} and len(wire_values) must be \
         {nb_wires}, got a={a}, b={b}, c={c}, wire_values={wire_values}"
    )]
    SizeMismatch {
        nb_constraints: usize,
        nb_wires: usize,
        a: usize,
        b: usize,
        c: usize,
        wire_values: usize,
    },

    #[error("{0:?}: input not set")]
    InputNotSet(String),

    #[error("{name:?}: cannot convert input: {source}")]
    InvalidInput {
        name: String,
        #[source]
        source: ConversionError,
    },

    #[error("constraint #{index} is not satisfied: {a:?} * {b:?} != {c:?}")]
    UnsatisfiedConstraint {
        index: usize,
        a: String,
        b: String,
        c: String,
    },
}

/// Inspection failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    /// A tag collides with an input name or another tag. The outcome of the
    /// underlying solve is kept alongside.
    #[error("duplicate tag: {tag}{}", solve_note(.solve_error))]
    DuplicateTag {
        tag: String,
        solve_error: Option<SolveError>,
    },
}

fn solve_note(solve_error: &Option<SolveError>) -> String {
    match solve_error {
        Some(err) => format!(" (solve also failed: {err})"),
        None => String::new(),
    }
}

/// A broken producer guarantee. These are never returned to callers: they
/// mean the constraint system itself is inconsistent, and solving aborts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error(
        "constraint #{constraint}: found more than one wire to instantiate (wires {first} and {second})"
    )]
    AmbiguousWire {
        constraint: usize,
        first: usize,
        second: usize,
    },

    #[error("constraint #{constraint}: binary decomposition of wire {wire}, which has no value yet")]
    UnsetDecompositionSource { constraint: usize, wire: usize },

    #[error(
        "log entry #{entry}: wire {wire} was never instantiated, a computational constraint \
         produced no value"
    )]
    UninstantiatedLogWire { entry: usize, wire: usize },
}

/// Abort on a violated invariant.
#[cold]
#[track_caller]
pub(crate) fn fault(violation: InvariantViolation) -> ! {
    error!(%violation, "constraint system invariant violated");
    panic!("{violation}");
}
