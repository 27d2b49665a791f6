//! Structural errors of a constraint system

use thiserror::Error;

/// A malformed constraint system, or a failure to load or store one.
#[derive(Debug, Error)]
pub enum R1csError {
    #[error("constraint #{constraint} references wire {wire}, but the system has {nb_wires} wires")]
    WireOutOfRange {
        constraint: usize,
        wire: usize,
        nb_wires: usize,
    },

    #[error("constraint #{constraint} references coefficient {id}, but the table holds {len}")]
    CoefficientOutOfRange { constraint: usize, id: u32, len: usize },

    #[error("the constant-one wire must appear exactly once among public inputs, found {0}")]
    OneWire(usize),

    #[error("solvable prefix of {nb_computed} exceeds the {nb_constraints} constraints")]
    ComputedPrefix {
        nb_computed: usize,
        nb_constraints: usize,
    },

    #[error("binary decomposition #{constraint} must have exactly one output term, found {found}")]
    DecompositionOutput { constraint: usize, found: usize },

    #[error("log entry #{entry} has {placeholders} placeholders for {wires} wires")]
    LogArity {
        entry: usize,
        placeholders: usize,
        wires: usize,
    },

    #[error("log entry #{entry} references wire {wire} out of range")]
    LogWire { entry: usize, wire: usize },

    #[error("tag {tag:?} is attached to wire {wire} out of range")]
    TagWire { tag: String, wire: usize },

    #[error("duplicate input name {0:?}")]
    DuplicateInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("binary codec error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),
}
