//! Constraint system data model
//!
//! An [`R1cs`] bundles the wire layout, the deduplicated coefficient table,
//! the ordered constraint list with its solvable prefix, and deferred log
//! entries. It is immutable once built.

pub mod builder;
pub mod coefficients;
pub mod constraint;
pub mod error;
pub mod log;
pub mod system;
pub mod term;
pub mod wires;

pub use builder::{Combination, R1csBuilder, Wire, WireKind};
pub use coefficients::CoefficientTable;
pub use constraint::{R1c, SolverStrategy};
pub use error::R1csError;
pub use log::LogEntry;
pub use system::R1cs;
pub use term::{Coeff, LinearExpression, Term};
pub use wires::WireTable;
