//! Witness solving
//!
//! Given a [`R1cs`](crate::r1cs::R1cs) and a name-to-value assignment, the
//! [`Solver`] derives every internal wire, computes the per-constraint
//! `a`, `b`, `c` vectors and checks `a * b = c` for each constraint.
//!
//! ## Failure modes
//!
//! - [`SolveError`]: the caller's buffers or inputs are wrong, or the inputs
//!   do not satisfy the system. Returned; partial results stay in the buffers.
//! - [`InvariantViolation`]: the system breaks a guarantee its producer makes
//!   (a prefix constraint with two unknown wires, for instance). The solve
//!   aborts with a panic.

pub mod config;
pub mod error;
mod eval;
mod inputs;
pub mod inspect;
pub mod logs;
pub mod solver;

pub use config::SolverConfig;
pub use error::{InspectError, InvariantViolation, SolveError, SolveResult};
pub use inspect::Inspection;
pub use logs::{resolve_logs, UNSOLVED};
pub use solver::{Solver, Witness};
