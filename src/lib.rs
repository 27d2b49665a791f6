//! R1CS witness solver
//!
//! Computes a full satisfying assignment (the witness) of a rank-1 constraint
//! system from a partial assignment of named inputs.
//!
//! # Architecture
//!
//! - [`r1cs`]: the compiled constraint system. Wire layout, interned
//!   coefficients, constraints, debug tags and deferred log entries, plus a
//!   builder and persistence.
//! - [`witness`]: the solver. One forward pass that binds inputs, resolves the
//!   unknown wire of each computational constraint, and checks every
//!   constraint.
//! - [`field`]: the field contract the solver is generic over. Any Plonky3
//!   prime field qualifies.
//! - [`types`]: input values and their conversion into field elements.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use p3_baby_bear::BabyBear;
//! use p3_field::FieldAlgebra;
//! use r1cs_solver::{R1csBuilder, Solver, SolverConfig};
//!
//! // x * x = y
//! let mut builder = R1csBuilder::<BabyBear>::new();
//! let x = builder.secret_input("x");
//! let y = builder.internal();
//! builder.computed(vec![(x, BabyBear::ONE)], vec![(x, BabyBear::ONE)], vec![(y, BabyBear::ONE)]);
//! builder.tag(y, "y");
//! let r1cs = builder.build();
//!
//! let solver = Solver::new(&r1cs, SolverConfig::quiet()).unwrap();
//! let assignment: HashMap<String, u64> = [("x".to_string(), 3)].into();
//! let (witness, result) = solver.solve_to_witness(&assignment);
//! assert!(result.is_ok());
//! assert_eq!(witness.c, vec![BabyBear::from_canonical_u32(9)]);
//! ```

pub mod field;
pub mod r1cs;
pub mod types;
pub mod witness;

pub use field::SolverField;

pub use r1cs::{
    Coeff, CoefficientTable, LinearExpression, LogEntry, R1c, R1cs, R1csBuilder, R1csError,
    SolverStrategy, Term, Wire, WireKind, WireTable,
};

pub use types::{Assignment, ConversionError, InputValue, ToField, ONE_WIRE};

pub use witness::{
    resolve_logs, InspectError, Inspection, InvariantViolation, SolveError, SolveResult, Solver,
    SolverConfig, Witness, UNSOLVED,
};

use p3_baby_bear::BabyBear;

/// Default field for the command line tool and the tests (BabyBear: p = 15 * 2^27 + 1)
pub type F = BabyBear;
