//! Rank-1 constraints

use serde::{Deserialize, Serialize};

use super::term::{LinearExpression, Term};

/// How the solver derives the unknown wire(s) of a computational constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStrategy {
    /// Exactly one wire across L, R and O is unknown; isolate it algebraically
    SingleOutput,
    /// O holds an integer whose bits are the wires listed in L, least significant first
    BinaryDecomposition,
}

/// One constraint `L * R = O`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct R1c {
    pub l: LinearExpression,
    pub r: LinearExpression,
    pub o: LinearExpression,
    pub solver: SolverStrategy,
}

impl R1c {
    pub fn new(
        l: LinearExpression,
        r: LinearExpression,
        o: LinearExpression,
        solver: SolverStrategy,
    ) -> Self {
        Self { l, r, o, solver }
    }

    /// Every term of the constraint, L then R then O.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.l.iter().chain(self.r.iter()).chain(self.o.iter())
    }
}
