//! The constraint system aggregate

use std::collections::HashSet;
use std::path::Path;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::coefficients::CoefficientTable;
use super::constraint::{R1c, SolverStrategy};
use super::error::R1csError;
use super::log::LogEntry;
use super::term::{Coeff, Term};
use super::wires::WireTable;
use crate::field::SolverField;
use crate::types::ONE_WIRE;

/// A compiled rank-1 constraint system.
///
/// Built once (by [`R1csBuilder`](super::R1csBuilder) or loaded from disk) and
/// never mutated afterwards; any number of solves may borrow it concurrently.
///
/// The first [`nb_computed`](Self::nb_computed) constraints are ordered so that
/// each one, visited left to right, has at most one wire not yet known.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>"))]
pub struct R1cs<F> {
    wires: WireTable,
    coefficients: CoefficientTable<F>,
    constraints: Vec<R1c>,
    nb_computed: usize,
    logs: Vec<LogEntry>,
}

impl<F: SolverField> R1cs<F> {
    pub fn new(
        wires: WireTable,
        coefficients: CoefficientTable<F>,
        constraints: Vec<R1c>,
        nb_computed: usize,
        logs: Vec<LogEntry>,
    ) -> Self {
        Self {
            wires,
            coefficients,
            constraints,
            nb_computed,
            logs,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn nb_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn nb_wires(&self) -> usize {
        self.wires.nb_wires()
    }

    /// Number of distinct coefficients stored outside the fast path.
    pub fn nb_coefficients(&self) -> usize {
        self.coefficients.len()
    }

    /// Length of the solvable prefix of the constraint list.
    pub fn nb_computed(&self) -> usize {
        self.nb_computed
    }

    pub fn wires(&self) -> &WireTable {
        &self.wires
    }

    pub fn coefficients(&self) -> &CoefficientTable<F> {
        &self.coefficients
    }

    pub fn constraints(&self) -> &[R1c] {
        &self.constraints
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Modulus of the field the system is defined over.
    pub fn field_order(&self) -> BigUint {
        F::field_order()
    }

    // ========================================================================
    // Structural validation
    // ========================================================================

    /// Checks the structural invariants the solver relies on.
    ///
    /// This does not (and cannot cheaply) check the solvability ordering of
    /// the computed prefix; that remains the producer's guarantee.
    pub fn validate(&self) -> Result<(), R1csError> {
        let nb_wires = self.nb_wires();

        if self.nb_computed > self.constraints.len() {
            return Err(R1csError::ComputedPrefix {
                nb_computed: self.nb_computed,
                nb_constraints: self.constraints.len(),
            });
        }

        let ones = self
            .wires
            .public_names
            .iter()
            .filter(|name| name.as_str() == ONE_WIRE)
            .count();
        if ones != 1 || self.wires.secret_names.iter().any(|n| n == ONE_WIRE) {
            return Err(R1csError::OneWire(ones));
        }

        let mut seen = HashSet::new();
        for (_, name) in self.wires.inputs() {
            if !seen.insert(name) {
                return Err(R1csError::DuplicateInput(name.to_string()));
            }
        }

        for (i, r1c) in self.constraints.iter().enumerate() {
            for term in r1c.terms() {
                self.check_term(i, term, nb_wires)?;
            }
            if r1c.solver == SolverStrategy::BinaryDecomposition && r1c.o.len() != 1 {
                return Err(R1csError::DecompositionOutput {
                    constraint: i,
                    found: r1c.o.len(),
                });
            }
        }

        for (entry, log) in self.logs.iter().enumerate() {
            let placeholders = log.placeholder_count();
            if placeholders != log.to_resolve.len() {
                return Err(R1csError::LogArity {
                    entry,
                    placeholders,
                    wires: log.to_resolve.len(),
                });
            }
            if let Some(&wire) = log.to_resolve.iter().find(|&&w| w >= nb_wires) {
                return Err(R1csError::LogWire { entry, wire });
            }
        }

        for (&wire, tags) in &self.wires.tags {
            if wire >= nb_wires {
                return Err(R1csError::TagWire {
                    tag: tags.first().cloned().unwrap_or_default(),
                    wire,
                });
            }
        }

        debug!(
            constraints = self.constraints.len(),
            wires = nb_wires,
            "constraint system validated"
        );
        Ok(())
    }

    fn check_term(&self, constraint: usize, term: &Term, nb_wires: usize) -> Result<(), R1csError> {
        if term.wire_index() >= nb_wires {
            return Err(R1csError::WireOutOfRange {
                constraint,
                wire: term.wire_index(),
                nb_wires,
            });
        }
        if let (Coeff::Indexed(id), None) = (term.coeff, self.coefficients.value_of(term.coeff)) {
            return Err(R1csError::CoefficientOutOfRange {
                constraint,
                id,
                len: self.coefficients.len(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Load a constraint system from a bincode file and validate it.
    pub fn load(path: &Path) -> Result<Self, R1csError> {
        let data = std::fs::read(path)?;
        let r1cs: Self = bincode::deserialize(&data)?;
        r1cs.validate()?;
        Ok(r1cs)
    }

    /// Save the constraint system to a bincode file.
    pub fn save(&self, path: &Path) -> Result<(), R1csError> {
        let data = bincode::serialize(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load a constraint system from a JSON file and validate it.
    pub fn load_json(path: &Path) -> Result<Self, R1csError> {
        let data = std::fs::read(path)?;
        let r1cs: Self = serde_json::from_slice(&data)?;
        r1cs.validate()?;
        Ok(r1cs)
    }

    /// Save the constraint system as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<(), R1csError> {
        let data = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load by extension: `.json` files as JSON, anything else as bincode.
    pub fn read(path: &Path) -> Result<Self, R1csError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::load_json(path),
            _ => Self::load(path),
        }
    }

    /// Size of the bincode encoding in bytes
    pub fn size_bytes(&self) -> usize {
        bincode::serialized_size(self).unwrap_or(0) as usize
    }
}
