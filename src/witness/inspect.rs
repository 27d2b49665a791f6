//! Named view of a solved witness

use std::collections::{BTreeMap, HashMap};

use num_bigint::BigUint;
use tracing::debug;

use super::config::SolverConfig;
use super::error::{InspectError, SolveError};
use super::solver::{Solver, Witness};
use crate::field::SolverField;
use crate::r1cs::R1cs;
use crate::types::{ToField, ONE_WIRE};

/// Result of [`Solver::inspect`]: the named values and the outcome of the
/// underlying solve.
///
/// A failed solve still yields every name that could be read, with wires the
/// solver never reached reading as zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inspection {
    values: BTreeMap<String, BigUint>,
    solve_error: Option<SolveError>,
}

impl Inspection {
    pub fn values(&self) -> &BTreeMap<String, BigUint> {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&BigUint> {
        self.values.get(name)
    }

    /// Error of the underlying solve, if it failed
    pub fn solve_error(&self) -> Option<&SolveError> {
        self.solve_error.as_ref()
    }

    pub fn into_parts(self) -> (BTreeMap<String, BigUint>, Option<SolveError>) {
        (self.values, self.solve_error)
    }
}

impl<F: SolverField> Solver<'_, F> {
    /// Solve into scratch buffers and map names to canonical integer values.
    ///
    /// With `show_inputs`, every secret and public input except the constant
    /// one wire is listed by name. Tags are added afterwards; a tag that
    /// collides with a name already present fails the whole inspection,
    /// carrying the solve error if there was one.
    pub fn inspect<V: ToField>(
        &self,
        assignment: &HashMap<String, V>,
        show_inputs: bool,
    ) -> Result<Inspection, InspectError> {
        let (witness, result) = self.solve_to_witness(assignment);
        if let Err(err) = &result {
            debug!(%err, "inspecting a partially solved witness");
        }
        let values = match named_values(self.r1cs(), &witness, show_inputs) {
            Ok(values) => values,
            Err(tag) => {
                return Err(InspectError::DuplicateTag {
                    tag,
                    solve_error: result.err(),
                })
            }
        };
        Ok(Inspection {
            values,
            solve_error: result.err(),
        })
    }
}

/// Name to value map, or the first colliding tag.
fn named_values<F: SolverField>(
    r1cs: &R1cs<F>,
    witness: &Witness<F>,
    show_inputs: bool,
) -> Result<BTreeMap<String, BigUint>, String> {
    let wires = r1cs.wires();
    let mut values = BTreeMap::new();

    if show_inputs {
        for (index, name) in wires.inputs().filter(|(_, name)| *name != ONE_WIRE) {
            values.insert(name.to_string(), witness.wire_values[index].to_biguint());
        }
    }

    for (&wire, tags) in &wires.tags {
        for tag in tags {
            if values.contains_key(tag) {
                return Err(tag.clone());
            }
            values.insert(tag.clone(), witness.wire_values[wire].to_biguint());
        }
    }

    Ok(values)
}

impl<F: SolverField> R1cs<F> {
    /// Inspect with the default configuration, without a validation pass.
    ///
    /// See [`Solver::inspect`].
    pub fn inspect<V: ToField>(
        &self,
        assignment: &HashMap<String, V>,
        show_inputs: bool,
    ) -> Result<Inspection, InspectError> {
        Solver::unchecked(self, SolverConfig::default()).inspect(assignment, show_inputs)
    }
}
