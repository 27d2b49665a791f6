//! Binding of named inputs onto the witness vector

use std::collections::HashMap;

use p3_field::FieldAlgebra;
use tracing::debug;

use super::error::{SolveError, SolveResult};
use crate::field::SolverField;
use crate::r1cs::WireTable;
use crate::types::{ToField, ONE_WIRE};

/// Write every secret, then every public, input into `wire_values`.
///
/// The constant-one wire is set unconditionally. Binding stops at the first
/// input that is missing or cannot be converted; only input wires are written.
pub(crate) fn bind_inputs<F, V>(
    wires: &WireTable,
    assignment: &HashMap<String, V>,
    wire_values: &mut [F],
    instantiated: &mut [bool],
) -> SolveResult<()>
where
    F: SolverField,
    V: ToField,
{
    for (index, name) in wires.inputs() {
        wire_values[index] = if name == ONE_WIRE {
            F::ONE
        } else {
            let value = assignment
                .get(name)
                .ok_or_else(|| SolveError::InputNotSet(name.to_string()))?;
            value
                .to_field()
                .map_err(|source| SolveError::InvalidInput {
                    name: name.to_string(),
                    source,
                })?
        };
        instantiated[index] = true;
    }

    debug!(
        secret = wires.nb_secret(),
        public = wires.nb_public(),
        "inputs bound"
    );
    Ok(())
}
