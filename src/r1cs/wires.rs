//! Wire table: layout of the witness vector
//!
//! Wires are laid out contiguously as
//!
//! ```text
//! [ internal / computed | secret inputs | public inputs ]
//! ```
//!
//! The public range always contains the reserved [`ONE_WIRE`](crate::types::ONE_WIRE).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Partition of the wire indices plus input names and debug tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTable {
    /// Number of internal (computed) wires
    pub nb_internal: usize,
    /// Secret input names; entry `i` names wire `secret_offset() + i`
    pub secret_names: Vec<String>,
    /// Public input names; entry `i` names wire `public_offset() + i`
    pub public_names: Vec<String>,
    /// Debug labels attached to wires, by wire index
    pub tags: BTreeMap<usize, Vec<String>>,
}

impl WireTable {
    pub fn nb_wires(&self) -> usize {
        self.nb_internal + self.secret_names.len() + self.public_names.len()
    }

    pub fn nb_secret(&self) -> usize {
        self.secret_names.len()
    }

    /// Number of public wires, constant-one wire included.
    pub fn nb_public(&self) -> usize {
        self.public_names.len()
    }

    /// Index of the first secret input wire.
    pub fn secret_offset(&self) -> usize {
        self.nb_wires() - self.nb_public() - self.nb_secret()
    }

    /// Index of the first public input wire.
    pub fn public_offset(&self) -> usize {
        self.nb_wires() - self.nb_public()
    }

    /// Secret then public inputs, each with its wire index.
    pub fn inputs(&self) -> impl Iterator<Item = (usize, &str)> {
        let secret = self.secret_offset();
        let public = self.public_offset();
        self.secret_names
            .iter()
            .enumerate()
            .map(move |(i, name)| (secret + i, name.as_str()))
            .chain(
                self.public_names
                    .iter()
                    .enumerate()
                    .map(move |(i, name)| (public + i, name.as_str())),
            )
    }
}
