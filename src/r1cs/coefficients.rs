//! Deduplicated coefficient storage

use std::collections::HashMap;

use p3_field::FieldAlgebra;
use serde::{Deserialize, Serialize};

use super::term::Coeff;
use crate::field::SolverField;

/// Non fast-path coefficients, each stored once and referenced by id.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>"))]
pub struct CoefficientTable<F> {
    values: Vec<F>,
    #[serde(skip)]
    index: HashMap<F, u32>,
    /// Whether `index` covers `values`; false after deserialization
    #[serde(skip)]
    indexed: bool,
}

impl<F: SolverField> CoefficientTable<F> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            index: HashMap::new(),
            indexed: true,
        }
    }

    /// Classifies `value` into a coefficient selector, appending it to the
    /// table when it is not one of the inline constants and not already stored.
    pub fn intern(&mut self, value: F) -> Coeff {
        if value == F::ZERO {
            return Coeff::Zero;
        }
        if value == F::ONE {
            return Coeff::One;
        }
        if value == F::NEG_ONE {
            return Coeff::MinusOne;
        }
        if value == F::TWO {
            return Coeff::Double;
        }

        if !self.indexed {
            self.rebuild_index();
        }
        if let Some(&id) = self.index.get(&value) {
            return Coeff::Indexed(id);
        }
        let id = self.values.len() as u32;
        self.values.push(value);
        self.index.insert(value, id);
        Coeff::Indexed(id)
    }

    /// Field value of a selector. `None` for an out-of-range id.
    pub fn value_of(&self, coeff: Coeff) -> Option<F> {
        match coeff {
            Coeff::Zero => Some(F::ZERO),
            Coeff::One => Some(F::ONE),
            Coeff::MinusOne => Some(F::NEG_ONE),
            Coeff::Double => Some(F::TWO),
            Coeff::Indexed(id) => self.values.get(id as usize).copied(),
        }
    }

    #[inline]
    pub fn get(&self, id: u32) -> &F {
        &self.values[id as usize]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[F] {
        &self.values
    }

    // The lookup index is not serialized and is rebuilt on first use.
    // Duplicate stored values resolve to their first id.
    fn rebuild_index(&mut self) {
        self.index.clear();
        for (id, v) in self.values.iter().enumerate() {
            self.index.entry(*v).or_insert(id as u32);
        }
        self.indexed = true;
    }
}

impl<F: SolverField> Default for CoefficientTable<F> {
    fn default() -> Self {
        Self::new()
    }
}
