//! Terms and linear expressions

use serde::{Deserialize, Serialize};

/// Coefficient selector of a [`Term`].
///
/// The small constants that dominate real circuits are encoded inline so
/// evaluation can avoid a general field multiplication. Everything else
/// points into the coefficient table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coeff {
    Zero,
    One,
    MinusOne,
    Double,
    /// Index into [`CoefficientTable`](super::CoefficientTable)
    Indexed(u32),
}

/// A scaled reference to one wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Index into the wire vector
    pub wire: usize,
    /// Multiplier applied to the wire value
    pub coeff: Coeff,
}

impl Term {
    pub fn new(wire: usize, coeff: Coeff) -> Self {
        Self { wire, coeff }
    }

    /// Term with coefficient one.
    pub fn wire(wire: usize) -> Self {
        Self::new(wire, Coeff::One)
    }

    #[inline]
    pub fn wire_index(&self) -> usize {
        self.wire
    }
}

/// One side (L, R or O) of a rank-1 constraint, in insertion order.
pub type LinearExpression = Vec<Term>;
