//! Linear expression evaluation

use p3_field::FieldAlgebra;

use crate::field::SolverField;
use crate::r1cs::{Coeff, R1c, R1cs, Term};

impl<F: SolverField> R1cs<F> {
    /// `acc += coeff(term) * value`.
    ///
    /// Inline coefficients skip the general multiplication.
    #[inline]
    pub fn add_term(&self, acc: &mut F, term: &Term, value: F) {
        match term.coeff {
            Coeff::Zero => {}
            Coeff::One => *acc += value,
            Coeff::MinusOne => *acc -= value,
            Coeff::Double => *acc += value.double(),
            Coeff::Indexed(id) => *acc += *self.coefficients().get(id) * value,
        }
    }

    /// Sum of `coeff * wire` over `terms`, reading wire values from `wire_values`.
    pub fn evaluate(&self, terms: &[Term], wire_values: &[F]) -> F {
        terms.iter().fold(F::ZERO, |mut acc, term| {
            self.add_term(&mut acc, term, wire_values[term.wire_index()]);
            acc
        })
    }

    /// Evaluate the three sides of a constraint.
    pub fn instantiate(&self, r1c: &R1c, wire_values: &[F]) -> (F, F, F) {
        (
            self.evaluate(&r1c.l, wire_values),
            self.evaluate(&r1c.r, wire_values),
            self.evaluate(&r1c.o, wire_values),
        )
    }

    /// `value / coeff`, the inverse of the scaling `add_term` applies.
    ///
    /// A zero coefficient yields zero, as does any zero division.
    pub(crate) fn unscale(&self, coeff: Coeff, value: F) -> F {
        match coeff {
            Coeff::Zero => F::ZERO,
            Coeff::One => value,
            Coeff::MinusOne => -value,
            Coeff::Double => value.div_or_zero(F::TWO),
            Coeff::Indexed(id) => value.div_or_zero(*self.coefficients().get(id)),
        }
    }
}
