//! Field element contract used by the solver
//!
//! The solver is generic over any Plonky3 prime field. Everything beyond
//! plain ring arithmetic that the solver needs (zero-safe division, canonical
//! big-integer views, limb access for bit extraction, reduction of external
//! integers) lives in the [`SolverField`] extension trait, which is
//! implemented for every [`PrimeField`].

use num_bigint::BigUint;
use p3_field::{Field, FieldAlgebra, PrimeField};

/// Prime field operations required by the witness solver.
pub trait SolverField: PrimeField {
    /// Returns `self / rhs`, or zero when `rhs` is zero.
    ///
    /// Callers rely on this for the degenerate `0 * x = 0` rows produced
    /// upstream; the solver never signals a division error.
    fn div_or_zero(self, rhs: Self) -> Self {
        match rhs.try_inverse() {
            Some(inv) => self * inv,
            None => Self::ZERO,
        }
    }

    /// Canonical integer value in `[0, p)`.
    fn to_biguint(&self) -> BigUint {
        self.as_canonical_biguint()
    }

    /// Canonical value as a decimal string.
    fn to_decimal(&self) -> String {
        self.as_canonical_biguint().to_string()
    }

    /// Little-endian 64-bit limbs of the integer value. Zero has no limbs.
    fn to_limbs(&self) -> Vec<u64> {
        self.as_canonical_biguint().to_u64_digits()
    }

    /// Reduces an unsigned integer into the field.
    fn reduce_u64(value: u64) -> Self {
        Self::from_wrapped_u64(value)
    }

    /// Reduces a big-endian byte string into the field.
    fn reduce_be_bytes(bytes: &[u8]) -> Self {
        let radix = Self::from_canonical_u32(256);
        bytes
            .iter()
            .fold(Self::ZERO, |acc, &b| acc * radix + Self::from_canonical_u8(b))
    }

    /// Reduces an arbitrary-size integer into the field.
    fn reduce_biguint(value: &BigUint) -> Self {
        Self::reduce_be_bytes(&value.to_bytes_be())
    }

    /// The field modulus.
    fn field_order() -> BigUint {
        <Self as Field>::order()
    }
}

impl<F: PrimeField> SolverField for F {}

/// Bit `index` of the integer held in little-endian `limbs`, as returned by
/// [`SolverField::to_limbs`]. Bits past the top limb read as zero.
#[inline]
pub fn bit_of(limbs: &[u64], index: usize) -> bool {
    limbs
        .get(index / 64)
        .is_some_and(|limb| (limb >> (index % 64)) & 1 == 1)
}
