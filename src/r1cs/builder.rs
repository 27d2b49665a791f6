//! Assembly of a constraint system from symbolic wires
//!
//! The builder only lays the system out: it maps symbolic wires onto the
//! `[internal | secret | public]` index ranges, interns coefficients, and
//! places computational constraints ahead of check-only ones. It does not
//! reorder constraints; callers add computational constraints in an order
//! where each has at most one unknown wire when reached.

use p3_field::FieldAlgebra;

use super::coefficients::CoefficientTable;
use super::constraint::{R1c, SolverStrategy};
use super::log::LogEntry;
use super::system::R1cs;
use super::term::{Coeff, LinearExpression, Term};
use super::wires::WireTable;
use crate::field::SolverField;
use crate::types::ONE_WIRE;

/// Which range of the witness vector a symbolic wire lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireKind {
    Internal,
    Secret,
    Public,
}

/// A wire handle, resolved to a witness index when the system is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wire {
    kind: WireKind,
    id: u32,
}

impl Wire {
    pub fn kind(&self) -> WireKind {
        self.kind
    }
}

/// A weighted sum of symbolic wires.
pub type Combination<F> = Vec<(Wire, F)>;

type SymbolicExpression = Vec<(Wire, Coeff)>;

struct SymbolicR1c {
    l: SymbolicExpression,
    r: SymbolicExpression,
    o: SymbolicExpression,
    solver: SolverStrategy,
}

/// Builder for [`R1cs`].
pub struct R1csBuilder<F> {
    coefficients: CoefficientTable<F>,
    nb_internal: u32,
    secret_names: Vec<String>,
    public_names: Vec<String>,
    computed: Vec<SymbolicR1c>,
    checks: Vec<SymbolicR1c>,
    tags: Vec<(Wire, String)>,
    logs: Vec<(String, Vec<Wire>)>,
}

impl<F: SolverField> R1csBuilder<F> {
    /// Create a builder whose first public wire is the constant-one wire.
    pub fn new() -> Self {
        Self {
            coefficients: CoefficientTable::new(),
            nb_internal: 0,
            secret_names: Vec::new(),
            public_names: vec![ONE_WIRE.to_string()],
            computed: Vec::new(),
            checks: Vec::new(),
            tags: Vec::new(),
            logs: Vec::new(),
        }
    }

    // ========================================================================
    // Wires
    // ========================================================================

    /// The constant-one wire.
    pub fn one(&self) -> Wire {
        Wire {
            kind: WireKind::Public,
            id: 0,
        }
    }

    pub fn secret_input(&mut self, name: impl Into<String>) -> Wire {
        self.secret_names.push(name.into());
        Wire {
            kind: WireKind::Secret,
            id: self.secret_names.len() as u32 - 1,
        }
    }

    pub fn public_input(&mut self, name: impl Into<String>) -> Wire {
        self.public_names.push(name.into());
        Wire {
            kind: WireKind::Public,
            id: self.public_names.len() as u32 - 1,
        }
    }

    /// Allocate an internal wire whose value a computational constraint derives.
    pub fn internal(&mut self) -> Wire {
        self.nb_internal += 1;
        Wire {
            kind: WireKind::Internal,
            id: self.nb_internal - 1,
        }
    }

    // ========================================================================
    // Constraints
    // ========================================================================

    /// Append a computational constraint solved by isolating its single unknown wire.
    pub fn computed(&mut self, l: Combination<F>, r: Combination<F>, o: Combination<F>) {
        let r1c = self.symbolic(l, r, o, SolverStrategy::SingleOutput);
        self.computed.push(r1c);
    }

    /// Append `Σ 2^i · bits[i] = value`, solved by decomposing `value` into `bits`
    /// (least significant first).
    pub fn decompose(&mut self, value: Wire, bits: &[Wire]) {
        let one = self.one();
        let mut weight = F::ONE;
        let mut l = Vec::with_capacity(bits.len());
        for &bit in bits {
            l.push((bit, self.coefficients.intern(weight)));
            weight = weight.double();
        }
        self.computed.push(SymbolicR1c {
            l,
            r: vec![(one, Coeff::One)],
            o: vec![(value, Coeff::One)],
            solver: SolverStrategy::BinaryDecomposition,
        });
    }

    /// Append a check-only constraint, placed after every computational one.
    pub fn assert_r1c(&mut self, l: Combination<F>, r: Combination<F>, o: Combination<F>) {
        let r1c = self.symbolic(l, r, o, SolverStrategy::SingleOutput);
        self.checks.push(r1c);
    }

    // ========================================================================
    // Debug information
    // ========================================================================

    /// Attach a debug label to a wire; tagged wires show up in inspection results.
    pub fn tag(&mut self, wire: Wire, label: impl Into<String>) {
        self.tags.push((wire, label.into()));
    }

    /// Record a message to print once solving ends, `{}` standing for each wire.
    pub fn log(&mut self, format: impl Into<String>, wires: &[Wire]) {
        self.logs.push((format.into(), wires.to_vec()));
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    pub fn build(self) -> R1cs<F> {
        let nb_internal = self.nb_internal as usize;
        let secret_offset = nb_internal;
        let public_offset = nb_internal + self.secret_names.len();
        let index = |wire: Wire| -> usize {
            match wire.kind {
                WireKind::Internal => wire.id as usize,
                WireKind::Secret => secret_offset + wire.id as usize,
                WireKind::Public => public_offset + wire.id as usize,
            }
        };
        let lower = |expr: SymbolicExpression| -> LinearExpression {
            expr.into_iter()
                .map(|(wire, coeff)| Term::new(index(wire), coeff))
                .collect()
        };

        let nb_computed = self.computed.len();
        let constraints = self
            .computed
            .into_iter()
            .chain(self.checks)
            .map(|c| R1c::new(lower(c.l), lower(c.r), lower(c.o), c.solver))
            .collect();

        let mut wires = WireTable {
            nb_internal,
            secret_names: self.secret_names,
            public_names: self.public_names,
            tags: Default::default(),
        };
        for (wire, label) in self.tags {
            wires.tags.entry(index(wire)).or_default().push(label);
        }

        let logs = self
            .logs
            .into_iter()
            .map(|(format, ws)| LogEntry::new(format, ws.into_iter().map(&index).collect()))
            .collect();

        R1cs::new(wires, self.coefficients, constraints, nb_computed, logs)
    }

    fn symbolic(
        &mut self,
        l: Combination<F>,
        r: Combination<F>,
        o: Combination<F>,
        solver: SolverStrategy,
    ) -> SymbolicR1c {
        let mut intern = |expr: Combination<F>| -> SymbolicExpression {
            expr.into_iter()
                .map(|(wire, value)| (wire, self.coefficients.intern(value)))
                .collect()
        };
        SymbolicR1c {
            l: intern(l),
            r: intern(r),
            o: intern(o),
            solver,
        }
    }
}

impl<F: SolverField> Default for R1csBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p3_baby_bear::BabyBear;

    type F = BabyBear;

    #[test]
    fn test_layout() {
        let mut b = R1csBuilder::<F>::new();
        let x = b.secret_input("x");
        let y = b.public_input("y");
        let t = b.internal();
        let one = b.one();
        b.computed(vec![(x, F::ONE)], vec![(x, F::ONE)], vec![(t, F::ONE)]);
        b.assert_r1c(vec![(t, F::ONE)], vec![(one, F::ONE)], vec![(y, F::ONE)]);
        b.tag(t, "x_squared");
        b.log("t = {}", &[t]);
        let r1cs = b.build();

        // [t | x | ONE, y]
        assert_eq!(r1cs.nb_wires(), 4);
        assert_eq!(r1cs.wires().secret_offset(), 1);
        assert_eq!(r1cs.wires().public_offset(), 2);
        assert_eq!(r1cs.nb_computed(), 1);
        assert_eq!(r1cs.constraints()[0].l, vec![Term::wire(1)]);
        assert_eq!(r1cs.constraints()[0].o, vec![Term::wire(0)]);
        assert_eq!(r1cs.constraints()[1].r, vec![Term::wire(2)]);
        assert_eq!(r1cs.constraints()[1].o, vec![Term::wire(3)]);
        assert_eq!(r1cs.wires().tags[&0], vec!["x_squared".to_string()]);
        assert_eq!(r1cs.logs()[0].to_resolve, vec![0]);
        r1cs.validate().unwrap();
    }

    #[test]
    fn test_checks_follow_computed() {
        let mut b = R1csBuilder::<F>::new();
        let x = b.secret_input("x");
        let t = b.internal();
        b.assert_r1c(vec![(x, F::ONE)], vec![(x, F::ONE)], vec![(t, F::ONE)]);
        b.computed(vec![(x, F::ONE)], vec![(x, F::TWO)], vec![(t, F::ONE)]);
        let r1cs = b.build();
        assert_eq!(r1cs.nb_computed(), 1);
        assert_eq!(r1cs.constraints()[0].r[0].coeff, Coeff::Double);
        assert_eq!(r1cs.constraints()[1].r[0].coeff, Coeff::One);
    }

    #[test]
    fn test_decompose_weights() {
        let mut b = R1csBuilder::<F>::new();
        let n = b.secret_input("n");
        let bits: Vec<_> = (0..4).map(|_| b.internal()).collect();
        b.decompose(n, &bits);
        let r1cs = b.build();

        let r1c = &r1cs.constraints()[0];
        assert_eq!(r1c.solver, SolverStrategy::BinaryDecomposition);
        let coeffs: Vec<_> = r1c.l.iter().map(|t| t.coeff).collect();
        assert_eq!(
            coeffs,
            vec![Coeff::One, Coeff::Double, Coeff::Indexed(0), Coeff::Indexed(1)]
        );
        assert_eq!(*r1cs.coefficients().get(1), F::from_canonical_u32(8));
    }
}
