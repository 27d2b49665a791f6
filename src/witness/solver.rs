//! The witness solver
//!
//! A single forward pass over the constraint list:
//!
//! 1. bind the named inputs,
//! 2. for every constraint in the solvable prefix, derive its unknown wire(s),
//! 3. for every constraint, evaluate `(a, b, c)` afresh and check `a * b = c`,
//!    stopping at the first violation,
//! 4. resolve the deferred log entries against the final wire vector.
//!
//! There is no backtracking. Correctness of step 2 rests on the producer's
//! guarantee that each prefix constraint has at most one unknown wire when
//! visited; a constraint that breaks it aborts the solve.

use std::collections::HashMap;

use p3_field::FieldAlgebra;
use tracing::debug;

use super::config::SolverConfig;
use super::error::{fault, InvariantViolation, SolveError, SolveResult};
use super::inputs::bind_inputs;
use super::logs::LogFlush;
use crate::field::{bit_of, SolverField};
use crate::r1cs::{R1c, R1cs, R1csError, SolverStrategy, Term};
use crate::types::ToField;

/// Side of a constraint holding the unknown wire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    L,
    R,
    O,
}

// ============================================================================
// Witness buffers
// ============================================================================

/// Caller-owned output buffers of a solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness<F> {
    /// `[internal | secret | public]`
    pub wire_values: Vec<F>,
    pub a: Vec<F>,
    pub b: Vec<F>,
    pub c: Vec<F>,
}

impl<F: SolverField> Witness<F> {
    /// Zeroed buffers sized for `r1cs`.
    pub fn allocate(r1cs: &R1cs<F>) -> Self {
        let n = r1cs.nb_constraints();
        Self {
            wire_values: vec![F::ZERO; r1cs.nb_wires()],
            a: vec![F::ZERO; n],
            b: vec![F::ZERO; n],
            c: vec![F::ZERO; n],
        }
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Solves a borrowed constraint system. Holds no per-solve state, so one
/// solver may serve concurrent solves with separate buffers.
#[derive(Clone, Copy, Debug)]
pub struct Solver<'a, F> {
    r1cs: &'a R1cs<F>,
    config: SolverConfig,
}

impl<'a, F: SolverField> Solver<'a, F> {
    /// Create a solver, validating the system first if the config asks for it.
    pub fn new(r1cs: &'a R1cs<F>, config: SolverConfig) -> Result<Self, R1csError> {
        if config.validate {
            r1cs.validate()?;
        }
        Ok(Self { r1cs, config })
    }

    /// Create a solver for a trusted system without validating it.
    pub fn unchecked(r1cs: &'a R1cs<F>, config: SolverConfig) -> Self {
        Self { r1cs, config }
    }

    pub fn r1cs(&self) -> &'a R1cs<F> {
        self.r1cs
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Compute every wire value and the per-constraint `a`, `b`, `c` vectors.
    ///
    /// `a`, `b` and `c` must hold one entry per constraint and `wire_values`
    /// one entry per wire; sizes are checked before anything is written.
    /// On failure the buffers hold whatever was computed up to that point.
    pub fn solve<V: ToField>(
        &self,
        assignment: &HashMap<String, V>,
        a: &mut [F],
        b: &mut [F],
        c: &mut [F],
        wire_values: &mut [F],
    ) -> SolveResult<()> {
        let r1cs = self.r1cs;
        let nb_constraints = r1cs.nb_constraints();
        let nb_wires = r1cs.nb_wires();

        if a.len() != nb_constraints
            || b.len() != nb_constraints
            || c.len() != nb_constraints
            || wire_values.len() != nb_wires
        {
            return Err(SolveError::SizeMismatch {
                nb_constraints,
                nb_wires,
                a: a.len(),
                b: b.len(),
                c: c.len(),
                wire_values: wire_values.len(),
            });
        }

        debug!(
            constraints = nb_constraints,
            computed = r1cs.nb_computed(),
            wires = nb_wires,
            "solving constraint system"
        );

        let mut instantiated = vec![false; nb_wires];
        bind_inputs(r1cs.wires(), assignment, wire_values, &mut instantiated)?;

        // Logs are flushed when `scope` drops, on every path out of the loop.
        let mut scope = LogFlush::new(r1cs, self.config.emit_logs, wire_values, instantiated);

        for (i, r1c) in r1cs.constraints().iter().enumerate() {
            if i < r1cs.nb_computed() {
                self.solve_r1c(i, r1c, scope.wire_values, &mut scope.instantiated);
            }

            // Recomputed for every constraint, solved ones included.
            let (ai, bi, ci) = r1cs.instantiate(r1c, scope.wire_values);
            a[i] = ai;
            b[i] = bi;
            c[i] = ci;

            if ai * bi != ci {
                debug!(index = i, "constraint not satisfied");
                return Err(SolveError::UnsatisfiedConstraint {
                    index: i,
                    a: ai.to_decimal(),
                    b: bi.to_decimal(),
                    c: ci.to_decimal(),
                });
            }
        }

        scope.complete();
        debug!("all constraints satisfied");
        Ok(())
    }

    /// Solve into freshly allocated buffers.
    pub fn solve_to_witness<V: ToField>(
        &self,
        assignment: &HashMap<String, V>,
    ) -> (Witness<F>, SolveResult<()>) {
        let mut witness = Witness::allocate(self.r1cs);
        let Witness {
            wire_values,
            a,
            b,
            c,
        } = &mut witness;
        let result = self.solve(assignment, a, b, c, wire_values);
        (witness, result)
    }

    // ========================================================================
    // Wire resolution
    // ========================================================================

    fn solve_r1c(&self, index: usize, r1c: &R1c, wire_values: &mut [F], instantiated: &mut [bool]) {
        match r1c.solver {
            SolverStrategy::SingleOutput => {
                self.solve_single_output(index, r1c, wire_values, instantiated)
            }
            SolverStrategy::BinaryDecomposition => {
                self.solve_binary_decomposition(index, r1c, wire_values, instantiated)
            }
        }
    }

    /// Isolate the one unknown wire of `L * R = O`.
    fn solve_single_output(
        &self,
        index: usize,
        r1c: &R1c,
        wire_values: &mut [F],
        instantiated: &mut [bool],
    ) {
        let r1cs = self.r1cs;
        let mut unknown: Option<(Side, Term)> = None;
        // Partial sums of the known terms of L, R and O
        let mut known = [F::ZERO; 3];

        for (slot, side, terms) in [(0, Side::L, &r1c.l), (1, Side::R, &r1c.r), (2, Side::O, &r1c.o)] {
            for term in terms {
                let wire = term.wire_index();
                if instantiated[wire] {
                    r1cs.add_term(&mut known[slot], term, wire_values[wire]);
                    continue;
                }
                if let Some((_, first)) = unknown {
                    fault(InvariantViolation::AmbiguousWire {
                        constraint: index,
                        first: first.wire_index(),
                        second: wire,
                    });
                }
                unknown = Some((side, *term));
            }
        }

        // Already set by an earlier multi-wire step
        let Some((side, term)) = unknown else {
            return;
        };

        let [a, b, c] = known;
        let scaled = match side {
            Side::L => c.div_or_zero(b) - a,
            Side::R => c.div_or_zero(a) - b,
            Side::O => a * b - c,
        };

        let wire = term.wire_index();
        wire_values[wire] = r1cs.unscale(term.coeff, scaled);
        instantiated[wire] = true;
    }

    /// Set each unset wire of L to the matching bit of the integer held by O.
    fn solve_binary_decomposition(
        &self,
        index: usize,
        r1c: &R1c,
        wire_values: &mut [F],
        instantiated: &mut [bool],
    ) {
        let source = r1c.o[0].wire_index();
        if !instantiated[source] {
            fault(InvariantViolation::UnsetDecompositionSource {
                constraint: index,
                wire: source,
            });
        }

        let limbs = wire_values[source].to_limbs();
        for (j, term) in r1c.l.iter().enumerate() {
            let wire = term.wire_index();
            if instantiated[wire] {
                continue;
            }
            wire_values[wire] = if bit_of(&limbs, j) { F::ONE } else { F::ZERO };
            instantiated[wire] = true;
        }
    }
}

// ============================================================================
// Convenience entry points
// ============================================================================

impl<F: SolverField> R1cs<F> {
    /// Solve with the default configuration, without a validation pass.
    ///
    /// See [`Solver::solve`].
    pub fn solve<V: ToField>(
        &self,
        assignment: &HashMap<String, V>,
        a: &mut [F],
        b: &mut [F],
        c: &mut [F],
        wire_values: &mut [F],
    ) -> SolveResult<()> {
        Solver::unchecked(self, SolverConfig::default()).solve(assignment, a, b, c, wire_values)
    }
}
