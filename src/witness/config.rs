//! Solver configuration

/// Solver configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Emit resolved log entries to the `r1cs_solver::logs` tracing target.
    /// Entries are resolved (and checked) either way.
    pub emit_logs: bool,
    /// Run structural validation once when the solver is created
    pub validate: bool,
}

impl SolverConfig {
    /// Default configuration: validate once, emit logs
    pub const DEFAULT: Self = Self {
        emit_logs: true,
        validate: true,
    };

    /// Validate, but keep log entries to ourselves
    pub fn quiet() -> Self {
        Self {
            emit_logs: false,
            ..Self::DEFAULT
        }
    }

    /// Skip structural validation (the system is trusted, e.g. freshly built)
    pub fn unchecked() -> Self {
        Self {
            validate: false,
            ..Self::DEFAULT
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
