//! The planner's own error taxonomy.
//!
//! These variants are constructed at the point something goes wrong and are
//! then generally wrapped in an `anyhow::Error` with `.with_context(...)` at
//! call boundaries, rather than propagated as a typed error through the
//! whole call stack.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// A configuration value was missing, malformed, or out of range.
    ConfigInvalid(String),
    /// The yard or command input described a state that cannot occur
    /// (duplicate container ids, gaps in a column's levels, unknown
    /// container ids referenced by a command row, and so on).
    DataInconsistent(String),
    /// No legal relocation destination exists for a blocker that must be
    /// moved before its target can be retrieved.
    NoFeasibleRelocation(String),
    /// The scheduler's wall-clock budget expired before a complete plan
    /// was found.
    Timeout(String),
    /// Reading or writing one of the planner's CSV files failed.
    Io(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::ConfigInvalid(msg) => write!(f, "invalid configuration: {msg}"),
            PlannerError::DataInconsistent(msg) => write!(f, "inconsistent yard/command data: {msg}"),
            PlannerError::NoFeasibleRelocation(msg) => write!(f, "no feasible relocation: {msg}"),
            PlannerError::Timeout(msg) => write!(f, "scheduler timed out: {msg}"),
            PlannerError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for PlannerError {}
