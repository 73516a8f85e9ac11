mod good_lp_solver;
mod program;

#[doc(inline)]
pub use good_lp_solver::GoodLpSolver;
#[doc(inline)]
pub use program::{BinaryProgram, ConstraintId, LinearConstraint, Relation, Sense, VarId};

use std::time::Instant;
use thiserror::Error;

/// Result of a single, non-faulty solver call.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Proven optimum: value of every variable (indexed by [`VarId`]) and the objective it attains
    Optimal {
        assignment: Vec<bool>,
        objective_value: f64,
    },
    Infeasible,
    /// Deadline reached before optimality was proven
    TimeLimit,
}

/// The solver itself failed, as opposed to reporting the model infeasible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("solver backend failed: {0}")]
    Backend(String),
    #[error("model is unbounded")]
    Unbounded,
    #[error("solver panicked: {0}")]
    Panicked(String),
    #[error("solver worker disconnected without a result")]
    Disconnected,
}

/// Anything capable of optimizing a [`BinaryProgram`].
pub trait IlpSolver: Send + Sync {
    /// Solves `program` to optimality, giving up with [`SolveOutcome::TimeLimit`] once `deadline` has passed.
    fn solve(
        &self,
        program: &BinaryProgram,
        deadline: Option<Instant>,
    ) -> Result<SolveOutcome, SolverError>;

    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Calls given up on at their deadline whose work may still be running in the background
    fn abandoned_workers(&self) -> usize {
        0
    }
}
