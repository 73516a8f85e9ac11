use crate::config::SolverBackend;
use crate::solver::{BinaryProgram, IlpSolver, Relation, Sense, SolveOutcome, SolverError, VarId};
use good_lp::{
    Constraint, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
    variable,
};
use log::{debug, warn};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// [`IlpSolver`] backed by the `good_lp` modelling layer.
///
/// Every call is solved on a dedicated worker thread and the caller only waits until the deadline.
/// A backend which cannot be interrupted is abandoned and the call reported as [`SolveOutcome::TimeLimit`].
/// Panics inside the backend are caught and surface as [`SolverError::Panicked`].
///
/// `coin_cbc` receives the remaining time as its own limit and stops by itself, `microlp` keeps
/// running until it finishes. Abandoned workers are counted, see [`IlpSolver::abandoned_workers`].
#[derive(Debug, Clone)]
pub struct GoodLpSolver {
    pub backend: SolverBackend,
    /// Limit applied to every individual call, on top of any deadline passed by the caller
    pub call_time_limit: Option<Duration>,
    abandoned: Arc<AtomicUsize>,
}

impl GoodLpSolver {
    pub fn new(backend: SolverBackend, call_time_limit: Option<Duration>) -> Self {
        Self {
            backend,
            call_time_limit,
            abandoned: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl IlpSolver for GoodLpSolver {
    fn solve(
        &self,
        program: &BinaryProgram,
        deadline: Option<Instant>,
    ) -> Result<SolveOutcome, SolverError> {
        let now = Instant::now();
        let deadline = [deadline, self.call_time_limit.and_then(|l| now.checked_add(l))]
            .into_iter()
            .flatten()
            .min();
        if deadline.is_some_and(|d| d <= now) {
            return Ok(SolveOutcome::TimeLimit);
        }

        let job = program.clone();
        let backend = self.backend;
        let time_limit = deadline.map(|d| d.saturating_duration_since(now));
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("ilp-worker".into())
            .spawn(move || {
                let result =
                    catch_unwind(AssertUnwindSafe(|| solve_program(backend, &job, time_limit)));
                let _ = tx.send(result);
            })
            .map_err(|e| SolverError::Backend(format!("could not spawn solver thread: {e}")))?;

        let received = match deadline {
            Some(d) => rx.recv_timeout(d.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => Err(SolverError::Panicked(panic_message(panic.as_ref()))),
            Err(RecvTimeoutError::Timeout) => {
                let n_abandoned = self.abandoned.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(
                    "[SOLVER] deadline reached, abandoning {} worker ({n_abandoned} so far)",
                    self.name()
                );
                Ok(SolveOutcome::TimeLimit)
            }
            Err(RecvTimeoutError::Disconnected) => Err(SolverError::Disconnected),
        }
    }

    fn name(&self) -> &str {
        match self.backend {
            SolverBackend::Microlp => "microlp",
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => "coin_cbc",
        }
    }

    fn abandoned_workers(&self) -> usize {
        self.abandoned.load(Ordering::Relaxed)
    }
}

fn solve_program(
    backend: SolverBackend,
    program: &BinaryProgram,
    time_limit: Option<Duration>,
) -> Result<SolveOutcome, SolverError> {
    let mut vars = ProblemVariables::new();
    let xs: Vec<Variable> = program
        .var_names()
        .iter()
        .map(|name| vars.add(variable().binary().name(name.as_str())))
        .collect();

    let constraints = program
        .constraints()
        .iter()
        .map(|c| {
            let lhs = linear_expression(&c.terms, &xs);
            match c.relation {
                Relation::Le => lhs.leq(c.rhs),
                Relation::Ge => lhs.geq(c.rhs),
                Relation::Eq => lhs.eq(c.rhs),
            }
        })
        .collect::<Vec<Constraint>>();

    let objective = linear_expression(program.objective(), &xs);
    let unsolved = match program.sense() {
        Sense::Maximize => vars.maximise(objective),
        Sense::Minimize => vars.minimise(objective),
    };

    match backend {
        SolverBackend::Microlp => {
            // microlp has no notion of a time limit, the caller enforces the deadline
            let _ = time_limit;
            run_model(
                unsolved.using(good_lp::solvers::microlp::microlp),
                constraints,
                &xs,
                program,
            )
        }
        #[cfg(feature = "coin_cbc")]
        SolverBackend::CoinCbc => {
            let mut model = unsolved.using(good_lp::solvers::coin_cbc::coin_cbc);
            model.set_parameter("log", "0");
            if let Some(limit) = time_limit {
                model.set_parameter("sec", &limit.as_secs().max(1).to_string());
            }
            run_model(model, constraints, &xs, program)
        }
    }
}

fn run_model<M>(
    mut model: M,
    constraints: Vec<Constraint>,
    xs: &[Variable],
    program: &BinaryProgram,
) -> Result<SolveOutcome, SolverError>
where
    M: SolverModel<Error = ResolutionError>,
{
    for constraint in constraints {
        model.add_constraint(constraint);
    }

    match model.solve() {
        Ok(solution) => {
            let assignment = xs
                .iter()
                .map(|&x| solution.value(x) > 0.5)
                .collect::<Vec<bool>>();
            let objective_value = program.evaluate(&assignment);
            debug!(
                "[SOLVER] optimum {:.1} with {} of {} variables set",
                objective_value,
                assignment.iter().filter(|&&v| v).count(),
                assignment.len()
            );
            Ok(SolveOutcome::Optimal {
                assignment,
                objective_value,
            })
        }
        Err(ResolutionError::Infeasible) => Ok(SolveOutcome::Infeasible),
        Err(ResolutionError::Unbounded) => Err(SolverError::Unbounded),
        Err(e) => Err(SolverError::Backend(e.to_string())),
    }
}

fn linear_expression(terms: &[(VarId, f64)], xs: &[Variable]) -> Expression {
    let mut expr = Expression::with_capacity(terms.len());
    for &(var, coef) in terms {
        expr.add_mul(coef, xs[var]);
    }
    expr
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
