use crate::formulation::WaveFormulation;
use crate::solver::{IlpSolver, SolveOutcome, SolverError};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use thousands::Separable;
use wavepick::checker;
use wavepick::entities::{IncidenceIndex, Instance, Selection};

/// Optimum found for a single aisle budget `k`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioRecord {
    pub k: usize,
    pub total_units: u64,
    /// `total_units / k`
    pub ratio: f64,
}

/// Why an aisle budget did not produce an optimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    Infeasible,
    TimeLimit,
}

/// Selection with the best ratio encountered during the sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSelection {
    pub k: usize,
    pub total_units: u64,
    pub ratio: f64,
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    /// `None` if no aisle budget yielded an optimum
    pub best: Option<BestSelection>,
    /// One record per aisle budget which yielded an optimum, ascending in `k`
    pub records: Vec<RatioRecord>,
    /// Aisle budgets without an optimum, ascending in `k`
    pub skipped: Vec<(usize, SkipReason)>,
    pub elapsed: Duration,
    /// The deadline passed before every aisle budget was solved
    pub deadline_hit: bool,
}

/// A solver fault aborts the whole sweep of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    #[error("solver failed at aisle budget k = {k}: {source}")]
    Solver {
        k: usize,
        #[source]
        source: SolverError,
    },
}

/// Approximates the best productivity ratio by sweeping the aisle budget `k` over `1..=|aisles|`.
///
/// For every `k` the most units that can be picked while visiting at most `k` aisles is computed
/// by the solver. The sweep keeps the selection with the highest `units / k`; on an exact tie the
/// lowest `k` wins. No budget is skipped early, as the ratio is not monotone in `k`.
pub struct RatioSweep<'a, S: IlpSolver + ?Sized> {
    pub instance: &'a Instance,
    pub index: IncidenceIndex,
    pub solver: &'a S,
    pub deadline: Option<Instant>,
    pub parallel: bool,
}

impl<'a, S: IlpSolver + ?Sized> RatioSweep<'a, S> {
    pub fn new(instance: &'a Instance, solver: &'a S) -> Self {
        let index = IncidenceIndex::new(instance);
        Self {
            instance,
            index,
            solver,
            deadline: None,
            parallel: false,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn solve(&self) -> Result<SweepReport, SweepError> {
        let start = Instant::now();
        let n_aisles = self.instance.n_aisles();
        let formulation = WaveFormulation::new(self.instance, &self.index, 1);

        info!(
            "[SWEEP] {}: sweeping k = 1..={} with {} ({} orders, {} constraints, {} non-zeros)",
            self.instance.name,
            n_aisles,
            self.solver.name(),
            self.instance.n_orders().separate_with_commas(),
            formulation.program.constraints().len().separate_with_commas(),
            formulation.program.n_nonzeros().separate_with_commas()
        );

        let mut tracker = BestTracker::new(start);
        match self.parallel {
            false => {
                let mut formulation = formulation;
                for k in 1..=n_aisles {
                    formulation.set_aisle_budget(k);
                    let outcome = self.solve_budget(&formulation, k)?;
                    tracker.register(k, outcome, &formulation, &self.instance.name);
                }
            }
            true => {
                let outcomes = (1..=n_aisles)
                    .into_par_iter()
                    .map(|k| {
                        let mut formulation = formulation.clone();
                        formulation.set_aisle_budget(k);
                        (k, self.solve_budget(&formulation, k))
                    })
                    .collect::<Vec<_>>();
                // reduce in ascending k, so ties resolve exactly as in the sequential sweep
                for (k, outcome) in outcomes {
                    tracker.register(k, outcome?, &formulation, &self.instance.name);
                }
            }
        }

        let deadline_hit = self.deadline.is_some_and(|d| Instant::now() >= d)
            && tracker.skipped.iter().any(|(_, r)| *r == SkipReason::TimeLimit);
        let report = SweepReport {
            best: tracker.best,
            records: tracker.records,
            skipped: tracker.skipped,
            elapsed: start.elapsed(),
            deadline_hit,
        };
        self.log_report(&report);
        Ok(report)
    }

    fn solve_budget(
        &self,
        formulation: &WaveFormulation,
        k: usize,
    ) -> Result<SolveOutcome, SweepError> {
        debug_assert_eq!(formulation.aisle_budget(), k);
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Ok(SolveOutcome::TimeLimit);
        }
        self.solver
            .solve(&formulation.program, self.deadline)
            .map_err(|source| SweepError::Solver { k, source })
    }

    fn log_report(&self, report: &SweepReport) {
        if report.deadline_hit {
            warn!(
                "[SWEEP] {}: deadline reached, {} of {} aisle budgets solved",
                self.instance.name,
                report.records.len(),
                self.instance.n_aisles()
            );
        }
        match &report.best {
            Some(best) => {
                let validated = checker::evaluate(self.instance, &best.selection);
                if !validated.feasible {
                    warn!(
                        "[SWEEP] {}: best selection rejected by checker: {:?}",
                        self.instance.name, validated.violation
                    );
                }
                info!(
                    "[SWEEP] {}: finished in {:.3}s | best ratio {:.2} at k={} | {} orders, {} aisles, {} units",
                    self.instance.name,
                    report.elapsed.as_secs_f64(),
                    best.ratio,
                    best.k,
                    best.selection.n_orders(),
                    best.selection.n_aisles(),
                    best.total_units
                );
            }
            None => warn!(
                "[SWEEP] {}: no feasible selection found for any aisle budget",
                self.instance.name
            ),
        }
    }
}

/// Keeps the best ratio seen so far. Only ever written by the sweep driver.
struct BestTracker {
    start: Instant,
    best: Option<BestSelection>,
    records: Vec<RatioRecord>,
    skipped: Vec<(usize, SkipReason)>,
}

impl BestTracker {
    fn new(start: Instant) -> Self {
        Self {
            start,
            best: None,
            records: vec![],
            skipped: vec![],
        }
    }

    fn best_ratio(&self) -> f64 {
        self.best.as_ref().map_or(0.0, |b| b.ratio)
    }

    fn register(
        &mut self,
        k: usize,
        outcome: SolveOutcome,
        formulation: &WaveFormulation,
        name: &str,
    ) {
        let elapsed = self.start.elapsed().as_secs_f64();
        match outcome {
            SolveOutcome::Optimal {
                assignment,
                objective_value,
            } => {
                let ratio = objective_value / k as f64;
                let total_units = objective_value.round() as u64;
                self.records.push(RatioRecord {
                    k,
                    total_units,
                    ratio,
                });
                info!(
                    "[SWEEP] {name} | k={k} | units={total_units} | ratio={ratio:.2} | {elapsed:.2}s"
                );
                if ratio > self.best_ratio() {
                    let selection = formulation.selection(&assignment);
                    info!(
                        "[SWEEP] {name} | new best ratio {ratio:.2} at k={k} | {} orders, {} aisles",
                        selection.n_orders(),
                        selection.n_aisles()
                    );
                    self.best = Some(BestSelection {
                        k,
                        total_units,
                        ratio,
                        selection,
                    });
                }
            }
            SolveOutcome::Infeasible => {
                debug!("[SWEEP] {name} | k={k} | infeasible | {elapsed:.2}s");
                self.skipped.push((k, SkipReason::Infeasible));
            }
            SolveOutcome::TimeLimit => {
                debug!("[SWEEP] {name} | k={k} | time limit | {elapsed:.2}s");
                self.skipped.push((k, SkipReason::TimeLimit));
            }
        }
    }
}
