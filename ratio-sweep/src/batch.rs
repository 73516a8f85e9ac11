use crate::config::SweepConfig;
use crate::io;
use crate::io::output::SweepOutput;
use crate::solver::IlpSolver;
use crate::sweep::{RatioSweep, SweepError, SweepReport};
use anyhow::{Context, Result};
use itertools::Itertools;
use log::{error, info, warn};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use wavepick::entities::Instance;
use wavepick::io::{read_instance, write_selection};

/// How solving a single instance ended. Only ever describes one instance, never the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceOutcome {
    Solved { k: usize, ratio: f64, path: PathBuf },
    NoSolution,
    /// Deadline reached, the best selection found so far (if any) was still written
    TimedOut { best_written: Option<PathBuf> },
    ParseFailed(String),
    SolverFailed(String),
    OutputFailed(String),
}

impl InstanceOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            InstanceOutcome::Solved { .. } => "solved",
            InstanceOutcome::NoSolution => "no solution",
            InstanceOutcome::TimedOut { .. } => "timed out",
            InstanceOutcome::ParseFailed(_) => "parse failed",
            InstanceOutcome::SolverFailed(_) => "solver failed",
            InstanceOutcome::OutputFailed(_) => "output failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            InstanceOutcome::ParseFailed(_)
                | InstanceOutcome::SolverFailed(_)
                | InstanceOutcome::OutputFailed(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceReport {
    pub name: String,
    pub outcome: InstanceOutcome,
    pub elapsed: Duration,
}

/// All `*.txt` files directly inside `folder`, sorted by name
pub fn collect_instance_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(folder)
        .with_context(|| format!("could not read instance folder: {}", folder.display()))?;

    let mut files = entries
        .map_ok(|e| e.path())
        .filter_ok(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect::<Result<Vec<_>, _>>()?;
    files.sort();
    Ok(files)
}

/// Earliest of the instance and sweep limits, both measured from `start`
pub fn instance_deadline(start: Instant, config: &SweepConfig) -> Option<Instant> {
    [config.instance_time_limit(), config.sweep_time_limit()]
        .into_iter()
        .flatten()
        .filter_map(|limit| start.checked_add(limit))
        .min()
}

pub fn solve_instance<S: IlpSolver + ?Sized>(
    instance: &Instance,
    solver: &S,
    config: &SweepConfig,
    deadline: Option<Instant>,
) -> Result<SweepReport, SweepError> {
    RatioSweep::new(instance, solver)
        .with_deadline(deadline)
        .with_parallel(config.parallel_sweep)
        .solve()
}

/// Reads, solves and writes a single instance. Never fails: every fault ends up in the outcome.
pub fn solve_instance_file<S: IlpSolver + ?Sized>(
    path: &Path,
    solver: &S,
    config: &SweepConfig,
    solution_folder: &Path,
) -> InstanceReport {
    let start = Instant::now();
    let deadline = instance_deadline(start, config);
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let outcome = match read_instance(path) {
        Err(e) => {
            error!("[BATCH] {name}: {e:#}");
            InstanceOutcome::ParseFailed(format!("{e:#}"))
        }
        Ok(instance) => match solve_instance(&instance, solver, config, deadline) {
            Err(e) => {
                error!("[BATCH] {name}: {e}");
                InstanceOutcome::SolverFailed(e.to_string())
            }
            Ok(report) => write_outcome(&instance, &report, solver.name(), config, solution_folder),
        },
    };

    let elapsed = start.elapsed();
    info!(
        "[BATCH] {name}: {} in {:.3}s",
        outcome.label(),
        elapsed.as_secs_f64()
    );
    InstanceReport {
        name,
        outcome,
        elapsed,
    }
}

fn write_outcome(
    instance: &Instance,
    report: &SweepReport,
    solver_name: &str,
    config: &SweepConfig,
    solution_folder: &Path,
) -> InstanceOutcome {
    let Some(best) = &report.best else {
        return match report.deadline_hit {
            true => InstanceOutcome::TimedOut { best_written: None },
            false => InstanceOutcome::NoSolution,
        };
    };

    let path = solution_folder.join(format!("{}.txt", instance.name));
    let written = write_selection(&best.selection, &path).and_then(|_| match config.write_report {
        true => {
            let output = SweepOutput::new(&instance.name, solver_name, report, *config);
            io::write_json(&output, &solution_folder.join(format!("{}.json", instance.name)))
        }
        false => Ok(()),
    });

    match (written, report.deadline_hit) {
        (Err(e), _) => {
            error!("[BATCH] {}: {e:#}", instance.name);
            InstanceOutcome::OutputFailed(format!("{e:#}"))
        }
        (Ok(()), true) => {
            warn!(
                "[BATCH] {}: timed out, best selection so far written",
                instance.name
            );
            InstanceOutcome::TimedOut {
                best_written: Some(path),
            }
        }
        (Ok(()), false) => InstanceOutcome::Solved {
            k: best.k,
            ratio: best.ratio,
            path,
        },
    }
}

/// Solves every file on a dedicated pool. One instance failing never aborts the others.
pub fn run_batch<S: IlpSolver + ?Sized>(
    files: &[PathBuf],
    solver: &S,
    config: &SweepConfig,
    solution_folder: &Path,
) -> Result<Vec<InstanceReport>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.n_workers.unwrap_or(0))
        .thread_name(|i| format!("worker-{i}"))
        .build()?;

    info!(
        "[BATCH] solving {} instances on {} threads",
        files.len(),
        pool.current_num_threads()
    );

    let reports = pool.install(|| {
        files
            .par_iter()
            .map(|path| solve_instance_file(path, solver, config, solution_folder))
            .collect::<Vec<_>>()
    });

    BatchSummary::new(&reports, solver.abandoned_workers()).log();
    Ok(reports)
}

/// Totals over a finished batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Number of instances per [`InstanceOutcome::label`]
    pub counts: BTreeMap<&'static str, usize>,
    /// Name and ratio of the solved instance with the highest ratio
    pub best: Option<(String, f64)>,
    pub total_elapsed: Duration,
    /// Solver calls given up on whose work may still occupy a core
    pub abandoned_workers: usize,
}

impl BatchSummary {
    pub fn new(reports: &[InstanceReport], abandoned_workers: usize) -> Self {
        let counts = reports
            .iter()
            .counts_by(|r| r.outcome.label())
            .into_iter()
            .collect();
        let best = reports
            .iter()
            .filter_map(|r| match r.outcome {
                InstanceOutcome::Solved { ratio, .. } => Some((r.name.clone(), ratio)),
                _ => None,
            })
            .max_by_key(|(_, ratio)| OrderedFloat(*ratio));

        Self {
            counts,
            best,
            total_elapsed: reports.iter().map(|r| r.elapsed).sum(),
            abandoned_workers,
        }
    }

    pub fn log(&self) {
        for (label, count) in &self.counts {
            info!("[BATCH] {label}: {count}");
        }
        if let Some((name, ratio)) = &self.best {
            info!("[BATCH] highest ratio {ratio:.2} ({name})");
        }
        info!(
            "[BATCH] {} instances, {:.3}s summed over all instances",
            self.counts.values().sum::<usize>(),
            self.total_elapsed.as_secs_f64()
        );
        if self.abandoned_workers > 0 {
            warn!(
                "[BATCH] {} solver workers were abandoned at their deadline and may still be running",
                self.abandoned_workers
            );
        }
    }
}
