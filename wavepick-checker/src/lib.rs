//! Validates solution files of wave picking instances, one pair at a time or per folder.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{error, info, warn};
use wavepick::checker::{self, ObjectiveError, Verdict};
use wavepick::io::{read_instance, read_selection};

pub mod cli;

/// Verdict of a single instance/solution pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairReport {
    pub instance: String,
    pub verdict: Verdict,
}

impl PairReport {
    /// Feasible and with a defined objective
    pub fn passed(&self) -> bool {
        self.verdict.feasible && self.verdict.objective.is_ok()
    }

    pub fn describe(&self) -> String {
        match (&self.verdict.violation, &self.verdict.objective) {
            (Some(violation), _) => format!("infeasible: {violation}"),
            (None, Ok(objective)) => format!("feasible, objective {objective:.2}"),
            (None, Err(ObjectiveError::NoAislesVisited)) => {
                "feasible, but no aisles visited: objective undefined".to_string()
            }
            (None, Err(e)) => format!("feasible, objective not computable: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PairResult {
    Checked(PairReport),
    /// No solution file with the instance's name
    Missing { instance: PathBuf },
    /// Either file could not be read or parsed, or the solution refers to unknown orders or aisles
    Error { instance: PathBuf, message: String },
}

impl PairResult {
    /// Missing solutions are skipped, not failed
    pub fn is_failure(&self) -> bool {
        match self {
            PairResult::Checked(report) => !report.passed(),
            PairResult::Missing { .. } => false,
            PairResult::Error { .. } => true,
        }
    }
}

pub fn check_pair(instance_path: &Path, solution_path: &Path) -> Result<PairReport> {
    let instance = read_instance(instance_path)?;
    let selection = read_selection(solution_path)?;
    selection
        .validate(&instance)
        .with_context(|| format!("invalid solution file: {}", solution_path.display()))?;
    let verdict = checker::evaluate(&instance, &selection);

    let report = PairReport {
        instance: instance.name.clone(),
        verdict,
    };
    match report.passed() {
        true => info!("[CHECK] {}: {}", report.instance, report.describe()),
        false => warn!("[CHECK] {}: {}", report.instance, report.describe()),
    }
    Ok(report)
}

/// Pairs every `*.txt` instance in `instance_dir` with the equally named file in `solution_dir`.
pub fn check_folders(instance_dir: &Path, solution_dir: &Path) -> Result<Vec<PairResult>> {
    let entries = fs::read_dir(instance_dir)
        .with_context(|| format!("could not read instance folder: {}", instance_dir.display()))?;
    let instance_files = entries
        .map_ok(|e| e.path())
        .filter_ok(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    let results = instance_files
        .into_iter()
        .map(|instance| {
            let solution = instance.file_name().map(|name| solution_dir.join(name));
            let Some(solution) = solution.filter(|s| s.is_file()) else {
                warn!(
                    "[CHECK] no solution found for {}, skipping",
                    instance.display()
                );
                return PairResult::Missing { instance };
            };
            match check_pair(&instance, &solution) {
                Ok(report) => PairResult::Checked(report),
                Err(e) => {
                    error!("[CHECK] {}: {e:#}", instance.display());
                    PairResult::Error {
                        instance,
                        message: format!("{e:#}"),
                    }
                }
            }
        })
        .collect_vec();

    let n_passed = results
        .iter()
        .filter(|r| matches!(r, PairResult::Checked(p) if p.passed()))
        .count();
    info!(
        "[CHECK] {} pairs: {} passed, {} failed, {} missing",
        results.len(),
        n_passed,
        results.iter().filter(|r| r.is_failure()).count(),
        results
            .iter()
            .filter(|r| matches!(r, PairResult::Missing { .. }))
            .count()
    );
    Ok(results)
}
