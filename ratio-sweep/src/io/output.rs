use crate::config::SweepConfig;
use crate::sweep::{BestSelection, RatioRecord, SkipReason, SweepReport};
use serde::{Deserialize, Serialize};

/// JSON report of the sweep over a single instance
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SweepOutput {
    pub instance: String,
    pub solver: String,
    pub best: Option<BestSelection>,
    pub records: Vec<RatioRecord>,
    pub skipped: Vec<(usize, SkipReason)>,
    pub elapsed_s: f64,
    pub deadline_hit: bool,
    pub config: SweepConfig,
}

impl SweepOutput {
    pub fn new(instance: &str, solver: &str, report: &SweepReport, config: SweepConfig) -> Self {
        Self {
            instance: instance.to_string(),
            solver: solver.to_string(),
            best: report.best.clone(),
            records: report.records.clone(),
            skipped: report.skipped.clone(),
            elapsed_s: report.elapsed.as_secs_f64(),
            deadline_hit: report.deadline_hit,
            config,
        }
    }
}
