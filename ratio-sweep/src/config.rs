use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the ratio sweep optimizer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    /// Backend used to solve every aisle-budget subproblem
    pub solver: SolverBackend,
    /// Budget for the entire sweep of a single instance in seconds. Once exceeded, the remaining budgets are skipped
    pub sweep_time_limit_s: Option<f64>,
    /// Time limit for every individual solver call in seconds
    pub solver_time_limit_s: Option<f64>,
    /// Wall-clock limit per instance in seconds when solving in batch
    pub instance_time_limit_s: Option<f64>,
    /// Solve the aisle budgets concurrently instead of one after the other
    pub parallel_sweep: bool,
    /// Number of instances solved concurrently in batch mode. If undefined, one per available core
    pub n_workers: Option<usize>,
    /// Write a JSON report next to every solution file
    pub write_report: bool,
}

/// Available backends of the `good_lp` solver adapter
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Pure Rust branch and bound
    #[default]
    Microlp,
    /// COIN-OR CBC through its native library
    #[cfg(feature = "coin_cbc")]
    CoinCbc,
}

impl SweepConfig {
    /// Rejects time limits which are negative, NaN or too large to represent as a [`Duration`]
    pub fn validate(&self) -> Result<()> {
        for (name, limit) in [
            ("sweep_time_limit_s", self.sweep_time_limit_s),
            ("solver_time_limit_s", self.solver_time_limit_s),
            ("instance_time_limit_s", self.instance_time_limit_s),
        ] {
            if let Some(secs) = limit {
                Duration::try_from_secs_f64(secs)
                    .with_context(|| format!("{name} is not a valid time limit: {secs}"))?;
            }
        }
        ensure!(self.n_workers != Some(0), "n_workers must be at least 1");
        Ok(())
    }

    pub fn sweep_time_limit(&self) -> Option<Duration> {
        self.sweep_time_limit_s.map(secs_to_limit)
    }

    pub fn solver_time_limit(&self) -> Option<Duration> {
        self.solver_time_limit_s.map(secs_to_limit)
    }

    pub fn instance_time_limit(&self) -> Option<Duration> {
        self.instance_time_limit_s.map(secs_to_limit)
    }
}

/// Limits rejected by [`SweepConfig::validate`] never expire
fn secs_to_limit(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            solver: SolverBackend::Microlp,
            sweep_time_limit_s: None,
            solver_time_limit_s: None,
            instance_time_limit_s: Some(605.0),
            parallel_sweep: false,
            n_workers: None,
            write_report: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: SweepConfig =
            serde_json::from_str(r#"{"solver": "microlp", "parallel_sweep": true}"#).unwrap();

        assert!(config.parallel_sweep);
        assert_eq!(config.solver, SolverBackend::Microlp);
        assert_eq!(config.instance_time_limit(), Some(Duration::from_secs(605)));
        assert_eq!(config.sweep_time_limit(), None);
    }

    #[test_case(r#"{"sweep_time_limit_s": -1.0}"#; "negative sweep limit")]
    #[test_case(r#"{"instance_time_limit_s": 1e30}"#; "instance limit too large")]
    #[test_case(r#"{"solver_time_limit_s": -0.5}"#; "negative solver limit")]
    #[test_case(r#"{"n_workers": 0}"#; "no workers")]
    fn rejects_invalid_config(json: &str) {
        let config: SweepConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_limit_is_rejected_and_never_expires() {
        let config = SweepConfig {
            sweep_time_limit_s: Some(f64::NAN),
            ..SweepConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.sweep_time_limit(), Some(Duration::MAX));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SweepConfig::default().validate().is_ok());
    }
}
