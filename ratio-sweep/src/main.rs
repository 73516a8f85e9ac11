use std::fs;

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use log::info;
use ratio_sweep::batch::{self, InstanceOutcome};
use ratio_sweep::io;
use ratio_sweep::io::cli::Cli;
use ratio_sweep::solver::{GoodLpSolver, IlpSolver};
use wavepick::util::logger;

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init_logger(args.log_level)?;

    let config = io::read_config(args.config_file.as_deref())?;
    info!("[MAIN] Successfully parsed SweepConfig: {config:?}");

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let solver = GoodLpSolver::new(config.solver, config.solver_time_limit());
    info!("[MAIN] using solver backend: {}", solver.name());

    match args.input.is_dir() {
        true => {
            let files = batch::collect_instance_files(&args.input)?;
            if files.is_empty() {
                bail!("no instance files found in {}", args.input.display());
            }
            let reports = batch::run_batch(&files, &solver, &config, &args.solution_folder)?;
            let n_failed = reports.iter().filter(|r| r.outcome.is_failure()).count();
            if n_failed > 0 {
                bail!("{n_failed} of {} instances failed", reports.len());
            }
        }
        false => {
            let report =
                batch::solve_instance_file(&args.input, &solver, &config, &args.solution_folder);
            match report.outcome {
                InstanceOutcome::ParseFailed(msg)
                | InstanceOutcome::SolverFailed(msg)
                | InstanceOutcome::OutputFailed(msg) => bail!("{}: {msg}", report.name),
                _ => {}
            }
        }
    }

    Ok(())
}
