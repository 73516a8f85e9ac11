use anyhow::{Result, bail};
use clap::Parser as ClapParser;
use wavepick::util::logger::init_logger;
use wavepick_checker::cli::{Cli, Command};
use wavepick_checker::{check_folders, check_pair};

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.log_level)?;

    match args.command {
        Command::Pair { instance, solution } => {
            let report = check_pair(&instance, &solution)?;
            println!("{}: {}", report.instance, report.describe());
            if !report.verdict.feasible {
                bail!("{} is infeasible", solution.display());
            }
            if !report.passed() {
                bail!("{} has an undefined objective", solution.display());
            }
        }
        Command::Batch {
            instance_folder,
            solution_folder,
        } => {
            let results = check_folders(&instance_folder, &solution_folder)?;
            let n_failed = results.iter().filter(|r| r.is_failure()).count();
            if n_failed > 0 {
                bail!("{n_failed} of {} pairs failed the check", results.len());
            }
        }
    }
    Ok(())
}
