use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(
        short,
        long,
        global = true,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a single solution against its instance
    Pair {
        instance: PathBuf,
        solution: PathBuf,
    },
    /// Check every instance in a folder against the equally named solution file
    Batch {
        #[arg(short, long, value_name = "FOLDER")]
        instance_folder: PathBuf,
        #[arg(short, long, value_name = "FOLDER")]
        solution_folder: PathBuf,
    },
}
