use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::config::SweepConfig;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

pub mod cli;
pub mod output;

/// Reads the config from `path`, or falls back to the default one
pub fn read_config(path: Option<&Path>) -> Result<SweepConfig> {
    match path {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            Ok(SweepConfig::default())
        }
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("could not open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: SweepConfig =
                serde_json::from_reader(reader).context("incorrect config file format")?;
            config.validate()?;
            Ok(config)
        }
    }
}

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, json)?;
    info!("[IO] report written to file://{}", fs::canonicalize(path)?.to_str().unwrap_or("?"));
    Ok(())
}
