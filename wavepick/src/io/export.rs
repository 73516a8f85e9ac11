use crate::entities::Selection;
use anyhow::{Context, Result};
use log::info;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Formats a selection in the solution file format, indices in ascending order.
pub fn format_selection(selection: &Selection) -> String {
    let mut out = String::new();
    for section in [&selection.orders, &selection.aisles] {
        let _ = writeln!(out, "{}", section.len());
        for idx in section {
            let _ = writeln!(out, "{idx}");
        }
    }
    out
}

pub fn write_selection(selection: &Selection, path: &Path) -> Result<()> {
    fs::write(path, format_selection(selection))
        .with_context(|| format!("could not write solution file: {}", path.display()))?;
    info!(
        "[IO] solution written to {:?}",
        fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    );
    Ok(())
}
