use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::converter::{convert_file, ConvertOptions};
use crate::error::{ConvertError, Result};

/// File name prefixes of the statement exports we convert.
pub const STATEMENT_PREFIXES: &[&str] = &["Icecream", "Cash reserves", "Optimal"];
pub const STATEMENT_EXTENSION: &str = "xls";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub selected: usize,
    pub converted: usize,
    pub failed: usize,
}

pub fn is_statement_file(name: &str) -> bool {
    STATEMENT_PREFIXES.iter().any(|p| name.starts_with(p))
        && Path::new(name)
            .extension()
            .map_or(false, |e| e.eq_ignore_ascii_case(STATEMENT_EXTENSION))
}

/// Regular files directly in `dir` that look like statement exports, sorted by name.
pub fn discover_statement_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let list_err = |source: std::io::Error| ConvertError::DirectoryList {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        if !entry.file_type().map_err(list_err)?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::debug!("skipping non-UTF-8 name {:?}", entry.file_name());
            continue;
        };
        if is_statement_file(&name) {
            files.push(entry.path());
        } else {
            log::debug!("skipping {name}");
        }
    }
    files.sort();
    Ok(files)
}

/// Convert every statement in `dir`, one at a time.
///
/// Per-file failures are reported by the converter and counted, never raised.
/// A directory that cannot be listed is reported and treated as empty.
pub fn run_batch(dir: &Path, options: &ConvertOptions) -> BatchReport {
    let files = match discover_statement_files(dir) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            return BatchReport::default();
        }
    };

    let mut report = BatchReport {
        selected: files.len(),
        ..BatchReport::default()
    };
    for file in &files {
        match convert_file(file, options) {
            Some(_) => report.converted += 1,
            None => report.failed += 1,
        }
    }
    println!("Transformed {} files successfully.", report.selected);
    log::debug!("{} converted, {} failed", report.converted, report.failed);
    report
}
