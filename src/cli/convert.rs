use std::path::PathBuf;

use crate::batch::run_batch;
use crate::cli::Cli;
use crate::converter::ConvertOptions;
use crate::error::{ConvertError, Result};

pub fn options(cli: &Cli) -> ConvertOptions {
    ConvertOptions {
        template_path: PathBuf::from(&cli.template),
        institution: cli.payee.clone(),
    }
}

/// Convert every statement in `--dir`. Per-file failures are only an error under `--strict`.
pub fn run(cli: &Cli) -> Result<()> {
    let report = run_batch(&PathBuf::from(&cli.dir), &options(cli));
    if cli.strict && report.failed > 0 {
        return Err(ConvertError::BatchFailed {
            failed: report.failed,
            selected: report.selected,
        });
    }
    Ok(())
}
