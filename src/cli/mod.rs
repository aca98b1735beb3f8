pub mod convert;

use clap::Parser;

use crate::classifier::DEFAULT_INSTITUTION;
use crate::converter::DEFAULT_TEMPLATE_PATH;

#[derive(Parser)]
#[command(
    name = "xero-convert",
    version,
    about = "Convert bank statement spreadsheets into accounting import CSVs."
)]
pub struct Cli {
    /// Directory to scan for statement files; converted CSVs are written here too
    #[arg(long, default_value = ".")]
    pub dir: String,
    /// Import template whose first line names the five output columns
    #[arg(long, default_value = DEFAULT_TEMPLATE_PATH)]
    pub template: String,
    /// Payee name used for interest rows
    #[arg(long, default_value = DEFAULT_INSTITUTION)]
    pub payee: String,
    /// Exit with status 1 if any statement failed to convert
    #[arg(long)]
    pub strict: bool,
    /// Show diagnostic detail (same as RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,
    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
