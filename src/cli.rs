//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "kfh-dashboard",
    version,
    about = "KFH attendance and product dashboard",
    long_about = "Filter a KFH attendance/product CSV by KFH, rack and section.\n\n\
                  Prints summary statistics and charts, and exports the filtered rows (CSV)\n\
                  or a one-page summary report (PDF)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the selectable values of each filter column.
    Options(InputArgs),

    /// Print the filtered rows, summary statistics and charts.
    Show(ShowArgs),

    /// Write the filtered rows and/or the summary report to files.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Path to the KFH CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,
}

/// Filter selection. A column without values (and not covered by `--selection`) keeps every value.
#[derive(Args)]
pub struct SelectionArgs {
    /// Allowed KFHName values (repeatable).
    #[arg(long = "kfh", value_name = "NAME")]
    pub kfh: Vec<String>,

    /// Allowed RackName values (repeatable).
    #[arg(long = "rack", value_name = "NAME")]
    pub rack: Vec<String>,

    /// Allowed SectionName values (repeatable).
    #[arg(long = "section", value_name = "NAME")]
    pub section: Vec<String>,

    /// JSON file with a selection, e.g. {"KFHName": ["A"], "RackName": ["R1"]}.
    ///
    /// Columns missing from the file keep every value; --kfh/--rack/--section override it.
    #[arg(long = "selection", value_name = "FILE")]
    pub selection_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Number of filtered rows to print.
    #[arg(long = "rows", value_name = "N", default_value_t = 20)]
    pub rows: usize,

    /// Number of products in the top-products chart.
    #[arg(long = "top", value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Print summary and aggregates as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("artifacts")
        .required(true)
        .multiple(true)
        .args(["csv", "pdf"])
))]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Write the filtered rows as CSV (default name: filtered_kfh_data.csv).
    #[arg(long = "csv", value_name = "PATH", num_args = 0..=1)]
    pub csv: Option<Option<PathBuf>>,

    /// Write the summary report as PDF (default name: kfh_report.pdf).
    #[arg(long = "pdf", value_name = "PATH", num_args = 0..=1)]
    pub pdf: Option<Option<PathBuf>>,

    /// Directory for artifacts written under their default names.
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
