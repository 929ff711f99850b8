use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Quick exploratory analysis of CSV and Excel files",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the first rows of a file as a formatted table
    Preview(PreviewArgs),
    /// Report shape, missing values and duplicate rows
    Summary(SummaryArgs),
    /// Profile one or more columns (all columns when none are given)
    Profile(ProfileArgs),
    /// Correlate numeric feature columns, excluding a target column
    Correlate(CorrelateArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input file (.csv, .xls or .xlsx)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Character encoding of CSV input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Number of rows to display
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Columns to profile
    #[arg(short = 'C', long = "columns", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// Number of most frequent categories to list
    #[arg(long = "top-n")]
    pub top_n: Option<usize>,
    /// Categories seen fewer times than this are reported as rare
    #[arg(long = "rare-threshold")]
    pub rare_threshold: Option<usize>,
    /// Number of histogram bins for numeric columns
    #[arg(long = "histogram-bins")]
    pub histogram_bins: Option<usize>,
    /// YAML file overriding the default profiling options
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CorrelateArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Target column, excluded from the feature set
    #[arg(long)]
    pub target: String,
    /// Feature columns (defaults to every other column)
    #[arg(short = 'C', long = "columns", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}
