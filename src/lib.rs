pub mod cli;
pub mod config;
pub mod correlation;
pub mod data;
pub mod error;
pub mod frame;
pub mod ingest;
pub mod io_utils;
pub mod profile;
pub mod report;
pub mod stats;
pub mod summary;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, debug, info};
use serde::Serialize;

use crate::{
    cli::{Cli, Commands, InputArgs, OutputFormat},
    config::ProfileOptions,
    frame::Table,
    ingest::IngestOptions,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("quick_eda", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => handle_preview(&args),
        Commands::Summary(args) => handle_summary(&args),
        Commands::Profile(args) => handle_profile(&args),
        Commands::Correlate(args) => handle_correlate(&args),
    }
}

fn load_table(args: &InputArgs) -> Result<Table> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Reading '{}' with encoding {}",
        args.input.display(),
        encoding.name()
    );
    let table = ingest::parse_path(&args.input, &IngestOptions { encoding })?;
    Ok(table)
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    render: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", render(value)),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(value).context("Serializing output as JSON")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let table = load_table(&args.input)?;
    print!("{}", report::render_preview(&table, args.rows));
    info!(
        "Displayed {} of {} row(s)",
        args.rows.min(table.row_count()),
        table.row_count()
    );
    Ok(())
}

fn handle_summary(args: &cli::SummaryArgs) -> Result<()> {
    let table = load_table(&args.input)?;
    let summary = summary::summarize(&table);
    debug!(
        "{} missing cell(s), {} duplicate row(s)",
        summary.missing_total, summary.duplicate_count
    );
    emit(args.format, &summary, report::render_summary)
}

fn handle_profile(args: &cli::ProfileArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => ProfileOptions::load(path)?,
        None => ProfileOptions::default(),
    };
    let options = base.with_overrides(args.top_n, args.rare_threshold, args.histogram_bins)?;
    debug!("Profile options: {options:?}");

    let table = load_table(&args.input)?;
    let summaries = if args.columns.is_empty() {
        profile::profile_table(&table, &options)
    } else {
        args.columns
            .iter()
            .map(|name| {
                table
                    .column(name.trim())
                    .map(|column| profile::profile(column, &options))
                    .ok_or_else(|| {
                        anyhow!(
                            "Column '{}' not found in {:?}",
                            name.trim(),
                            args.input.input
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?
    };
    info!("Profiled {} column(s)", summaries.len());

    emit(args.format, &summaries, |summaries| {
        summaries
            .iter()
            .map(report::render_profile)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn handle_correlate(args: &cli::CorrelateArgs) -> Result<()> {
    let table = load_table(&args.input)?;
    if table.column(&args.target).is_none() {
        return Err(anyhow!(
            "Target column '{}' not found in {:?}",
            args.target,
            args.input.input
        ));
    }
    let features = if args.columns.is_empty() {
        table
            .headers()
            .into_iter()
            .filter(|name| name != &args.target)
            .collect::<Vec<_>>()
    } else {
        args.columns
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    };
    debug!("Correlation features: {features:?}");
    let matrix = correlation::correlate(&table, &args.target, &features);
    info!(
        "Correlated {} numeric feature(s) against target '{}'",
        matrix.columns.len(),
        args.target
    );
    emit(args.format, &matrix, report::render_correlation)
}
