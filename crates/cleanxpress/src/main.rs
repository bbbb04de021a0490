//! CLI entry point for profiling and cleaning a CSV dataset.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use cleanxpress::{
    CleaningConfig, CleaningConfigBuilder, CleaningSummary, ColumnConversion, DataCleaner,
    DataProfiler, MissingTextPolicy, MissingValueStrategy, OutlierPass, ReportGenerator,
};
use dotenv::dotenv;
use polars::prelude::*;
use std::path::Path;
use tracing::{error, info};

/// CLI-compatible missing value strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMissing {
    /// Leave missing values as they are
    None,
    /// Fill numeric columns with their mean
    Mean,
    /// Fill numeric columns with their median
    Median,
    /// Drop rows with any missing value
    Drop,
}

impl From<CliMissing> for MissingValueStrategy {
    fn from(cli: CliMissing) -> Self {
        match cli {
            CliMissing::None => MissingValueStrategy::None,
            CliMissing::Mean => MissingValueStrategy::FillMean,
            CliMissing::Median => MissingValueStrategy::FillMedian,
            CliMissing::Drop => MissingValueStrategy::DropRows,
        }
    }
}

/// CLI-compatible outlier pass enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutlierPass {
    /// Each column's fences are computed on the rows left by earlier columns
    Sequential,
    /// All fences are computed on the table as it entered the step
    Simultaneous,
}

impl From<CliOutlierPass> for OutlierPass {
    fn from(cli: CliOutlierPass) -> Self {
        match cli {
            CliOutlierPass::Sequential => OutlierPass::Sequential,
            CliOutlierPass::Simultaneous => OutlierPass::Simultaneous,
        }
    }
}

fn parse_conversion(value: &str) -> std::result::Result<ColumnConversion, String> {
    value.parse::<ColumnConversion>().map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Profile and clean tabular CSV data",
    long_about = "Profiles a CSV dataset and applies the selected cleaning steps in a fixed order:\n\
                  duplicates, missing values, formatting, outliers, type conversions.\n\n\
                  EXAMPLES:\n  \
                  # Preview the column profile only\n  \
                  cleanxpress -i data.csv --profile-only\n\n  \
                  # Remove duplicates, fill with the mean, convert 'age' to int\n  \
                  cleanxpress -i data.csv --drop-duplicates --handle-missing mean --convert age=int\n\n  \
                  # Use a saved configuration and print the summary as JSON\n  \
                  cleanxpress -i data.csv --config cleaning.json --json"
)]
struct Args {
    /// Path to the CSV file to clean
    #[arg(short, long)]
    input: String,

    /// Output directory for the cleaned CSV and the report
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Load cleaning options from a JSON file
    ///
    /// Options given on the command line override the file.
    #[arg(long)]
    config: Option<String>,

    /// Remove duplicate rows
    #[arg(long)]
    drop_duplicates: bool,

    /// How to handle missing values
    #[arg(long, value_enum)]
    handle_missing: Option<CliMissing>,

    /// Trim and lowercase column names and text values
    #[arg(long)]
    format_columns: bool,

    /// Remove rows outside the IQR fences of numeric columns
    #[arg(long)]
    remove_outliers: bool,

    /// Convert a column after cleaning, as COLUMN=int|float|datetime
    ///
    /// May be given several times; conversions run in the order given.
    #[arg(long = "convert", value_name = "COLUMN=TYPE", value_parser = parse_conversion)]
    conversions: Vec<ColumnConversion>,

    /// How outlier fences are computed across columns
    #[arg(long, value_enum)]
    outlier_pass: Option<CliOutlierPass>,

    /// Keep missing text values missing when formatting instead of writing "nan"
    #[arg(long)]
    keep_missing_text: bool,

    /// Print the column profile and exit without cleaning
    #[arg(long)]
    profile_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable output
    ///
    /// Disables all logs so stdout only holds the JSON document.
    #[arg(long)]
    json: bool,

    /// Also write cleaning_report.json to the output directory
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so that
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file before the filter reads RUST_LOG
    dotenv().ok();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let data = cleanxpress::io::load_csv(&args.input)
        .with_context(|| format!("Could not read {}", args.input))?;

    if args.profile_only {
        return run_profile_only(&args, &data);
    }

    let config = build_config(&args)?;
    run_cleaning(&args, config, data)
}

/// Merge the optional config file with command line options.
fn build_config(args: &Args) -> Result<CleaningConfig> {
    let base = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path))?;
            CleaningConfig::from_json(&text)?
        }
        None => CleaningConfig::default(),
    };

    let mut builder = CleaningConfigBuilder::from_config(base);

    if args.drop_duplicates {
        builder = builder.drop_duplicates(true);
    }
    if let Some(missing) = args.handle_missing {
        builder = builder.handle_missing(missing.into());
    }
    if args.format_columns {
        builder = builder.format_columns(true);
    }
    if args.remove_outliers {
        builder = builder.remove_outliers(true);
    }
    for conversion in &args.conversions {
        builder = builder.convert_column(conversion.column.clone(), conversion.target);
    }
    if let Some(pass) = args.outlier_pass {
        builder = builder.outlier_pass(pass.into());
    }
    if args.keep_missing_text {
        builder = builder.missing_text(MissingTextPolicy::KeepMissing);
    }

    Ok(builder.build()?)
}

fn run_profile_only(args: &Args, data: &DataFrame) -> Result<()> {
    let profile = DataProfiler::profile_dataset(data)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("DATASET PROFILE");
    println!("{}\n", "=".repeat(80));
    println!("  File: {}", args.input);
    println!("  Rows: {}", data.height());
    println!("  Columns: {}", data.width());
    println!();
    println!("{}", profile);

    Ok(())
}

fn run_cleaning(args: &Args, config: CleaningConfig, data: DataFrame) -> Result<()> {
    let original_df = data.clone();
    let profile = DataProfiler::profile_dataset(&original_df)?;

    let (cleaned, report) = match DataCleaner::new(config).clean(data) {
        Ok(result) => result,
        Err(e) => {
            error!("Cleaning failed: {}", e);
            return Err(anyhow!("Cleaning failed: {}", e));
        }
    };

    let summary = CleaningSummary::build(Some(args.input.as_str()), &original_df, &cleaned, &report)?;
    let generator = ReportGenerator::new(&args.output);
    let artifacts = generator.write_all(
        &cleaned,
        &report,
        if args.emit_report { Some(&summary) } else { None },
    )?;

    if args.json {
        println!("{}", summary.to_json_pretty()?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("DATASET PROFILE");
    println!("{}\n", "=".repeat(80));
    println!("{}", profile);

    println!("\n{}", "=".repeat(80));
    println!("CLEANING REPORT");
    println!("{}\n", "=".repeat(80));
    println!(
        "Rows: {} → {} | Columns: {}",
        original_df.height(),
        cleaned.height(),
        cleaned.width()
    );
    println!();
    println!("{}", report);

    println!("\nOUTPUT FILES");
    println!("{}", "-".repeat(40));
    println!("  Cleaned data: {}", artifacts.csv_path.display());
    println!("  Report:       {}", artifacts.report_path.display());
    if let Some(path) = &artifacts.summary_path {
        println!("  Summary:      {}", path.display());
    }

    Ok(())
}
