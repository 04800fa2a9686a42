//! Command-line front end for analyzing energy and power measurement logs.
//!
//! # Usage
//!
//! ```bash
//! # Characterize one batch of runs
//! wattlog analyze idle1.csv idle2.csv idle3.csv
//!
//! # Compare two batches, JSON on stdout
//! wattlog compare --first before/*.csv --second after/*.csv --json --pretty
//!
//! # Stricter outlier removal, debug logging on stderr
//! wattlog -v analyze --outlier-threshold 2 run.csv
//! ```
//!
//! `RUST_LOG` overrides the log filter; `WATTLOG_OUTLIER_THRESHOLD` sets the
//! default outlier threshold.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use wattlog::data::{batch_from_files, display_name, load_measurement_csv};
use wattlog::output::{json, terminal};
use wattlog::{analyze_measurements, compare_datasets, Config, FileBatch};
use wattlog_core::constants::{DEFAULT_SIGNIFICANCE_LEVEL, DEFAULT_WARMUP_ROWS};

/// Energy and power measurement log analysis
#[derive(Parser, Debug)]
#[command(name = "wattlog")]
#[command(about = "Analyze and compare energy/power measurement logs")]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one batch of measurement files
    Analyze {
        /// Measurement CSV files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        options: Options,
    },

    /// Compare two batches of measurement files
    Compare {
        /// Files of the first dataset
        #[arg(long, num_args = 1.., required = true)]
        first: Vec<PathBuf>,

        /// Files of the second dataset
        #[arg(long, num_args = 1.., required = true)]
        second: Vec<PathBuf>,

        #[command(flatten)]
        options: Options,
    },
}

#[derive(Args, Debug)]
struct Options {
    /// Standard deviations kept by the outlier filter (minimum 1)
    ///
    /// Defaults to $WATTLOG_OUTLIER_THRESHOLD, or 3.
    #[arg(long)]
    outlier_threshold: Option<f64>,

    /// Leading rows dropped from every file
    #[arg(long, default_value_t = DEFAULT_WARMUP_ROWS)]
    warmup_rows: usize,

    /// Significance level for normality and two-sample tests
    #[arg(long, default_value_t = DEFAULT_SIGNIFICANCE_LEVEL)]
    alpha: f64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Read files one after another instead of in parallel
    #[arg(long)]
    sequential: bool,
}

impl Options {
    fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()
            .with_warmup_rows(self.warmup_rows)
            .with_significance_level(self.alpha);
        if let Some(threshold) = self.outlier_threshold {
            config = config.with_outlier_threshold(threshold);
        }
        if self.sequential {
            config = config.sequential();
        }
        config.validate()?;
        Ok(config)
    }

    fn emit<T: Serialize>(&self, report: &T, format: impl FnOnce(&T) -> String) -> Result<()> {
        if self.json {
            let out = if self.pretty {
                json::to_json_pretty(report)?
            } else {
                json::to_json(report)?
            };
            println!("{}", out);
        } else {
            print!("{}", format(report));
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze { files, options } => {
            let config = options.config()?;
            let batch = load(&files, &config, "dataset")?;
            let report = analyze_measurements(&batch, &config)?;
            options.emit(&report, terminal::format_measurement_report)
        }
        Command::Compare {
            first,
            second,
            options,
        } => {
            let config = options.config()?;
            let first = load(&first, &config, "first dataset")?;
            let second = load(&second, &config, "second dataset")?;
            let report = compare_datasets(&first, &second, &config)?;
            options.emit(&report, terminal::format_comparison_report)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "wattlog=debug,wattlog_core=debug"
    } else {
        "wattlog=info,wattlog_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load(paths: &[PathBuf], config: &Config, label: &str) -> Result<FileBatch> {
    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} | {msg}")?
            .progress_chars("=>-"),
    );

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        progress.set_message(display_name(path));
        let file = load_measurement_csv(path)
            .with_context(|| format!("failed to load {}", label))?;
        files.push(file);
        progress.inc(1);
    }
    progress.finish_and_clear();

    batch_from_files(files, config).with_context(|| format!("failed to read {}", label))
}
