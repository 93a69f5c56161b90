//! Grading CLI: compares parsed topology documents against a solution.
//!
//! Writes `report_<name>.txt` and `report_<name>.json` for every document
//! found in the parsed directory.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};

use labgrade::{batch, config_loader, report};

#[derive(Parser)]
#[command(name = "lab-report")]
#[command(about = "Generate comparison reports between parsed documents and a solution")]
#[command(version)]
struct Cli {
    /// Directory containing the parsed JSON documents
    #[arg(long)]
    parsed_dir: PathBuf,

    /// Directory to save the generated reports
    #[arg(long)]
    output_dir: PathBuf,

    /// JSON document containing the solution
    #[arg(long)]
    solution_file: PathBuf,

    /// Optional grading configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Print a one-line summary per graded document
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let config = config_loader::load_or_default(cli.config.as_deref())?;

    let (summary, reports) = batch::grade_directory(
        &cli.parsed_dir,
        &cli.solution_file,
        &cli.output_dir,
        &config.report,
    )?;

    if cli.summary {
        for (path, comparison) in &reports {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            report::print_summary(&name, comparison);
        }
    }

    log::info!(
        "Reports generated for {} document(s), {} skipped",
        summary.processed.len(),
        summary.failed.len()
    );
    Ok(())
}
