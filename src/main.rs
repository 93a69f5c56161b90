use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use labgrade::{batch, config_loader};

/// Parse lab export files into topology documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder containing the lab export files
    #[arg(short, long)]
    source_dir: PathBuf,

    /// Folder where topology documents will be saved
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Optional grading configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .wrap_err("Failed to configure thread pool")?;
    }

    let config = config_loader::load_or_default(args.config.as_deref())?;

    info!("Source directory: {:?}", args.source_dir);
    info!("Output directory: {:?}", args.output_dir);

    let summary = batch::extract_directory(&args.source_dir, &args.output_dir, &config)?;

    for failed in &summary.failed {
        warn!("Not extracted: {}", failed.display());
    }
    info!(
        "Extraction finished: {} written, {} skipped",
        summary.processed.len(),
        summary.failed.len()
    );

    if summary.processed.is_empty() && !summary.failed.is_empty() {
        return Err(eyre!("No lab export could be extracted"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(&[
            "labgrade",
            "--source-dir", "labs",
            "--output-dir", "parsed",
        ]);

        assert_eq!(args.source_dir, PathBuf::from("labs"));
        assert_eq!(args.output_dir, PathBuf::from("parsed"));
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
        assert_eq!(args.threads, 0);
    }

    #[test]
    fn test_cli_requires_dirs() {
        assert!(Args::try_parse_from(&["labgrade", "--source-dir", "labs"]).is_err());
    }
}
