use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, time::Instant};
use tracing::{debug, info};
use vaccine_acceleration::{
    config::FileConfig,
    format::{render_report, render_timing, ReportStyle},
    io::{ensure_local_copy, export_snapshot, load_series, FetchPolicy, ReqwestSource},
    logging::init_logging,
    pipeline::{AccelerationDefinition, Pipeline, SmoothingMode},
};

#[derive(Parser, Debug)]
#[command(
    name = "vaccine-acceleration",
    about = "Vaccination rate, acceleration, and days-to-milestone projections",
    version
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Moving-window size in days for the vaccination rate
    #[arg(short, long, conflicts_with = "cumulative_average")]
    window: Option<usize>,

    /// Use the since-start average instead of a moving window
    #[arg(long)]
    cumulative_average: bool,

    /// Project with the percentage change between the last two rate means
    #[arg(long)]
    delta_of_means: bool,

    /// Never touch the network; use the cached CSV
    #[arg(long, conflicts_with = "refresh")]
    offline: bool,

    /// Download even if the cache was fetched today
    #[arg(long)]
    refresh: bool,

    /// Write the derived series to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();
    init_logging(cli.verbose, !cli.no_color);

    let config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let source_options = config.source_options();
    let mut options = config.pipeline_options()?;
    if let Some(window) = cli.window {
        options.smoothing = SmoothingMode::moving_window(window)?;
    }
    if cli.cumulative_average {
        options.smoothing = SmoothingMode::CumulativeAverage;
    }
    if cli.delta_of_means {
        options.acceleration = AccelerationDefinition::DeltaOfMeans;
    }
    debug!(?source_options, ?options, "configuration resolved");

    let policy = if cli.offline {
        FetchPolicy::Offline
    } else if cli.refresh {
        FetchPolicy::Refresh
    } else {
        FetchPolicy::IfStale
    };
    let source = ReqwestSource::new(&source_options).context("building HTTP client")?;
    let outcome = ensure_local_copy(&source_options, policy, &source)
        .context("obtaining vaccination data")?;
    info!(?outcome, "data source ready");

    let series = load_series(&source_options.cache_path).with_context(|| {
        format!("loading vaccination series from {}", source_options.cache_path.display())
    })?;

    let pipeline = Pipeline::new(options)?;
    let derived = pipeline.derive(&series).context("deriving rate series")?;
    let report = pipeline.report(&series, &derived).context("building report")?;

    if let Some(path) = &cli.export {
        export_snapshot(path, &series, &derived)
            .with_context(|| format!("exporting snapshot to {}", path.display()))?;
    }

    println!("{}", render_report(&report, ReportStyle { color: !cli.no_color }));
    println!("{}", render_timing(started.elapsed()));
    Ok(())
}
