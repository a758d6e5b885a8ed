//! CLI entry point for the fruit-quality analysis.

use anyhow::{Context, Result};
use clap::Parser;
use fruit_eda::{Analysis, AnalysisResult, DEFAULT_INPUT, EdaConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory analysis of fruit-quality measurements",
    long_about = "Loads a fruit-quality CSV, drops incomplete rows, encodes the Quality \
                  label, prints a statistical summary and writes SVG figures.\n\n\
                  EXAMPLES:\n  \
                  # Default run on ./apple_quality.csv\n  \
                  fruit-eda\n\n  \
                  # Summary only, as JSON\n  \
                  fruit-eda -i data/apples.csv --no-plots --json\n\n  \
                  # Plot another feature by quality\n  \
                  fruit-eda --distribution-column Crunchiness -o charts/"
)]
struct Args {
    /// Path to the CSV file to analyse
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory receiving the SVG figures
    #[arg(short, long, default_value = "figures")]
    output: PathBuf,

    /// Identifier column, left out of the correlation heatmap
    #[arg(long, default_value = "A_id")]
    id_column: String,

    /// Column shown in the histogram
    #[arg(long, default_value = "Sweetness")]
    histogram_column: String,

    /// X axis of the scatter plot
    #[arg(long, default_value = "Sweetness")]
    scatter_x: String,

    /// Y axis of the scatter plot
    #[arg(long, default_value = "Weight")]
    scatter_y: String,

    /// Column shown in the box and violin plots
    #[arg(long, default_value = "Juiciness")]
    distribution_column: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print the report as JSON instead of the text summary
    ///
    /// Disables all logging so stdout carries only JSON.
    #[arg(long)]
    json: bool,

    /// Skip figure rendering
    #[arg(long)]
    no_plots: bool,
}

/// Initialize the tracing subscriber.
///
/// Nothing is installed with `--json`, keeping stdout clean.
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
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = EdaConfig::builder()
        .output_dir(&args.output)
        .id_column(&args.id_column)
        .histogram_column(&args.histogram_column)
        .scatter_columns(&args.scatter_x, &args.scatter_y)
        .distribution_column(&args.distribution_column)
        .render_plots(!args.no_plots)
        .build()?;

    let mut builder = Analysis::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    let result = builder
        .build()?
        .run(&args.input)
        .with_context(|| format!("Analysis of {} failed", args.input.display()))?;

    if args.json {
        println!("{}", result.report.to_json()?);
    } else {
        print_summary(&result);
    }

    Ok(())
}

/// Print the four reports, then where the figures went.
fn print_summary(result: &AnalysisResult) {
    let report = &result.report;
    print!("{}", report.summary);
    println!();

    if !report.figures.is_empty() {
        println!("Figures:");
        for figure in &report.figures {
            println!("  {}", figure.display());
        }
    }
}
