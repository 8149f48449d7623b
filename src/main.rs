use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use imdb_cleaner::cli::Args;
use imdb_cleaner::{CleanedTable, CleaningPipeline, Column, SortOrder, max_by, top_n};
use std::process;
use tracing::debug;

fn main() {
    let args = Args::parse();

    if let Err(error) = run(args) {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    setup_logging(&args);

    let config = args
        .build_config()
        .context("Failed to load configuration")?;
    let output_path = args.get_output_path(config.output_format);
    let top = config.top_n;

    let pipeline = CleaningPipeline::new(args.input.clone(), Some(output_path))?
        .with_config(config);
    let (assembly, _stats) = pipeline
        .process()
        .with_context(|| format!("Failed to clean {}", args.input.display()))?;

    report_top_grossing(&assembly.table, top);
    Ok(())
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("imdb_cleaner={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Print the highest-grossing title and the top list. Aggregation errors are
/// reported rather than failing the run, since the table is already written.
fn report_top_grossing(table: &CleanedTable, n: usize) {
    println!("\n{}", "Top Grossing".bright_green().bold());

    match max_by(table, Column::Income) {
        Ok(row) => println!(
            "  {} {} ({})",
            "Highest income:".bright_cyan(),
            row.title.bright_white().bold(),
            format_income(row.income)
        ),
        Err(e) => {
            println!("  {} {}", "Unavailable:".bright_yellow(), e);
            return;
        }
    }

    if let Ok(rows) = top_n(table, Column::Income, n, SortOrder::Descending) {
        for (rank, row) in rows.iter().enumerate() {
            println!(
                "  {}. {} {}",
                (rank + 1).to_string().bright_yellow().bold(),
                row.title.bright_cyan(),
                format_income(row.income).bright_black()
            );
        }
    }
}

fn format_income(income: Option<f64>) -> String {
    income.map_or_else(|| "n/a".to_string(), |value| format!("${:.0}", value))
}
