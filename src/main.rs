use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use parselearn::cli::Args;
use parselearn::{BatchProcessor, BatchStats};
use std::io;
use std::process;
use tracing::debug;

fn main() {
    let args = Args::parse();

    if let Err(error) = run(&args) {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    setup_logging(args);

    let processor =
        BatchProcessor::new(args.parser_config()).context("Invalid parser configuration")?;

    if args.writes_to_stdout() {
        let stdout = io::stdout();
        processor
            .process_to_writer(&args.input_path, stdout.lock())
            .with_context(|| format!("Failed to process {}", args.input_path.display()))?;
        return Ok(());
    }

    let output_path = args.get_output_path();
    if !args.quiet {
        println!("{}", "Parsing submission receipts".bright_green().bold());
        println!(
            "  {} {}",
            "Input:".bright_cyan(),
            args.input_path.display()
        );
        println!("  {} {}", "Output:".bright_cyan(), output_path.display());
    }

    let stats = processor
        .process(&args.input_path, &output_path)
        .with_context(|| format!("Failed to process {}", args.input_path.display()))?;

    if !args.quiet {
        print_summary(&stats);
    }

    Ok(())
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("parselearn={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
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
    }

    debug!("Logging initialized at level: {}", log_level);
}

fn print_summary(stats: &BatchStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {} of {}",
        "Receipts parsed:".bright_cyan(),
        stats.files_processed.to_string().bright_white().bold(),
        stats.files_discovered.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Receipts failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    if stats.filetype_errors > 0 {
        println!(
            "  {} {}",
            "Non-PDF uploads:".bright_yellow(),
            stats.filetype_errors.to_string().bright_yellow().bold()
        );
    }
    println!(
        "  {} {}",
        "Report:".bright_cyan(),
        stats.output_path.display()
    );
}
