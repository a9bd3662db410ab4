//! Batch processing of receipt exports.
//!
//! Discovers receipts, parses each one to completion in order, and writes
//! the collected submissions to a single CSV report. A receipt that cannot be
//! read is logged and skipped; the rest of the batch carries on.

pub mod discovery;

#[cfg(test)]
pub mod tests;

use self::discovery::ReceiptDiscovery;

use crate::config::ParserConfig;
use crate::constants::STDOUT_PATH;
use crate::error::{ReceiptError, Result};
use crate::models::{BatchStats, Submission};
use crate::receipt::ReceiptParser;
use crate::writer::{SubmissionWriter, write_submissions};

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Main processor for receipt exports
#[derive(Debug)]
pub struct BatchProcessor {
    config: ParserConfig,
    parser: ReceiptParser,
}

impl BatchProcessor {
    /// Create a new batch processor, validating the configuration
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            parser: ReceiptParser::new(config.clone()),
            config,
        })
    }

    /// Parse every receipt in order. Unreadable receipts are skipped and
    /// counted in the returned failure total.
    pub fn parse_receipts(&self, receipts: &[PathBuf]) -> (Vec<Submission>, usize) {
        let progress_bar = self.progress_bar(receipts.len() as u64);
        let mut submissions = Vec::with_capacity(receipts.len());
        let mut failed = 0;

        for receipt in receipts {
            match self.parser.parse_file(receipt) {
                Ok(mut submission) => {
                    submission.receipt_filename = receipt.display().to_string();
                    submissions.push(submission);
                }
                Err(e) => {
                    match e.partial_submission() {
                        Some(partial) => warn!(
                            "Skipping receipt {}: {} (scan stopped after uun={:?}, files={})",
                            receipt.display(),
                            e,
                            partial.uun,
                            partial.number_of_files
                        ),
                        None => warn!("Skipping receipt {}: {}", receipt.display(), e),
                    }
                    failed += 1;
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        (submissions, failed)
    }

    /// Main processing entry point
    pub fn process(&self, input_path: &Path, output_path: &Path) -> Result<BatchStats> {
        ensure_distinct_paths(input_path, output_path)?;

        let start_time = Instant::now();
        let (receipts, submissions, files_failed) = self.collect(input_path)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let files_processed = SubmissionWriter::new(output_path.to_path_buf()).write(&submissions)?;
        info!(
            "Wrote {} submissions to {}",
            files_processed,
            output_path.display()
        );

        Ok(build_stats(
            receipts.len(),
            &submissions,
            files_failed,
            output_path.to_path_buf(),
            start_time,
        ))
    }

    /// Process a batch and stream the report into `destination`, e.g. stdout
    pub fn process_to_writer<W: Write>(
        &self,
        input_path: &Path,
        destination: W,
    ) -> Result<BatchStats> {
        let start_time = Instant::now();
        let (receipts, submissions, files_failed) = self.collect(input_path)?;

        write_submissions(&submissions, destination)?;

        Ok(build_stats(
            receipts.len(),
            &submissions,
            files_failed,
            PathBuf::from(STDOUT_PATH),
            start_time,
        ))
    }

    fn collect(&self, input_path: &Path) -> Result<(Vec<PathBuf>, Vec<Submission>, usize)> {
        let receipts =
            ReceiptDiscovery::new(input_path.to_path_buf(), &self.config.receipt_extension)
                .discover()?;
        info!(
            "Found {} receipts in {}",
            receipts.len(),
            input_path.display()
        );

        let (submissions, files_failed) = self.parse_receipts(&receipts);
        Ok((receipts, submissions, files_failed))
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} receipts")
        {
            progress_bar.set_style(style.progress_chars("#>-"));
        }
        progress_bar
    }
}

fn build_stats(
    files_discovered: usize,
    submissions: &[Submission],
    files_failed: usize,
    output_path: PathBuf,
    start_time: Instant,
) -> BatchStats {
    BatchStats {
        files_discovered,
        files_processed: submissions.len(),
        files_failed,
        filetype_errors: submissions
            .iter()
            .filter(|submission| submission.has_filetype_error())
            .count(),
        output_path,
        processing_time_ms: start_time.elapsed().as_millis(),
    }
}

/// Refuse to truncate a receipt by writing the report over it
fn ensure_distinct_paths(input_path: &Path, output_path: &Path) -> Result<()> {
    let same = match (fs::canonicalize(input_path), fs::canonicalize(output_path)) {
        (Ok(input), Ok(output)) => input == output,
        _ => input_path == output_path,
    };

    if same {
        return Err(ReceiptError::OutputOverwritesInput {
            path: output_path.to_path_buf(),
        });
    }

    Ok(())
}
