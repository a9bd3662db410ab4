//! CSV report writing for parsed submissions.
//!
//! The header row is always written from [`Submission::COLUMNS`], so an empty
//! batch still produces a well-formed report.

use crate::error::Result;
use crate::models::Submission;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes one CSV report per batch
#[derive(Debug, Clone)]
pub struct SubmissionWriter {
    output_path: PathBuf,
}

impl SubmissionWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write every submission, creating or truncating the output file.
    /// Returns the number of data rows written.
    pub fn write(&self, submissions: &[Submission]) -> Result<usize> {
        let file = File::create(&self.output_path)?;
        write_submissions(submissions, file)?;

        debug!(
            "Wrote {} submissions to {}",
            submissions.len(),
            self.output_path.display()
        );

        Ok(submissions.len())
    }
}

/// Serialise submissions as CSV into any writer
pub fn write_submissions<W: Write>(submissions: &[Submission], destination: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(destination);

    writer.write_record(Submission::COLUMNS)?;
    for submission in submissions {
        writer.serialize(submission)?;
    }
    writer.flush()?;

    Ok(())
}

/// Write submissions to a CSV file at `output_path`
pub fn write_submissions_to_csv(submissions: &[Submission], output_path: &Path) -> Result<()> {
    SubmissionWriter::new(output_path.to_path_buf()).write(submissions)?;
    Ok(())
}
