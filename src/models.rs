//! Core data structures for parsed receipts and batch statistics.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One parsed submission receipt.
///
/// A fresh record is all zero-values; the parser only fills the fields whose
/// label appears in the receipt. Page count, file size, output file and
/// marking status belong to surrounding tooling and are carried here so the
/// report has a single shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "StudentName")]
    pub student_name: String,

    /// Matriculation code, upper-cased
    #[serde(rename = "UUN")]
    pub uun: String,

    #[serde(rename = "Assignment")]
    pub assignment: String,

    /// Timestamp exactly as written on the receipt
    #[serde(rename = "DateSubmittedRaw")]
    pub date_submitted_raw: String,

    /// `YYYY-MM-DD-HH-MM-SS`, empty when the raw timestamp did not parse
    #[serde(rename = "DateSubmitted")]
    pub date_submitted: String,

    #[serde(rename = "LateSubmission")]
    pub late_submission: String,

    /// Extra time allowance in minutes
    #[serde(rename = "ExtraTime")]
    pub extra_time: i64,

    #[serde(rename = "SubmissionField")]
    pub submission_field: String,

    #[serde(rename = "Comments")]
    pub comments: String,

    #[serde(rename = "OriginalFilename")]
    pub original_filename: String,

    /// Name the LMS stored the upload under
    #[serde(rename = "Filename")]
    pub filename: String,

    /// Receipt this record was parsed from; not part of the report
    #[serde(skip)]
    pub receipt_filename: String,

    #[serde(rename = "ExamNumber")]
    pub exam_number: String,

    #[serde(rename = "MatriculationError")]
    pub matriculation_error: String,

    #[serde(rename = "ExamNumberError")]
    pub exam_number_error: String,

    #[serde(rename = "FiletypeError")]
    pub filetype_error: String,

    #[serde(rename = "FilenameError")]
    pub filename_error: String,

    #[serde(rename = "NumberOfPages")]
    pub number_of_pages: String,

    #[serde(rename = "FilesizeMB")]
    pub filesize_mb: f64,

    /// Count of `Original filename:` entries; only the last pair is kept
    #[serde(rename = "NumberOfFiles")]
    pub number_of_files: usize,

    #[serde(rename = "OutputFile")]
    pub output_file: String,

    #[serde(rename = "ToMark")]
    pub to_mark: String,
}

impl Submission {
    /// Report columns in serialisation order
    pub const COLUMNS: [&'static str; 21] = [
        "StudentName",
        "UUN",
        "Assignment",
        "DateSubmittedRaw",
        "DateSubmitted",
        "LateSubmission",
        "ExtraTime",
        "SubmissionField",
        "Comments",
        "OriginalFilename",
        "Filename",
        "ExamNumber",
        "MatriculationError",
        "ExamNumberError",
        "FiletypeError",
        "FilenameError",
        "NumberOfPages",
        "FilesizeMB",
        "NumberOfFiles",
        "OutputFile",
        "ToMark",
    ];

    /// Whether the stored filename failed the PDF check
    pub fn has_filetype_error(&self) -> bool {
        !self.filetype_error.is_empty()
    }
}

/// Batch processing statistics
#[derive(Debug, Default)]
pub struct BatchStats {
    pub files_discovered: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub filetype_errors: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}
