//! Receipt labels, date layouts and validation markers.
//!
//! Labels are matched case-sensitively against the start of each trimmed
//! receipt line.

// Header section labels, in match priority order
pub const NAME_LABEL: &str = "Name:";
pub const ASSIGNMENT_LABEL: &str = "Assignment:";
pub const DATE_SUBMITTED_LABEL: &str = "Date Submitted:";
pub const SUBMISSION_FIELD_LABEL: &str = "Submission Field:";
pub const COMMENTS_LABEL: &str = "Comments:";

/// Sentinel line separating the header from the file listing
pub const FILES_LABEL: &str = "Files:";

// File listing labels
pub const ORIGINAL_FILENAME_LABEL: &str = "Original filename:";
pub const FILENAME_LABEL: &str = "Filename:";

/// Separator between the clock time and the zone abbreviation,
/// e.g. `Monday, 20 April 2020 10:15:30 o'clock BST`
pub const OCLOCK_SEPARATOR: &str = " o'clock ";

/// chrono layout for the date and time part of `Date Submitted:`
pub const RECEIPT_DATE_FORMAT: &str = "%d %B %Y %H:%M:%S";

/// Sortable output layout
pub const SORTABLE_DATE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Marker recorded when the stored filename is not a PDF
pub const NOT_PDF_MARKER: &str = "Not PDF";

/// Default extension of receipt files exported by the LMS
pub const DEFAULT_RECEIPT_EXTENSION: &str = "txt";

/// Output path that selects stdout instead of a file
pub const STDOUT_PATH: &str = "-";
