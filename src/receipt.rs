//! Submission receipt parsing.
//!
//! A receipt is a short text export written by the LMS after an upload:
//!
//! ```text
//! Name: First Last (sxxxxxxx)
//! Assignment: Practice Exam Drop Box
//! Date Submitted: Monday, dd April yyyy hh:mm:ss o'clock BST
//! Current Mark: Needs Marking
//!
//! Submission Field:
//! There is no student submission text data for this assignment.
//!
//! Comments:
//! There are no student comments for this assignment.
//!
//! Files:
//!     Original filename: OnlineExam-Bxxxxxx.pdf
//!     Filename: Practice Exam Drop Box_sxxxxxxx_attempt_..._OnlineExam-Bxxxxxx.pdf
//! ```
//!
//! The scan is a single forward pass with two states separated by the
//! `Files:` sentinel. Each state owns a priority-ordered label table; lines
//! matching no label are skipped, so missing or garbled sections simply leave
//! their fields empty.

use crate::config::{ParserConfig, PayloadLayout};
use crate::constants::{
    ASSIGNMENT_LABEL, COMMENTS_LABEL, DATE_SUBMITTED_LABEL, FILENAME_LABEL, FILES_LABEL,
    NAME_LABEL, NOT_PDF_MARKER, OCLOCK_SEPARATOR, ORIGINAL_FILENAME_LABEL, RECEIPT_DATE_FORMAT,
    SORTABLE_DATE_FORMAT, SUBMISSION_FIELD_LABEL,
};
use crate::error::{ReceiptError, Result};
use crate::models::Submission;
use chrono::{NaiveDateTime, Weekday};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static PDF_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.pdf$").expect("static regex is valid"));

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Header,
    Files,
}

/// What a header label does once matched
#[derive(Clone, Copy)]
enum HeaderAction {
    /// Value is the remainder of the label line
    Field(fn(&str, &mut Submission)),
    /// Value may live on the following line
    Payload(fn(String, &mut Submission)),
    /// `Files:` sentinel
    EndOfHeader,
}

const HEADER_LABELS: &[(&str, HeaderAction)] = &[
    (NAME_LABEL, HeaderAction::Field(process_name)),
    (ASSIGNMENT_LABEL, HeaderAction::Field(process_assignment)),
    (DATE_SUBMITTED_LABEL, HeaderAction::Field(process_date_submitted)),
    (SUBMISSION_FIELD_LABEL, HeaderAction::Payload(process_submission_field)),
    (COMMENTS_LABEL, HeaderAction::Payload(process_comments)),
    (FILES_LABEL, HeaderAction::EndOfHeader),
];

const FILE_LABELS: &[(&str, fn(&str, &mut Submission))] = &[
    (ORIGINAL_FILENAME_LABEL, process_original_filename),
    (FILENAME_LABEL, process_filename),
];

/// Line-oriented receipt parser
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    config: ParserConfig,
}

impl ReceiptParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse the receipt stored at `path`
    pub fn parse_file(&self, path: &Path) -> Result<Submission> {
        let file = File::open(path).map_err(|source| ReceiptError::ReceiptRead {
            path: path.to_path_buf(),
            source,
        })?;

        let submission = self
            .scan(BufReader::new(file))
            .map_err(|(partial, source)| ReceiptError::ScanInterrupted {
                path: Some(path.to_path_buf()),
                partial: Box::new(partial),
                source,
            })?;

        debug!(
            "Parsed receipt {}: uun={}, files={}",
            path.display(),
            submission.uun,
            submission.number_of_files
        );

        Ok(submission)
    }

    /// Parse a receipt from any buffered source
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Submission> {
        self.scan(reader)
            .map_err(|(partial, source)| ReceiptError::ScanInterrupted {
                path: None,
                partial: Box::new(partial),
                source,
            })
    }

    /// Scan to the end of input. On a read failure the fields gathered so
    /// far come back alongside the error.
    fn scan<R: BufRead>(
        &self,
        reader: R,
    ) -> std::result::Result<Submission, (Submission, io::Error)> {
        let mut submission = Submission::default();
        match self.scan_into(reader, &mut submission) {
            Ok(()) => Ok(submission),
            Err(e) => Err((submission, e)),
        }
    }

    fn scan_into<R: BufRead>(&self, reader: R, submission: &mut Submission) -> io::Result<()> {
        let mut state = ScanState::Header;
        let mut lines = lossy_lines(reader);

        while let Some(line) = lines.next() {
            let line = line?;
            let line = line.trim();

            state = match state {
                ScanState::Header => self.scan_header_line(line, &mut lines, submission)?,
                ScanState::Files => {
                    scan_file_line(line, submission);
                    ScanState::Files
                }
            };
        }

        Ok(())
    }

    fn scan_header_line<I>(
        &self,
        line: &str,
        lines: &mut I,
        submission: &mut Submission,
    ) -> io::Result<ScanState>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let Some((label, action)) = HEADER_LABELS
            .iter()
            .find(|(label, _)| line.starts_with(label))
        else {
            return Ok(ScanState::Header);
        };

        let rest = line[label.len()..].trim();

        match action {
            HeaderAction::Field(handler) => handler(rest, submission),
            HeaderAction::Payload(handler) => {
                let payload = self.read_payload(rest, lines)?;
                handler(payload, submission);
            }
            HeaderAction::EndOfHeader => return Ok(ScanState::Files),
        }

        Ok(ScanState::Header)
    }

    /// Resolve the payload of a label whose value may sit on the next line.
    /// The next line is consumed whole, whatever it contains.
    fn read_payload<I>(&self, inline: &str, lines: &mut I) -> io::Result<String>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let take_next_line = match self.config.payload_layout {
            PayloadLayout::Auto => inline.is_empty(),
            PayloadLayout::NextLine => true,
            PayloadLayout::Inline => false,
        };

        if !take_next_line {
            return Ok(inline.to_string());
        }

        Ok(lines
            .next()
            .transpose()?
            .map(|next| next.trim().to_string())
            .unwrap_or_default())
    }
}

/// Split on `\n` and decode each line lossily, so stray non-UTF-8 bytes
/// become U+FFFD instead of failing the scan
fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader
        .split(b'\n')
        .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}

/// Parse a receipt file with default settings
pub fn parse_receipt(path: &Path) -> Result<Submission> {
    ReceiptParser::default().parse_file(path)
}

fn scan_file_line(line: &str, submission: &mut Submission) {
    if let Some((label, handler)) = FILE_LABELS
        .iter()
        .find(|(label, _)| line.starts_with(label))
    {
        handler(line[label.len()..].trim(), submission);
    }
}

/// `Name: First Last (sxxxxxxx)`
fn process_name(rest: &str, submission: &mut Submission) {
    match (rest.find('('), rest.find(')')) {
        (Some(open), Some(close)) if open < close => {
            submission.student_name = rest[..open].trim().to_string();
            submission.uun = rest[open + 1..close].trim().to_uppercase();
        }
        _ => {
            debug!("Name line without bracketed identifier: {}", rest);
            submission.student_name = rest.to_string();
        }
    }
}

fn process_assignment(rest: &str, submission: &mut Submission) {
    submission.assignment = rest.to_string();
}

fn process_date_submitted(rest: &str, submission: &mut Submission) {
    submission.date_submitted_raw = rest.to_string();
    submission.date_submitted = normalise_submission_date(rest).unwrap_or_else(|| {
        debug!("Unparseable submission date: {}", rest);
        String::new()
    });
}

fn process_submission_field(payload: String, submission: &mut Submission) {
    submission.submission_field = payload;
}

fn process_comments(payload: String, submission: &mut Submission) {
    submission.comments = payload;
}

fn process_original_filename(rest: &str, submission: &mut Submission) {
    submission.original_filename = rest.to_string();
    submission.number_of_files += 1;
}

fn process_filename(rest: &str, submission: &mut Submission) {
    submission.filename = rest.to_string();
    submission.filetype_error = if is_pdf_filename(rest) {
        String::new()
    } else {
        NOT_PDF_MARKER.to_string()
    };
}

/// Case-insensitive `.pdf` suffix check
pub fn is_pdf_filename(filename: &str) -> bool {
    PDF_EXTENSION.is_match(filename)
}

/// Convert `Monday, 20 April 2020 10:15:30 o'clock BST` into
/// `2020-04-20-10-15-30`.
///
/// The weekday must be a weekday name but is not checked against the date.
/// The zone abbreviation is required and otherwise ignored.
pub fn normalise_submission_date(raw: &str) -> Option<String> {
    let (weekday, rest) = raw.split_once(',')?;
    weekday.trim().parse::<Weekday>().ok()?;

    let (timestamp, zone) = rest.split_once(OCLOCK_SEPARATOR)?;
    let zone = zone.trim();
    if zone.is_empty() || zone.contains(char::is_whitespace) {
        return None;
    }

    let parsed = NaiveDateTime::parse_from_str(timestamp.trim(), RECEIPT_DATE_FORMAT).ok()?;
    Some(parsed.format(SORTABLE_DATE_FORMAT).to_string())
}
