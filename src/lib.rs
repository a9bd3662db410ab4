//! parselearn
//!
//! Parses the plain-text submission receipts an LMS writes after each
//! assignment upload and aggregates them into one CSV report.
//!
//! This library provides tools for:
//! - Scanning a receipt into a [`Submission`] with tolerant, label-driven parsing
//! - Normalising submission timestamps into a sortable form
//! - Flagging non-PDF attachments
//! - Discovering receipts in an export folder and writing a batch report

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;
pub mod receipt;
pub mod writer;

pub use config::{ParserConfig, PayloadLayout};
pub use error::{ReceiptError, Result};
pub use models::{BatchStats, Submission};
pub use processor::BatchProcessor;
pub use receipt::{ReceiptParser, parse_receipt};
pub use writer::{SubmissionWriter, write_submissions, write_submissions_to_csv};
