//! Receipts listing more than one attachment

use super::write_receipt;
use crate::config::ParserConfig;
use crate::constants::NOT_PDF_MARKER;
use crate::processor::BatchProcessor;
use tempfile::TempDir;

#[test]
fn test_multiple_attachments_are_counted_not_listed() {
    let temp_dir = TempDir::new().unwrap();
    write_receipt(
        temp_dir.path(),
        "s0000001",
        &["page1.jpg", "page2.jpg", "final.pdf"],
    );

    let processor = BatchProcessor::new(ParserConfig::default()).unwrap();
    let (submissions, failed) =
        processor.parse_receipts(&[temp_dir.path().join("s0000001.txt")]);

    assert_eq!(failed, 0);
    let submission = &submissions[0];
    assert_eq!(submission.number_of_files, 3);
    assert_eq!(submission.original_filename, "final.pdf");
    assert!(submission.filename.ends_with("_final.pdf"));
    assert!(submission.filetype_error.is_empty());
}

#[test]
fn test_last_attachment_decides_filetype_error() {
    let temp_dir = TempDir::new().unwrap();
    write_receipt(temp_dir.path(), "s0000001", &["final.pdf", "notes.txt"]);

    let processor = BatchProcessor::new(ParserConfig::default()).unwrap();
    let (submissions, _) = processor.parse_receipts(&[temp_dir.path().join("s0000001.txt")]);

    assert_eq!(submissions[0].number_of_files, 2);
    assert_eq!(submissions[0].filetype_error, NOT_PDF_MARKER);
}

#[test]
fn test_receipt_without_attachments() {
    let temp_dir = TempDir::new().unwrap();
    write_receipt(temp_dir.path(), "s0000001", &[]);

    let processor = BatchProcessor::new(ParserConfig::default()).unwrap();
    let (submissions, _) = processor.parse_receipts(&[temp_dir.path().join("s0000001.txt")]);

    assert_eq!(submissions[0].number_of_files, 0);
    assert!(submissions[0].original_filename.is_empty());
    assert!(submissions[0].filename.is_empty());
    assert!(submissions[0].filetype_error.is_empty());
}
