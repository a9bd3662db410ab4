//! Receipt discovery for batch processing
//!
//! Finds receipt files under an input directory. LMS exports usually drop
//! one receipt per student into a flat folder, but nested folders (one per
//! assignment, say) are walked as well.

use crate::error::{ReceiptError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Receipt file discovery
#[derive(Debug)]
pub struct ReceiptDiscovery {
    input_path: PathBuf,
    extension: String,
}

impl ReceiptDiscovery {
    /// Create a new discovery instance for receipts with the given extension
    pub fn new(input_path: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            input_path,
            extension: extension.into(),
        }
    }

    /// Discover receipt files, sorted by path.
    ///
    /// A file input is returned as-is regardless of its extension.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.input_path.exists() {
            return Err(ReceiptError::InputNotFound {
                path: self.input_path.clone(),
            });
        }

        if self.input_path.is_file() {
            return Ok(vec![self.input_path.clone()]);
        }

        debug!("Searching for receipts in: {}", self.input_path.display());

        let mut receipts = Vec::new();
        for entry in WalkDir::new(&self.input_path).follow_links(true) {
            let entry = entry.map_err(|source| ReceiptError::Discovery {
                path: self.input_path.clone(),
                source,
            })?;

            if entry.file_type().is_file() && is_receipt_file(entry.path(), &self.extension) {
                receipts.push(entry.into_path());
            }
        }

        receipts.sort();
        debug!("Found {} receipts", receipts.len());

        Ok(receipts)
    }
}

/// Check whether a path carries the receipt extension (case-insensitive)
fn is_receipt_file(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a receipt export folder
    fn create_test_export(temp_dir: &TempDir) -> PathBuf {
        let export_path = temp_dir.path().join("export");
        let nested_path = export_path.join("resit");
        fs::create_dir_all(&nested_path).unwrap();

        fs::write(export_path.join("b_s0000002.txt"), "Name: B (s2)").unwrap();
        fs::write(export_path.join("a_s0000001.TXT"), "Name: A (s1)").unwrap();
        fs::write(nested_path.join("c_s0000003.txt"), "Name: C (s3)").unwrap();

        // Uploaded attachments sit alongside the receipts and are ignored
        fs::write(export_path.join("a_s0000001_exam.pdf"), "%PDF").unwrap();
        fs::write(export_path.join("notes"), "no extension").unwrap();

        export_path
    }

    #[test]
    fn test_discover_receipts_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let export_path = create_test_export(&temp_dir);

        let files = ReceiptDiscovery::new(export_path.clone(), "txt")
            .discover()
            .unwrap();

        assert_eq!(
            files,
            vec![
                export_path.join("a_s0000001.TXT"),
                export_path.join("b_s0000002.txt"),
                export_path.join("resit").join("c_s0000003.txt"),
            ]
        );
    }

    #[test]
    fn test_discover_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let files = ReceiptDiscovery::new(temp_dir.path().to_path_buf(), "txt")
            .discover()
            .unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let receipt = temp_dir.path().join("receipt.log");
        fs::write(&receipt, "Name: A (s1)").unwrap();

        let files = ReceiptDiscovery::new(receipt.clone(), "txt")
            .discover()
            .unwrap();

        assert_eq!(files, vec![receipt]);
    }

    #[test]
    fn test_discover_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        match ReceiptDiscovery::new(missing.clone(), "txt").discover() {
            Err(ReceiptError::InputNotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected InputNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_is_receipt_file() {
        assert!(is_receipt_file(Path::new("receipt.txt"), "txt"));
        assert!(is_receipt_file(Path::new("/path/to/receipt.TXT"), "txt"));
        assert!(!is_receipt_file(Path::new("receipt.pdf"), "txt"));
        assert!(!is_receipt_file(Path::new("receipt"), "txt"));
        assert!(!is_receipt_file(Path::new("receipt.txt.bak"), "txt"));
    }
}
