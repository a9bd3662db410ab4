//! Integration tests for the processor module
//!
//! Runs complete batches over receipt exports written to temporary folders.

pub mod multi_file;

use std::fs;
use std::path::Path;

/// Write a receipt in the layout the LMS exports
pub(crate) fn write_receipt(dir: &Path, uun: &str, attachments: &[&str]) {
    let mut receipt = format!(
        "Name: Student {uun} ({uun})\n\
         Assignment: Practice Exam Drop Box\n\
         Date Submitted: Monday, 20 April 2020 10:15:30 o'clock BST\n\
         Current Mark: Needs Marking\n\
         \n\
         Submission Field:\n\
         There is no student submission text data for this assignment.\n\
         \n\
         Comments:\n\
         There are no student comments for this assignment.\n\
         \n\
         Files:\n"
    );
    for attachment in attachments {
        receipt.push_str(&format!(
            "\tOriginal filename: {attachment}\n\
             \tFilename: Practice Exam Drop Box_{uun}_attempt_2020-04-20-10-15-30_{attachment}\n"
        ));
    }

    fs::write(dir.join(format!("{uun}.txt")), receipt).unwrap();
}
