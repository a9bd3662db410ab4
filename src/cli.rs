//! Command-line interface components.

use crate::config::{ParserConfig, PayloadLayout};
use crate::constants::{DEFAULT_RECEIPT_EXTENSION, STDOUT_PATH};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "parselearn")]
#[command(about = "Parse LMS submission receipts into a single CSV report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Receipt file, or directory of receipts
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,

    /// Output CSV file, or - for stdout (defaults to the input path with a .csv extension)
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// Extension of receipt files to pick up from a directory
    #[arg(long, default_value = DEFAULT_RECEIPT_EXTENSION)]
    pub extension: String,

    /// Where Submission Field and Comments text is read from (auto, next-line, inline)
    #[arg(long, default_value = "auto")]
    pub payload: PayloadLayout,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Get the output path, defaulting to the input with its extension replaced by csv
    pub fn get_output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => default_output_path(&self.input_path),
        }
    }

    /// Whether the report goes to stdout instead of a file
    pub fn writes_to_stdout(&self) -> bool {
        self.output_path
            .as_deref()
            .is_some_and(|path| path.as_os_str() == STDOUT_PATH)
    }

    /// Build the parser configuration from the arguments
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::default()
            .with_payload_layout(self.payload)
            .with_receipt_extension(self.extension.as_str())
            .with_progress(!self.quiet)
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn default_output_path(input_path: &Path) -> PathBuf {
    let trimmed = input_path
        .to_string_lossy()
        .trim_end_matches(['/', '\\'])
        .to_string();
    let base = if trimmed.is_empty() || trimmed == "." {
        PathBuf::from("submissions")
    } else {
        PathBuf::from(trimmed)
    };
    base.with_extension("csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_for_directory() {
        let args = Args::parse_from(["parselearn", "exports/week1/"]);
        assert_eq!(args.get_output_path(), PathBuf::from("exports/week1.csv"));
    }

    #[test]
    fn test_default_output_for_file() {
        let args = Args::parse_from(["parselearn", "receipt_s1234567.txt"]);
        assert_eq!(args.get_output_path(), PathBuf::from("receipt_s1234567.csv"));
    }

    #[test]
    fn test_default_output_for_current_directory() {
        let args = Args::parse_from(["parselearn", "."]);
        assert_eq!(args.get_output_path(), PathBuf::from("submissions.csv"));
    }

    #[test]
    fn test_explicit_output_and_config() {
        let args = Args::parse_from([
            "parselearn",
            "exports",
            "-o",
            "report.csv",
            "--extension",
            ".log",
            "--payload",
            "next-line",
            "--quiet",
        ]);

        assert_eq!(args.get_output_path(), PathBuf::from("report.csv"));
        assert_eq!(args.get_log_level(), "warn");

        let config = args.parser_config();
        assert_eq!(config.receipt_extension, "log");
        assert_eq!(config.payload_layout, PayloadLayout::NextLine);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_extension_defaults_to_receipt_extension() {
        let args = Args::parse_from(["parselearn", "exports"]);
        assert_eq!(args.extension, DEFAULT_RECEIPT_EXTENSION);
        assert_eq!(args.parser_config().receipt_extension, DEFAULT_RECEIPT_EXTENSION);
    }

    #[test]
    fn test_dash_output_selects_stdout() {
        let args = Args::parse_from(["parselearn", "exports", "-o", "-"]);
        assert!(args.writes_to_stdout());

        let args = Args::parse_from(["parselearn", "exports", "-o", "report.csv"]);
        assert!(!args.writes_to_stdout());

        let args = Args::parse_from(["parselearn", "exports"]);
        assert!(!args.writes_to_stdout());
    }

    #[test]
    fn test_invalid_payload_rejected() {
        let result = Args::try_parse_from(["parselearn", "exports", "--payload", "sideways"]);
        assert!(result.is_err());
    }
}
