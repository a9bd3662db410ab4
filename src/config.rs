//! Configuration for receipt parsing and batch discovery.

use crate::constants::DEFAULT_RECEIPT_EXTENSION;
use crate::error::{ReceiptError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the payload of `Submission Field:` and `Comments:` is read from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadLayout {
    /// Inline text if the label line carries any, otherwise the next line
    #[default]
    Auto,
    /// Always consume the line after the label
    NextLine,
    /// Only the remainder of the label line
    Inline,
}

impl FromStr for PayloadLayout {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "next-line" | "nextline" => Ok(Self::NextLine),
            "inline" => Ok(Self::Inline),
            other => Err(ReceiptError::Configuration {
                message: format!(
                    "Unknown payload layout '{}' (expected auto, next-line or inline)",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for PayloadLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::NextLine => write!(f, "next-line"),
            Self::Inline => write!(f, "inline"),
        }
    }
}

/// Parser and discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Payload convention for multi-line labels
    pub payload_layout: PayloadLayout,

    /// Extension of receipt files picked up during directory discovery
    pub receipt_extension: String,

    /// Show a progress bar while parsing a batch
    pub show_progress: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            payload_layout: PayloadLayout::Auto,
            receipt_extension: DEFAULT_RECEIPT_EXTENSION.to_string(),
            show_progress: false,
        }
    }
}

impl ParserConfig {
    pub fn with_payload_layout(mut self, payload_layout: PayloadLayout) -> Self {
        self.payload_layout = payload_layout;
        self
    }

    /// Set the receipt extension; a leading dot is ignored
    pub fn with_receipt_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.receipt_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Reject settings that would make discovery meaningless
    pub fn validate(&self) -> Result<()> {
        if self.receipt_extension.trim().is_empty() {
            return Err(ReceiptError::Configuration {
                message: "Receipt extension must not be empty".to_string(),
            });
        }

        if self.receipt_extension.contains(['/', '\\']) {
            return Err(ReceiptError::Configuration {
                message: format!(
                    "Receipt extension '{}' must not contain path separators",
                    self.receipt_extension
                ),
            });
        }

        Ok(())
    }
}
