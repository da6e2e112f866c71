//! File types.

use super::common::flexible_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What an uploaded file is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePurpose {
    /// Training data for fine-tuning.
    #[serde(rename = "fine-tune")]
    FineTune,
    /// Input for batch jobs.
    Batch,
    /// Documents for OCR.
    Ocr,
}

impl FilePurpose {
    /// Wire name of the purpose.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FineTune => "fine-tune",
            Self::Batch => "batch",
            Self::Ocr => "ocr",
        }
    }
}

impl std::fmt::Display for FilePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    /// File identifier.
    pub id: String,
    /// Object type (always "file").
    #[serde(default)]
    pub object: String,
    /// Size in bytes.
    #[serde(default)]
    pub bytes: u64,
    /// Upload time.
    #[serde(with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Original file name.
    #[serde(default)]
    pub filename: String,
    /// Purpose given at upload.
    #[serde(default)]
    pub purpose: String,
}

/// A list of files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileList {
    /// Object type (always "list").
    #[serde(default)]
    pub object: String,
    /// Files.
    pub data: Vec<File>,
}
