//! OCR types.

use super::common::Usage;
use serde::{Deserialize, Serialize};

/// Request to extract text from uploaded images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrRequest {
    /// OCR model.
    pub model: String,
    /// IDs of uploaded image files.
    pub files: Vec<String>,
    /// Languages to detect; empty lets the model decide.
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Handle of an asynchronous OCR job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrJob {
    /// Job identifier.
    pub job_id: String,
}

/// Response from the OCR endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResponse {
    /// Response identifier.
    #[serde(default)]
    pub id: String,
    /// Object type.
    #[serde(default)]
    pub object: String,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,
    /// Model used.
    #[serde(default)]
    pub model: String,
    /// One result per file.
    #[serde(default)]
    pub results: Vec<OcrResult>,
    /// Token usage.
    #[serde(default)]
    pub usage: Usage,
}

/// Text extracted from one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Source file.
    pub file_id: String,
    /// Full extracted text.
    #[serde(default)]
    pub text: String,
    /// Detected language.
    #[serde(default)]
    pub language: String,
    /// Positioned text blocks.
    #[serde(default)]
    pub blocks: Vec<OcrBlock>,
}

/// A block of text with its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrBlock {
    /// Block text.
    pub text: String,
    /// Recognition confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f32,
    /// Position in the image.
    pub bounding_box: BoundingBox,
}

/// Rectangle in image coordinates, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}
