//! Moderation types.

use super::common::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request to moderate raw texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationRequest {
    /// Texts to classify.
    pub input: Vec<String>,
    /// Moderation model.
    pub model: String,
}

/// Request to moderate a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatModerationRequest {
    /// Conversation to classify.
    pub input: Vec<Message>,
    /// Moderation model.
    pub model: String,
}

/// Response from the moderation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResponse {
    /// Response identifier.
    #[serde(default)]
    pub id: String,
    /// Model used.
    #[serde(default)]
    pub model: String,
    /// One result per input.
    pub results: Vec<ModerationResult>,
}

impl ModerationResponse {
    /// Whether any input was flagged in any category.
    pub fn any_flagged(&self) -> bool {
        self.results.iter().any(ModerationResult::is_flagged)
    }
}

/// Moderation verdict for one input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModerationResult {
    /// Category name to verdict.
    #[serde(default)]
    pub categories: HashMap<String, bool>,
    /// Category name to score.
    #[serde(default)]
    pub category_scores: HashMap<String, f32>,
}

impl ModerationResult {
    /// Whether any category is flagged.
    pub fn is_flagged(&self) -> bool {
        self.categories.values().any(|flagged| *flagged)
    }

    /// Names of flagged categories, sorted.
    pub fn flagged_categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .categories
            .iter()
            .filter(|(_, flagged)| **flagged)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}
