//! Confidence classification for suggested mappings.

use serde::{Deserialize, Serialize};

/// Default score at or above which a suggestion is shown as verified.
pub const DEFAULT_REVIEW_THRESHOLD: f32 = 0.7;

/// How a mapping is presented for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// Below the threshold: the user should check this mapping.
    NeedsReview,
    /// At or above the threshold.
    Verified,
}

impl ConfidenceLevel {
    /// Short label for the level.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NeedsReview => "needs review",
            Self::Verified => "verified",
        }
    }

    /// Explanatory note shown next to mappings that need review.
    #[must_use]
    pub fn note(&self) -> Option<&'static str> {
        match self {
            Self::NeedsReview => {
                Some("This match is uncertain. Check that the column holds what the field expects.")
            }
            Self::Verified => None,
        }
    }
}

/// Fixed threshold separating verified from needs-review suggestions.
///
/// Set once when the engine is configured; not adjustable per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceThreshold(f32);

impl Default for ConfidenceThreshold {
    fn default() -> Self {
        Self(DEFAULT_REVIEW_THRESHOLD)
    }
}

impl ConfidenceThreshold {
    /// Creates a threshold. Returns `None` outside `[0, 1]`.
    #[must_use]
    pub fn new(value: f32) -> Option<Self> {
        (0.0..=1.0).contains(&value).then_some(Self(value))
    }

    /// Returns the threshold value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Categorizes a confidence score.
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> ConfidenceLevel {
        if confidence >= self.0 {
            ConfidenceLevel::Verified
        } else {
            ConfidenceLevel::NeedsReview
        }
    }
}
