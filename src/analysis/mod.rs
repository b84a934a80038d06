//! Domain types for one ingredient-label verdict.
//!
//! The wire shape (camelCase field names, enum value sets, which fields are
//! required) is the contract with the structured-generation service and with
//! the persisted history file, so it is fixed here once and reused for both.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Confidence level of the vegan assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum VeganConfidence {
    High,
    Medium,
    Low,
}

/// Category of a decoded additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum AdditiveCategory {
    Preservative,
    Colorant,
    Flavor,
    Emulsifier,
    Other,
}

/// One decoded jargon entry (chemical name or E-number) within a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalTerm {
    pub term: String,
    pub explanation: String,
    pub category: AdditiveCategory,
}

/// The structured verdict returned for one ingredient submission.
///
/// Produced by the analysis client, consumed everywhere else; immutable once
/// built. `detected_allergens` keeps detection order and permits duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_vegan: bool,
    pub vegan_confidence: VeganConfidence,
    pub vegan_reasoning: String,
    pub detected_allergens: Vec<String>,
    pub technical_terms: Vec<TechnicalTerm>,
    pub summary: String,
    pub health_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_rating_explanation: Option<String>,
}

/// Documented range of `health_rating`.
pub const HEALTH_RATING_RANGE: std::ops::RangeInclusive<f64> = 1.0..=10.0;

impl AnalysisResult {
    /// Clamp `health_rating` into its documented 1–10 range.
    ///
    /// The producer does not enforce the range, so the client applies this
    /// once on receipt. Out-of-range values are logged and clamped rather
    /// than rejected.
    pub fn clamp_health_rating(mut self) -> Self {
        if !HEALTH_RATING_RANGE.contains(&self.health_rating) {
            let clamped = self
                .health_rating
                .clamp(*HEALTH_RATING_RANGE.start(), *HEALTH_RATING_RANGE.end());
            tracing::warn!(
                received = self.health_rating,
                clamped,
                "health rating out of range, clamping"
            );
            self.health_rating = clamped;
        }
        self
    }
}
