//! Orchestrates one analysis lifecycle: idle → loading → success/error.
//!
//! The controller owns the analyzer seam and the history store; successful
//! analyses are written to history with a derived label, failures store the
//! user-facing message only. Selecting a history entry re-displays its stored
//! result without touching the analyzer.

use crate::analysis::AnalysisResult;
use crate::error::AnalysisError;
use crate::history::{HistoryItem, HistoryStore};
use crate::llm::{AnalysisRequest, Analyzer, ImageAttachment};

/// Visible characters of pasted text kept in a history label.
const LABEL_TEXT_LIMIT: usize = 30;

/// Transient per-session analysis state. Exactly one variant holds at a
/// time; "success with no result" is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Idle,
    Loading,
    Success(AnalysisResult),
    Error(String),
}

/// One submission from the input boundary.
///
/// The boundary guarantees at least one of `text` (non-empty after trimming)
/// or `image` is present before this reaches the controller.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub text: String,
    pub image: Option<ImageAttachment>,
    pub user_allergies: Option<String>,
}

/// Application controller driving the state machine of one session.
pub struct Controller<S: HistoryStore> {
    analyzer: Box<dyn Analyzer>,
    history: S,
    state: AnalysisState,
}

impl<S: HistoryStore> Controller<S> {
    pub fn new(analyzer: Box<dyn Analyzer>, history: S) -> Self {
        Self {
            analyzer,
            history,
            state: AnalysisState::Idle,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn history(&self) -> &[HistoryItem] {
        self.history.items()
    }

    /// Run one analysis round trip.
    ///
    /// A submission while one is already loading is rejected outright with
    /// [`AnalysisError::Busy`]; the in-flight request is neither cancelled
    /// nor superseded and the state is left untouched.
    pub async fn submit(&mut self, input: AnalysisInput) -> Result<&AnalysisState, AnalysisError> {
        if matches!(self.state, AnalysisState::Loading) {
            return Err(AnalysisError::Busy);
        }

        // Re-entrant from success/error: the previous result is discarded,
        // whatever reached history stays there.
        self.state = AnalysisState::Loading;

        let request = AnalysisRequest {
            text: input.text.clone(),
            image: input.image.clone(),
            user_allergies: input.user_allergies.clone(),
        };

        match self.analyzer.analyze(&request).await {
            Ok(result) => {
                self.history.add(result.clone(), derive_label(&input));
                self.state = AnalysisState::Success(result);
            }
            Err(err) => {
                tracing::error!(analyzer = self.analyzer.name(), error = %err, "analysis failed");
                self.state = AnalysisState::Error(err.user_message().to_string());
            }
        }

        Ok(&self.state)
    }

    /// Re-display a stored result. No re-fetch, no re-validation.
    pub fn select_history(&mut self, id: &str) -> Option<&AnalysisState> {
        let result = self
            .history
            .items()
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.result.clone())?;
        self.state = AnalysisState::Success(result);
        Some(&self.state)
    }

    /// Irreversibly empty the history store.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    #[cfg(test)]
    fn force_state(&mut self, state: AnalysisState) {
        self.state = state;
    }
}

/// Human-readable description of the input source for the history list.
fn derive_label(input: &AnalysisInput) -> String {
    if input.image.is_some() {
        return "Image Scan".to_string();
    }
    if input.text.is_empty() {
        // Should not occur given the submission precondition.
        return "Unknown Source".to_string();
    }
    if input.text.chars().count() > LABEL_TEXT_LIMIT {
        let truncated: String = input.text.chars().take(LABEL_TEXT_LIMIT).collect();
        format!("\"{truncated}...\"")
    } else {
        format!("\"{}\"", input.text)
    }
}
