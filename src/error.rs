use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `PureLabel`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum LabelError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Analysis client ──────────────────────────────────────────────────
    #[error("analysis: {0}")]
    Analysis(#[from] AnalysisError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Analysis client errors ──────────────────────────────────────────────────

/// Failures of a single analysis round trip.
///
/// `MissingCredential` is raised before any network I/O. `Service` covers
/// everything the external call can get wrong: transport errors, non-success
/// status, empty replies, and replies that do not decode as an
/// [`AnalysisResult`](crate::analysis::AnalysisResult). The `message` is for
/// the log; the user sees [`AnalysisError::user_message`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("analysis request failed: {message}")]
    Service { message: String },

    #[error("an analysis is already in progress")]
    Busy,
}

impl AnalysisError {
    /// Shorthand for wrapping an underlying cause as a service failure.
    pub fn service(cause: impl std::fmt::Display) -> Self {
        Self::Service {
            message: cause.to_string(),
        }
    }

    /// The fixed string shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredential => {
                "API key not found. Please check your environment configuration."
            }
            Self::Service { .. } => "Failed to analyze ingredients. Please try again.",
            Self::Busy => "An analysis is already in progress. Please wait for it to finish.",
        }
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, LabelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = LabelError::Config(ConfigError::Validation("bad capacity".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn service_error_keeps_cause_out_of_user_message() {
        let err = AnalysisError::service("connection reset by peer");
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(
            err.user_message(),
            "Failed to analyze ingredients. Please try again."
        );
    }

    #[test]
    fn missing_credential_user_message_mentions_configuration() {
        assert!(
            AnalysisError::MissingCredential
                .user_message()
                .contains("environment configuration")
        );
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let label_err: LabelError = anyhow_err.into();
        assert!(label_err.to_string().contains("something went wrong"));
    }
}
