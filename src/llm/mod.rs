//! Analysis client: one external round trip to a structured-generation
//! service, decoded and validated into an [`AnalysisResult`].

pub mod gemini;

pub use gemini::GeminiAnalyzer;

use crate::analysis::AnalysisResult;
use crate::error::AnalysisError;
use std::future::Future;
use std::pin::Pin;

/// Inline image bytes, already base64-encoded, with their declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub data: String,
    pub mime_type: String,
}

/// One analysis submission.
///
/// At least one of `text` (non-empty after trimming) or `image` must be
/// present; the input boundary enforces this before the client is invoked.
/// When an image is supplied it takes precedence — the free text is not sent
/// as the analysis subject.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub text: String,
    pub image: Option<ImageAttachment>,
    pub user_allergies: Option<String>,
}

/// Seam between the controller and the external service.
///
/// Implementations perform exactly one round trip per call: no retries, no
/// caching, no deduplication of identical requests.
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &str;

    fn analyze<'a>(
        &'a self,
        request: &'a AnalysisRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AnalysisResult, AnalysisError>> + Send + 'a>>;
}
