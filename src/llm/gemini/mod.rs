//! Google Gemini analysis client using structured output
//! (`responseSchema` + `application/json`).
//!
//! One `generateContent` round trip per submission. The reply must decode as
//! an [`AnalysisResult`]; anything else — transport failure, non-success
//! status, empty candidates, shape mismatch — surfaces as
//! [`AnalysisError::Service`] with the cause kept for the log.

use crate::analysis::AnalysisResult;
use crate::error::AnalysisError;
use crate::llm::{AnalysisRequest, Analyzer};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

mod schema;
mod types;

use schema::analysis_schema;
use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model; overridable per invocation via config/CLI.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Low temperature for factual accuracy.
const ANALYSIS_TEMPERATURE: f64 = 0.1;

const SYSTEM_INSTRUCTION_HEADER: &str = "\
You are an expert food scientist and nutritionist assistant.
Your goal is to analyze ingredient labels provided as text or images.

1. Determine if the product is Vegan.
2. Identify common allergens (Nuts, Dairy, Soy, Gluten, Eggs, Fish, Shellfish, etc.).";

const IMAGE_SCAN_PROMPT: &str = "Analyze the ingredients list in this image. \
Ignore branding text if irrelevant to ingredients/dietary info.";

/// Gemini-backed [`Analyzer`].
pub struct GeminiAnalyzer {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiAnalyzer {
    /// Create an analyzer against the production endpoint.
    ///
    /// Credential resolution order:
    /// 1. Explicit API key passed in (config)
    /// 2. `GEMINI_API_KEY` environment variable
    /// 3. `GOOGLE_API_KEY` environment variable
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        let resolved_key = api_key
            .map(String::from)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self::with_base_url(resolved_key, model, DEFAULT_BASE_URL)
    }

    /// Create an analyzer against an explicit endpoint, bypassing environment
    /// credential resolution. Used by tests and self-hosted proxies.
    pub fn with_base_url(api_key: Option<String>, model: &str, base_url: &str) -> Self {
        Self {
            api_key,
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .connect_timeout(Duration::from_secs(10))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn api_key(&self) -> Result<&str, AnalysisError> {
        self.api_key
            .as_deref()
            .ok_or(AnalysisError::MissingCredential)
    }

    fn model_name(&self) -> String {
        if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }

    fn system_instruction(user_allergies: Option<&str>) -> String {
        let allergies = user_allergies.unwrap_or("").trim();
        format!(
            "{SYSTEM_INSTRUCTION_HEADER}\n\
             3. If the user provided specific allergies: \"{allergies}\", check strictly for those as well.\n\
             4. Demystify technical jargon. Find chemical names or E-numbers and explain them in plain English.\n\
             5. Evaluate the healthiness on a scale of 1-10. 10 being natural/unprocessed/healthy, \
             1 being highly processed/unhealthy. Provide a clear explanation for the score.\n\n\
             Return the response in strict JSON format matching the schema provided."
        )
    }

    fn build_request(request: &AnalysisRequest) -> GenerateContentRequest {
        // Image takes precedence: when present, the free text is not sent as
        // the analysis subject.
        let parts = if let Some(image) = &request.image {
            vec![
                Part::inline_data(image.mime_type.clone(), image.data.clone()),
                Part::text(IMAGE_SCAN_PROMPT.to_string()),
            ]
        } else {
            vec![Part::text(format!(
                "Analyze this ingredient list: \"{}\"",
                request.text
            ))]
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(Self::system_instruction(
                    request.user_allergies.as_deref(),
                ))],
            },
            generation_config: GenerationConfig {
                temperature: ANALYSIS_TEMPERATURE,
                response_mime_type: "application/json".to_string(),
                response_schema: analysis_schema(),
            },
        }
    }

    fn extract_text(response: &GenerateContentResponse) -> Result<String, AnalysisError> {
        let text = response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .map(|candidate| {
                let mut out = String::new();
                for part in &candidate.content.parts {
                    if let Some(t) = &part.text {
                        if !out.is_empty() {
                            out.push('\n');
                        }
                        out.push_str(t);
                    }
                }
                out
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AnalysisError::service("no response text received"));
        }

        Ok(text)
    }

    async fn call_api(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self.api_key()?;
        let model_name = self.model_name();
        let url = format!(
            "{}/v1beta/{model_name}:generateContent?key={api_key}",
            self.base_url
        );

        let body = Self::build_request(request);
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(AnalysisError::service)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::service(format!(
                "Gemini API error ({status}): {error_text}"
            )));
        }

        let result: GenerateContentResponse =
            response.json().await.map_err(AnalysisError::service)?;

        if let Some(err) = result.error.as_ref() {
            return Err(AnalysisError::service(format!(
                "Gemini API error: {}",
                err.message
            )));
        }

        let text = Self::extract_text(&result)?;
        let analysis: AnalysisResult = serde_json::from_str(&text).map_err(|err| {
            AnalysisError::service(format!("reply does not match analysis schema: {err}"))
        })?;

        Ok(analysis.clamp_health_rating())
    }
}

impl Analyzer for GeminiAnalyzer {
    fn name(&self) -> &str {
        "gemini"
    }

    fn analyze<'a>(
        &'a self,
        request: &'a AnalysisRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AnalysisResult, AnalysisError>> + Send + 'a>> {
        Box::pin(async move { self.call_api(request).await })
    }
}
