#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod llm;
pub mod media;

pub use analysis::{AdditiveCategory, AnalysisResult, TechnicalTerm, VeganConfidence};
pub use config::Config;
pub use controller::{AnalysisInput, AnalysisState, Controller};
pub use error::{AnalysisError, ConfigError, LabelError, Result};
pub use history::{HistoryItem, HistoryStore, JsonHistoryStore, MAX_HISTORY};
pub use llm::{AnalysisRequest, Analyzer, GeminiAnalyzer, ImageAttachment};
