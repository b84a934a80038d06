//! End-to-end persistence: results produced through the controller survive a
//! process restart (modeled as reopening the store) field for field.

use purelabel::error::AnalysisError;
use purelabel::{
    AdditiveCategory, AnalysisInput, AnalysisRequest, AnalysisResult, Analyzer, Controller,
    HistoryStore, JsonHistoryStore, TechnicalTerm, VeganConfidence,
};
use std::future::Future;
use std::pin::Pin;
use tempfile::TempDir;

struct ScriptedAnalyzer {
    result: AnalysisResult,
}

impl Analyzer for ScriptedAnalyzer {
    fn name(&self) -> &str {
        "scripted"
    }

    fn analyze<'a>(
        &'a self,
        _request: &'a AnalysisRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AnalysisResult, AnalysisError>> + Send + 'a>> {
        let result = self.result.clone();
        Box::pin(async move { Ok(result) })
    }
}

fn rich_result() -> AnalysisResult {
    AnalysisResult {
        is_vegan: false,
        vegan_confidence: VeganConfidence::Medium,
        vegan_reasoning: "Whey protein is milk-derived".into(),
        // Detection order with a deliberate duplicate: both must survive.
        detected_allergens: vec!["Dairy".into(), "Soy".into(), "Dairy".into()],
        technical_terms: vec![
            TechnicalTerm {
                term: "E322".into(),
                explanation: "Lecithin, an emulsifier usually from soy".into(),
                category: AdditiveCategory::Emulsifier,
            },
            TechnicalTerm {
                term: "Tocopherol".into(),
                explanation: "Vitamin E".into(),
                category: AdditiveCategory::Preservative,
            },
        ],
        summary: "A protein bar with dairy and soy.".into(),
        health_rating: 5.75,
        health_rating_explanation: Some("High in added sugar".into()),
    }
}

fn controller_at(dir: &TempDir) -> Controller<JsonHistoryStore> {
    Controller::new(
        Box::new(ScriptedAnalyzer {
            result: rich_result(),
        }),
        JsonHistoryStore::open(dir.path().join("history.json")),
    )
}

#[tokio::test]
async fn analysis_result_survives_reload_field_for_field() {
    let dir = TempDir::new().unwrap();

    let mut controller = controller_at(&dir);
    controller
        .submit(AnalysisInput {
            text: "Whey protein, soy lecithin, sugar".into(),
            image: None,
            user_allergies: None,
        })
        .await
        .unwrap();
    let written = controller.history()[0].clone();
    drop(controller);

    let reloaded = JsonHistoryStore::open(dir.path().join("history.json"));
    assert_eq!(reloaded.items().len(), 1);
    let item = &reloaded.items()[0];

    assert_eq!(item, &written);
    assert_eq!(item.result, rich_result());
    // Ordering and duplicates preserved, rating precision intact.
    assert_eq!(item.result.detected_allergens, vec!["Dairy", "Soy", "Dairy"]);
    assert!((item.result.health_rating - 5.75).abs() < f64::EPSILON);
    assert_eq!(item.label, "\"Whey protein, soy lecithin, su...\"");
}

#[tokio::test]
async fn history_stays_bounded_across_restarts() {
    let dir = TempDir::new().unwrap();

    for round in 0..3 {
        let mut controller = controller_at(&dir);
        for n in 0..4 {
            controller
                .submit(AnalysisInput {
                    text: format!("round {round} submission {n}"),
                    image: None,
                    user_allergies: None,
                })
                .await
                .unwrap();
        }
    }

    let reloaded = JsonHistoryStore::open(dir.path().join("history.json"));
    assert_eq!(reloaded.items().len(), purelabel::MAX_HISTORY);
    assert_eq!(reloaded.items()[0].label, "\"round 2 submission 3\"");
}

#[tokio::test]
async fn clear_removes_the_durable_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let mut controller = controller_at(&dir);
    controller
        .submit(AnalysisInput {
            text: "Sugar".into(),
            image: None,
            user_allergies: None,
        })
        .await
        .unwrap();
    assert!(path.exists());

    controller.clear_history();
    assert!(!path.exists());
    assert!(JsonHistoryStore::open(&path).items().is_empty());
}
