//! Response schema sent with every analysis request.
//!
//! Mirrors the wire shape of [`AnalysisResult`](crate::analysis::AnalysisResult)
//! field for field; the service is required to return JSON conforming to it.
//! Everything is mandatory except `healthRatingExplanation`.

use serde_json::{Value, json};

pub(super) fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "isVegan": {
                "type": "BOOLEAN",
                "description": "Whether the product is vegan based on ingredients."
            },
            "veganConfidence": {
                "type": "STRING",
                "enum": ["High", "Medium", "Low"],
                "description": "Confidence level of the vegan assessment."
            },
            "veganReasoning": {
                "type": "STRING",
                "description": "Explanation for why it is or isn't vegan (e.g., 'Contains milk powder')."
            },
            "detectedAllergens": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of common allergens found (e.g., Peanuts, Soy, Gluten, Shellfish)."
            },
            "technicalTerms": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "term": {
                            "type": "STRING",
                            "description": "The technical ingredient name (e.g., Tocopherol)."
                        },
                        "explanation": {
                            "type": "STRING",
                            "description": "Simple explanation of what it is (e.g., Vitamin E)."
                        },
                        "category": {
                            "type": "STRING",
                            "enum": ["Preservative", "Colorant", "Flavor", "Emulsifier", "Other"],
                            "description": "Category of the additive."
                        }
                    },
                    "required": ["term", "explanation", "category"]
                },
                "description": "List of complex technical ingredients explained simply."
            },
            "summary": {
                "type": "STRING",
                "description": "A brief, friendly summary of the product suitable for a shopper."
            },
            "healthRating": {
                "type": "NUMBER",
                "description": "A score from 1 to 10 indicating general healthiness based on processed level."
            },
            "healthRatingExplanation": {
                "type": "STRING",
                "description": "A specific explanation of factors contributing to the health score."
            }
        },
        "required": [
            "isVegan",
            "veganConfidence",
            "veganReasoning",
            "detectedAllergens",
            "technicalTerms",
            "summary",
            "healthRating"
        ]
    })
}
