//! Terminal rendering of analysis results and the history list.

use crate::analysis::AnalysisResult;
use crate::history::HistoryItem;
use chrono::{DateTime, Local};
use console::style;

pub fn render_result(result: &AnalysisResult) {
    println!();
    if result.is_vegan {
        println!(
            "{}  {}",
            style("VEGAN").green().bold(),
            style(format!("({} confidence)", result.vegan_confidence)).dim()
        );
    } else {
        println!(
            "{}  {}",
            style("NOT VEGAN").red().bold(),
            style(format!("({} confidence)", result.vegan_confidence)).dim()
        );
    }
    println!("{}", result.vegan_reasoning);

    println!();
    println!("{}", style("Allergens").bold().underlined());
    if result.detected_allergens.is_empty() {
        println!("{}", style("None detected").green());
    } else {
        for allergen in &result.detected_allergens {
            println!("  {} {}", style("!").yellow().bold(), allergen);
        }
    }

    if !result.technical_terms.is_empty() {
        println!();
        println!("{}", style("Decoded ingredients").bold().underlined());
        for term in &result.technical_terms {
            println!(
                "  {} {} — {}",
                style(&term.term).cyan().bold(),
                style(format!("[{}]", term.category)).dim(),
                term.explanation
            );
        }
    }

    println!();
    println!("{}", style("Health score").bold().underlined());
    let score = format!("{}/10", trim_rating(result.health_rating));
    println!(
        "  {}",
        match health_bucket(result.health_rating) {
            HealthBucket::Good => style(score).green().bold(),
            HealthBucket::Middling => style(score).yellow().bold(),
            HealthBucket::Poor => style(score).red().bold(),
        }
    );
    if let Some(explanation) = &result.health_rating_explanation {
        println!("  {explanation}");
    }

    println!();
    println!("{}", result.summary);
}

pub fn render_failure(message: &str) {
    eprintln!();
    eprintln!("{} {message}", style("Analysis Failed:").red().bold());
}

pub fn render_history(items: &[HistoryItem]) {
    if items.is_empty() {
        println!("No history yet. Run `purelabel analyze` first.");
        return;
    }

    println!("{}", style("Recent scans (newest first)").bold());
    for (position, item) in items.iter().enumerate() {
        let verdict = if item.result.is_vegan {
            style("vegan").green()
        } else {
            style("not vegan").red()
        };
        println!(
            "  {:>2}. {}  {}  {}",
            position + 1,
            style(format_timestamp(item.timestamp)).dim(),
            item.label,
            verdict
        );
    }
    println!(
        "{}",
        style("Use `purelabel history show <N>` to re-display an entry.").dim()
    );
}

#[derive(Debug, PartialEq, Eq)]
enum HealthBucket {
    Good,
    Middling,
    Poor,
}

fn health_bucket(rating: f64) -> HealthBucket {
    if rating >= 7.0 {
        HealthBucket::Good
    } else if rating >= 4.0 {
        HealthBucket::Middling
    } else {
        HealthBucket::Poor
    }
}

/// Drop a trailing `.0` so whole scores read as integers.
fn trim_rating(rating: f64) -> String {
    if (rating - rating.trunc()).abs() < f64::EPSILON {
        format!("{rating:.0}")
    } else {
        format!("{rating}")
    }
}

fn format_timestamp(epoch_millis: i64) -> String {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown time".to_string())
}
