//! Command dispatch: wires the CLI surface to the controller, the Gemini
//! analyzer and the JSON history store.

mod render;

use crate::cli::{Cli, Commands, HistoryCommands};
use crate::config::Config;
use crate::controller::{AnalysisInput, AnalysisState, Controller};
use crate::history::{HistoryStore, JsonHistoryStore};
use crate::llm::GeminiAnalyzer;
use crate::media;
use anyhow::Result;
use console::style;
use std::path::PathBuf;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            text,
            image,
            allergies,
            model,
        } => analyze(&config, text, image, allergies, model).await,
        Commands::History { history_command } => match history_command {
            HistoryCommands::List => history_list(&config),
            HistoryCommands::Show { entry } => history_show(&config, &entry),
            HistoryCommands::Clear { yes } => history_clear(&config, yes),
        },
    }
}

fn open_store(config: &Config) -> JsonHistoryStore {
    JsonHistoryStore::with_capacity(config.resolved_history_path(), config.max_history)
}

fn build_controller(config: &Config, model: Option<&str>) -> Controller<JsonHistoryStore> {
    let model = model.unwrap_or(&config.model);
    let analyzer = GeminiAnalyzer::new(config.api_key.as_deref(), model);
    Controller::new(Box::new(analyzer), open_store(config))
}

async fn analyze(
    config: &Config,
    text: Option<String>,
    image: Option<PathBuf>,
    allergies: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let text = text.unwrap_or_default();
    let attachment = image.as_deref().map(media::load_image).transpose()?;

    // Input boundary: an empty submission never reaches the client.
    if attachment.is_none() && text.trim().is_empty() {
        anyhow::bail!("nothing to analyze: pass ingredient text or --image <PATH>");
    }

    let mut controller = build_controller(config, model.as_deref());

    eprintln!("{}", style("Analyzing ingredients...").dim());
    let state = controller
        .submit(AnalysisInput {
            text,
            image: attachment,
            user_allergies: allergies,
        })
        .await?;

    match state {
        AnalysisState::Success(result) => {
            render::render_result(result);
            Ok(())
        }
        AnalysisState::Error(message) => {
            render::render_failure(message);
            std::process::exit(1);
        }
        AnalysisState::Idle | AnalysisState::Loading => unreachable!("submit always settles"),
    }
}

fn history_list(config: &Config) -> Result<()> {
    let store = open_store(config);
    render::render_history(store.items());
    Ok(())
}

fn history_show(config: &Config, entry: &str) -> Result<()> {
    let mut controller = build_controller(config, None);

    // Accept a 1-based list position or a raw id.
    let id = match entry.parse::<usize>() {
        Ok(position) if position >= 1 => controller
            .history()
            .get(position - 1)
            .map(|item| item.id.clone())
            .ok_or_else(|| anyhow::anyhow!("no history entry at position {position}"))?,
        _ => entry.to_string(),
    };

    match controller.select_history(&id) {
        Some(AnalysisState::Success(result)) => {
            render::render_result(result);
            Ok(())
        }
        _ => anyhow::bail!("no history entry matches {entry:?}"),
    }
}

fn history_clear(config: &Config, yes: bool) -> Result<()> {
    let mut store = open_store(config);
    if store.items().is_empty() {
        println!("History is already empty.");
        return Ok(());
    }

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete all {} stored history entries? This cannot be undone",
                store.items().len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.clear();
    println!("History cleared.");
    Ok(())
}
