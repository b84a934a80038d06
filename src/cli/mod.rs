use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `PureLabel` — ingredient-label analyzer.
#[derive(Parser, Debug)]
#[command(name = "purelabel")]
#[command(version = "0.1.0")]
#[command(
    about = "Check ingredient labels for vegan status, allergens, additives and healthiness.",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze pasted ingredient text or a photographed label
    Analyze {
        /// Ingredient list text (omit when using --image)
        text: Option<String>,

        /// Path to a label photo; takes precedence over the text
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Your specific allergies, comma separated (e.g. "sesame, mustard")
        #[arg(short, long)]
        allergies: Option<String>,

        /// Model to use (overrides the configured one)
        #[arg(long)]
        model: Option<String>,
    },

    /// Browse past analysis results
    History {
        #[command(subcommand)]
        history_command: HistoryCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List stored entries, newest first
    List,

    /// Re-display a stored result by list position (1-based) or id
    Show {
        /// Entry number from `history list`, or its id
        entry: String,
    },

    /// Irreversibly delete all stored entries
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
