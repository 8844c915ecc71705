use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use larder::commands;
use larder_shared::{Difficulty, RecipeSearchFilters};
use serde::Serialize;

/// larder - what to cook before it spoils, and what you actually bought
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Recipe suggestions from your inventory and post-shopping reconciliation", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes that can be cooked from the current inventory
    Suggest {
        /// Recipe catalog (JSON array)
        #[arg(long)]
        recipes: PathBuf,

        /// Inventory snapshot (JSON array)
        #[arg(long)]
        inventory: PathBuf,

        /// Favour recipes using items about to expire
        #[arg(long)]
        prioritize_expiring: bool,

        #[arg(long)]
        max_prep_time: Option<u32>,

        /// easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        #[arg(long)]
        cuisine: Option<String>,

        /// Keep recipes carrying at least one of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        max_missing: Option<usize>,

        /// Free-text search over name, description, cuisine and tags
        #[arg(long)]
        search: Option<String>,

        /// Date used to derive days until expiry (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Reconcile a grocery list against scanned or manually entered purchases
    Reconcile {
        /// Grocery list (JSON array)
        #[arg(long)]
        expected: PathBuf,

        /// Observed purchases (JSON array)
        #[arg(long)]
        observed: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = larder::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(
        "larder",
        env!("CARGO_PKG_VERSION"),
        &config.logging,
    )?;

    match cli.command {
        Commands::Suggest {
            recipes,
            inventory,
            prioritize_expiring,
            max_prep_time,
            difficulty,
            cuisine,
            tags,
            max_missing,
            search,
            today,
        } => {
            let filters = RecipeSearchFilters {
                max_prep_time,
                difficulty,
                cuisine,
                tags,
                max_missing_ingredients: max_missing,
                prioritize_expiring,
                search,
                ..config.suggestion.filters()
            };
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());

            let suggestions = commands::suggest(&recipes, &inventory, &filters, today)?;
            print_json(&suggestions)
        }
        Commands::Reconcile { expected, observed } => {
            let report = commands::reconcile(&expected, &observed)?;
            print_json(&report)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
