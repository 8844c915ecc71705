use std::path::Path;

use chrono::NaiveDate;
use larder_purchase::{PurchaseSummary, ReconciliationResult};
use larder_shared::{RecipeSearchFilters, RecipeSuggestion};
use larder_suggestion::SuggestionEngine;
use serde::Serialize;
use validator::Validate;

use crate::catalog;

/// Output of the `reconcile` command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub reconciliation: ReconciliationResult,
    pub summary: PurchaseSummary,
}

/// Rank the recipes in `recipes` against the inventory in `inventory`.
#[tracing::instrument(skip(filters))]
pub fn suggest(
    recipes: &Path,
    inventory: &Path,
    filters: &RecipeSearchFilters,
    today: NaiveDate,
) -> anyhow::Result<Vec<RecipeSuggestion>> {
    filters
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid filters: {}", e))?;

    let engine = SuggestionEngine::new(catalog::load_recipes(recipes)?);
    let inventory = catalog::load_inventory(inventory, today)?;

    let suggestions = engine.suggest(&inventory, filters);
    if suggestions.is_empty() {
        tracing::info!("No recipe suggestions for the current inventory");
    }

    Ok(suggestions)
}

/// Seed a shopping trip from a grocery list and reconcile it against observed purchases.
#[tracing::instrument]
pub fn reconcile(expected: &Path, observed: &Path) -> anyhow::Result<ReconcileReport> {
    let groceries = catalog::load_grocery_list(expected)?;
    let observed = catalog::load_purchases(observed)?;

    let mut summary = PurchaseSummary::from_grocery_list(&groceries);
    let reconciliation = summary.reconcile_with(&observed)?;

    Ok(ReconcileReport {
        reconciliation,
        summary,
    })
}
