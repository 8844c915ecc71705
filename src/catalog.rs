//! JSON loading for the collaborator data the core consumes: recipe catalog,
//! inventory snapshot, grocery list and observed purchases.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use larder_shared::{GroceryItem, InventoryItem, PurchaseItem, Recipe};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Recipe '{id}' is invalid: {source}")]
    Validation {
        id: String,
        source: validator::ValidationErrors,
    },

    #[error("Duplicate recipe id: {0}")]
    DuplicateRecipe(String),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let display = path.display().to_string();

    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
        path: display,
        source,
    })
}

/// Load and validate a recipe catalog. Recipe ids must be unique.
pub fn load_recipes(path: impl AsRef<Path>) -> Result<Vec<Recipe>, CatalogError> {
    let recipes: Vec<Recipe> = read_json(path.as_ref())?;
    validate_recipes(&recipes)?;

    tracing::debug!(recipes = recipes.len(), "recipe catalog loaded");

    Ok(recipes)
}

pub fn validate_recipes(recipes: &[Recipe]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();

    for recipe in recipes {
        recipe
            .validate()
            .map_err(|source| CatalogError::Validation {
                id: recipe.id.clone(),
                source,
            })?;

        if !seen.insert(recipe.id.as_str()) {
            return Err(CatalogError::DuplicateRecipe(recipe.id.clone()));
        }
    }

    Ok(())
}

/// Load an inventory snapshot.
///
/// Items carrying an `expirationDate` get their expiry counters refreshed against
/// `today`; the others are taken as-is.
pub fn load_inventory(
    path: impl AsRef<Path>,
    today: NaiveDate,
) -> Result<Vec<InventoryItem>, CatalogError> {
    let items: Vec<InventoryItem> = read_json(path.as_ref())?;

    Ok(items
        .into_iter()
        .map(|item| match item.expiration_date {
            Some(date) => item.with_expiration_date(date, today),
            None => item,
        })
        .collect())
}

pub fn load_grocery_list(path: impl AsRef<Path>) -> Result<Vec<GroceryItem>, CatalogError> {
    read_json(path.as_ref())
}

/// Load observed purchases. Confidence values are clamped to `[0, 1]`.
pub fn load_purchases(path: impl AsRef<Path>) -> Result<Vec<PurchaseItem>, CatalogError> {
    let items: Vec<PurchaseItem> = read_json(path.as_ref())?;

    Ok(items
        .into_iter()
        .map(|item| {
            let confidence = item.confidence;
            item.with_confidence(confidence)
        })
        .collect())
}
