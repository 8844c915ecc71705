use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Difficulty, Recipe, RecipeIngredient};

pub const DEFAULT_EXPIRATION_WEIGHT_MULTIPLIER: f64 = 0.3;
pub const DEFAULT_EXPIRATION_THRESHOLD_DAYS: i64 = 7;

/// One ranked candidate. Recomputed on every ranking call, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSuggestion {
    pub recipe: Recipe,
    pub match_score: f64,
    pub missing_ingredients: Vec<RecipeIngredient>,
    pub available_ingredients: Vec<RecipeIngredient>,
    pub can_make_with_substitutions: bool,
    pub estimated_prep_time: u32,
    pub expiration_priority: f64,
    pub expiring_ingredients_count: usize,
    pub expiring_ingredients: Vec<RecipeIngredient>,
}

/// User-selected filters for a ranking call.
///
/// Empty `tags` means "no tag filter".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeSearchFilters {
    pub max_prep_time: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub tags: Vec<String>,
    pub max_missing_ingredients: Option<usize>,
    pub prioritize_expiring: bool,
    #[validate(range(min = 0.0, max = 1.0))]
    pub expiration_weight_multiplier: f64,
    #[validate(range(min = 0))]
    pub expiration_threshold: i64,
    pub search: Option<String>,
    #[validate(range(min = 1))]
    pub max_results: Option<usize>,
}

impl Default for RecipeSearchFilters {
    fn default() -> Self {
        Self {
            max_prep_time: None,
            difficulty: None,
            cuisine: None,
            tags: Vec::new(),
            max_missing_ingredients: None,
            prioritize_expiring: false,
            expiration_weight_multiplier: DEFAULT_EXPIRATION_WEIGHT_MULTIPLIER,
            expiration_threshold: DEFAULT_EXPIRATION_THRESHOLD_DAYS,
            search: None,
            max_results: None,
        }
    }
}

impl RecipeSearchFilters {
    pub fn prioritizing_expiring() -> Self {
        Self {
            prioritize_expiring: true,
            ..Self::default()
        }
    }
}
