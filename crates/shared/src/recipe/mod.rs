mod suggestion;

pub use suggestion::{
    DEFAULT_EXPIRATION_THRESHOLD_DAYS, DEFAULT_EXPIRATION_WEIGHT_MULTIPLIER, RecipeSearchFilters,
    RecipeSuggestion,
};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

use crate::inventory::Category;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[serde(other)]
    Unknown,
}

impl Difficulty {
    /// `Unknown` never satisfies a difficulty filter.
    pub fn satisfies(&self, wanted: &Difficulty) -> bool {
        self == wanted && *self != Difficulty::Unknown
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub is_optional: bool,
}

impl RecipeIngredient {
    pub fn required(
        name: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            category,
            is_optional: false,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            is_optional: true,
            ..Self::required(name, amount, unit, category)
        }
    }
}

/// Static catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(nested)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    #[validate(range(min = 1))]
    pub servings: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Recipe {
    /// Prep plus cook time in minutes
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }

    pub fn required_ingredients(&self) -> impl Iterator<Item = &RecipeIngredient> {
        self.ingredients.iter().filter(|i| !i.is_optional)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    pub fn is_cuisine(&self, cuisine: &str) -> bool {
        self.cuisine.to_lowercase() == cuisine.to_lowercase()
    }

    /// Case-insensitive substring search over name, description, cuisine and tags.
    pub fn mentions(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.cuisine.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}
