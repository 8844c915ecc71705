pub mod inventory;
pub mod recipe;
pub mod shopping;

pub use inventory::{Category, InventoryItem};
pub use recipe::{
    Difficulty, Recipe, RecipeIngredient, RecipeSearchFilters, RecipeSuggestion,
    DEFAULT_EXPIRATION_THRESHOLD_DAYS, DEFAULT_EXPIRATION_WEIGHT_MULTIPLIER,
};
pub use shopping::{Conflict, GroceryItem, PurchaseItem, PurchaseSource, PurchaseStatus};

/// Clamp a ratio-like value into `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }

    value.clamp(0.0, 1.0)
}
