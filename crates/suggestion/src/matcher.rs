use larder_shared::{InventoryItem, RecipeIngredient};

/// Strategy deciding which inventory item, if any, satisfies a recipe ingredient.
///
/// Implementations must be deterministic for a given inventory ordering.
pub trait IngredientMatcher {
    fn find_match<'a>(
        &self,
        ingredient: &RecipeIngredient,
        inventory: &'a [InventoryItem],
    ) -> Option<&'a InventoryItem>;
}

impl<M: IngredientMatcher + ?Sized> IngredientMatcher for &M {
    fn find_match<'a>(
        &self,
        ingredient: &RecipeIngredient,
        inventory: &'a [InventoryItem],
    ) -> Option<&'a InventoryItem> {
        (**self).find_match(ingredient, inventory)
    }
}

/// Exact name first, then any same-category item sharing a word with the ingredient.
///
/// The token fallback is loose: "Beef Broth" satisfies "Ground Beef" through "beef".
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenOverlapMatcher;

impl IngredientMatcher for TokenOverlapMatcher {
    fn find_match<'a>(
        &self,
        ingredient: &RecipeIngredient,
        inventory: &'a [InventoryItem],
    ) -> Option<&'a InventoryItem> {
        let wanted = ingredient.name.trim().to_lowercase();

        if let Some(exact) = inventory
            .iter()
            .find(|item| item.name.trim().to_lowercase() == wanted)
        {
            return Some(exact);
        }

        let wanted_tokens = tokens(&wanted);
        if wanted_tokens.is_empty() {
            return None;
        }

        inventory.iter().find(|item| {
            item.category.matches(&ingredient.category)
                && tokens(&item.name.to_lowercase())
                    .iter()
                    .any(|token| wanted_tokens.contains(token))
        })
    }
}

/// Case-insensitive exact name only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactNameMatcher;

impl IngredientMatcher for ExactNameMatcher {
    fn find_match<'a>(
        &self,
        ingredient: &RecipeIngredient,
        inventory: &'a [InventoryItem],
    ) -> Option<&'a InventoryItem> {
        let wanted = ingredient.name.trim().to_lowercase();

        inventory
            .iter()
            .find(|item| item.name.trim().to_lowercase() == wanted)
    }
}

fn tokens(name: &str) -> Vec<&str> {
    name.split_whitespace().collect()
}
