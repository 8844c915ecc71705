use larder_shared::{InventoryItem, Recipe, RecipeSearchFilters, RecipeSuggestion};

use crate::matcher::{IngredientMatcher, TokenOverlapMatcher};
use crate::scorer::RecipeScorer;

/// Suggestions must score strictly above this to be returned.
pub const MIN_MATCH_SCORE: f64 = 0.3;

/// Why a scored recipe was dropped from the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    PrepTime,
    Difficulty,
    Cuisine,
    Tags,
    TooManyMissing,
    NothingExpiring,
    Search,
    BelowMinimumScore,
}

impl Rejection {
    /// Check a scored suggestion against the filters, returning the first rule it breaks.
    pub fn check(suggestion: &RecipeSuggestion, filters: &RecipeSearchFilters) -> Option<Self> {
        let recipe = &suggestion.recipe;

        if filters
            .max_prep_time
            .is_some_and(|max| recipe.prep_time > max)
        {
            return Some(Rejection::PrepTime);
        }

        if filters
            .difficulty
            .as_ref()
            .is_some_and(|wanted| !recipe.difficulty.satisfies(wanted))
        {
            return Some(Rejection::Difficulty);
        }

        if filters
            .cuisine
            .as_ref()
            .is_some_and(|cuisine| !recipe.is_cuisine(cuisine))
        {
            return Some(Rejection::Cuisine);
        }

        if !filters.tags.is_empty() && !filters.tags.iter().any(|tag| recipe.has_tag(tag)) {
            return Some(Rejection::Tags);
        }

        if filters
            .max_missing_ingredients
            .is_some_and(|max| suggestion.missing_ingredients.len() > max)
        {
            return Some(Rejection::TooManyMissing);
        }

        if filters.prioritize_expiring && suggestion.expiring_ingredients_count == 0 {
            return Some(Rejection::NothingExpiring);
        }

        if filters
            .search
            .as_deref()
            .is_some_and(|query| !recipe.mentions(query))
        {
            return Some(Rejection::Search);
        }

        if suggestion.match_score <= MIN_MATCH_SCORE {
            return Some(Rejection::BelowMinimumScore);
        }

        None
    }
}

/// Score every recipe, drop the ones the filters reject, and order the rest.
///
/// With `prioritize_expiring` the order is expiration priority then match score,
/// both descending; otherwise match score descending. Equal keys keep catalog order.
#[tracing::instrument(skip_all, fields(recipes = catalog.len(), inventory = inventory.len()))]
pub fn rank_suggestions<M: IngredientMatcher>(
    scorer: &RecipeScorer<M>,
    catalog: &[Recipe],
    inventory: &[InventoryItem],
    filters: &RecipeSearchFilters,
) -> Vec<RecipeSuggestion> {
    let mut suggestions: Vec<RecipeSuggestion> = catalog
        .iter()
        .map(|recipe| scorer.score(recipe, inventory, filters))
        .filter(|suggestion| match Rejection::check(suggestion, filters) {
            Some(reason) => {
                tracing::trace!(recipe = %suggestion.recipe.id, ?reason, "recipe rejected");
                false
            }
            None => true,
        })
        .collect();

    if filters.prioritize_expiring {
        suggestions.sort_by(|a, b| {
            b.expiration_priority
                .total_cmp(&a.expiration_priority)
                .then_with(|| b.match_score.total_cmp(&a.match_score))
        });
    } else {
        suggestions.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    }

    if let Some(max) = filters.max_results {
        suggestions.truncate(max);
    }

    tracing::debug!(suggestions = suggestions.len(), "ranked recipe suggestions");

    suggestions
}

/// Recipe catalog plus the matching strategy used to rank it.
#[derive(Debug, Clone)]
pub struct SuggestionEngine<M = TokenOverlapMatcher> {
    catalog: Vec<Recipe>,
    scorer: RecipeScorer<M>,
}

impl SuggestionEngine {
    pub fn new(catalog: Vec<Recipe>) -> Self {
        Self::with_matcher(catalog, TokenOverlapMatcher)
    }
}

impl<M: IngredientMatcher> SuggestionEngine<M> {
    pub fn with_matcher(catalog: Vec<Recipe>, matcher: M) -> Self {
        Self {
            catalog,
            scorer: RecipeScorer::new(matcher),
        }
    }

    pub fn catalog(&self) -> &[Recipe] {
        &self.catalog
    }

    /// Ranked suggestions for the current inventory. Empty when nothing qualifies.
    pub fn suggest(
        &self,
        inventory: &[InventoryItem],
        filters: &RecipeSearchFilters,
    ) -> Vec<RecipeSuggestion> {
        rank_suggestions(&self.scorer, &self.catalog, inventory, filters)
    }

    /// Score a single catalog recipe without applying any filter.
    pub fn suggestion_for(
        &self,
        recipe_id: &str,
        inventory: &[InventoryItem],
        filters: &RecipeSearchFilters,
    ) -> Option<RecipeSuggestion> {
        self.catalog
            .iter()
            .find(|recipe| recipe.id == recipe_id)
            .map(|recipe| self.scorer.score(recipe, inventory, filters))
    }
}
