use larder_shared::{InventoryItem, Recipe, RecipeSearchFilters, RecipeSuggestion, clamp_unit};

use crate::expiration::{CRITICAL_WEIGHT, ExpirationWeightCalculator};
use crate::matcher::{IngredientMatcher, TokenOverlapMatcher};

/// Share of required ingredients that may be missing while still counting as
/// makeable with substitutions.
const SUBSTITUTION_TOLERANCE: f64 = 0.3;

/// RecipeScorer combines ingredient matches and expiration weights for one recipe.
///
/// - `match_score` = matched required / required (0 when nothing is required),
///   boosted by `expiration_priority * multiplier` when expiring items are prioritised
/// - `expiration_priority` = sum of urgent weights / (2.0 * matched ingredients)
///
/// Optional ingredients go through the matcher too: a hit lists them as available
/// and counts toward expiration accounting, a miss drops them silently. They never
/// change the base score.
#[derive(Debug, Clone, Default)]
pub struct RecipeScorer<M = TokenOverlapMatcher> {
    matcher: M,
}

impl<M: IngredientMatcher> RecipeScorer<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn score(
        &self,
        recipe: &Recipe,
        inventory: &[InventoryItem],
        filters: &RecipeSearchFilters,
    ) -> RecipeSuggestion {
        let mut available = Vec::new();
        let mut missing = Vec::new();
        let mut expiring = Vec::new();

        let mut required_count = 0usize;
        let mut matched_required = 0usize;
        let mut total_expiration_weight = 0.0;
        let mut max_possible_weight = 0.0;

        for ingredient in &recipe.ingredients {
            if !ingredient.is_optional {
                required_count += 1;
            }

            match self.matcher.find_match(ingredient, inventory) {
                Some(item) => {
                    if !ingredient.is_optional {
                        matched_required += 1;
                    }

                    let weight =
                        ExpirationWeightCalculator::weight(item, filters.expiration_threshold);
                    max_possible_weight += CRITICAL_WEIGHT;

                    if ExpirationWeightCalculator::is_urgent(weight) {
                        total_expiration_weight += weight;
                        expiring.push(ingredient.clone());
                    }

                    available.push(ingredient.clone());
                }
                None if ingredient.is_optional => {}
                None => missing.push(ingredient.clone()),
            }
        }

        let base_match_score = if required_count == 0 {
            0.0
        } else {
            matched_required as f64 / required_count as f64
        };

        let expiration_priority = if max_possible_weight > 0.0 {
            clamp_unit(total_expiration_weight / max_possible_weight)
        } else {
            0.0
        };

        let match_score = if filters.prioritize_expiring && expiration_priority > 0.0 {
            (base_match_score + expiration_priority * filters.expiration_weight_multiplier)
                .min(1.0)
        } else {
            base_match_score
        };

        let substitution_allowance =
            (required_count as f64 * SUBSTITUTION_TOLERANCE).ceil() as usize;

        tracing::debug!(
            recipe = %recipe.id,
            match_score,
            expiration_priority,
            missing = missing.len(),
            "scored recipe"
        );

        RecipeSuggestion {
            recipe: recipe.clone(),
            match_score: clamp_unit(match_score),
            can_make_with_substitutions: missing.len() <= substitution_allowance,
            missing_ingredients: missing,
            available_ingredients: available,
            estimated_prep_time: recipe.total_time(),
            expiration_priority,
            expiring_ingredients_count: expiring.len(),
            expiring_ingredients: expiring,
        }
    }
}
