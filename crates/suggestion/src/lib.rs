pub mod expiration;
pub mod matcher;
pub mod ranker;
pub mod scorer;

pub use expiration::ExpirationWeightCalculator;
pub use matcher::{ExactNameMatcher, IngredientMatcher, TokenOverlapMatcher};
pub use ranker::{MIN_MATCH_SCORE, Rejection, SuggestionEngine, rank_suggestions};
pub use scorer::RecipeScorer;
