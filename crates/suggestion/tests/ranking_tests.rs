use larder_shared::{
    Category, Difficulty, InventoryItem, Recipe, RecipeIngredient, RecipeSearchFilters,
};
use larder_suggestion::{ExactNameMatcher, SuggestionEngine};

fn recipe(id: &str, name: &str, ingredients: Vec<RecipeIngredient>) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        ingredients,
        instructions: vec!["Cook".to_string()],
        prep_time: 10,
        cook_time: 15,
        servings: 2,
        difficulty: Difficulty::Easy,
        cuisine: "Italian".to_string(),
        tags: Default::default(),
    }
}

fn stock(name: &str, category: Category, days: i64) -> InventoryItem {
    InventoryItem::new(name, category, 1.0, "pcs").with_days_until_expiry(days)
}

fn quick_tomato_pasta() -> Recipe {
    recipe(
        "quick-tomato-pasta",
        "Quick Tomato Pasta",
        vec![
            RecipeIngredient::required("Tomato", 3.0, "pcs", Category::Produce),
            RecipeIngredient::required("Pasta", 200.0, "g", Category::Pantry),
            RecipeIngredient::optional("Basil", 5.0, "leaves", Category::Produce),
        ],
    )
}

fn pasta_aglio() -> Recipe {
    recipe(
        "pasta-aglio",
        "Pasta Aglio e Olio",
        vec![
            RecipeIngredient::required("Pasta", 200.0, "g", Category::Pantry),
            RecipeIngredient::required("Olive Oil", 3.0, "tbsp", Category::Condiments),
        ],
    )
}

fn catalog() -> Vec<Recipe> {
    vec![
        pasta_aglio(),
        quick_tomato_pasta(),
        recipe(
            "beef-stew",
            "Beef Stew",
            vec![
                RecipeIngredient::required("Ground Beef", 500.0, "g", Category::Meat),
                RecipeIngredient::required("Carrot", 2.0, "pcs", Category::Produce),
                RecipeIngredient::required("Potato", 3.0, "pcs", Category::Produce),
            ],
        ),
    ]
}

fn inventory() -> Vec<InventoryItem> {
    vec![
        stock("Tomato", Category::Produce, 1),
        stock("Pasta", Category::Pantry, 365),
        stock("Olive Oil", Category::Condiments, 200),
    ]
}

#[test]
fn test_quick_tomato_pasta_leads_when_prioritizing_expiring() {
    let engine = SuggestionEngine::new(catalog());
    let filters = RecipeSearchFilters::prioritizing_expiring();

    let suggestions = engine.suggest(&inventory(), &filters);

    assert_eq!(suggestions.len(), 1);
    let first = &suggestions[0];
    assert_eq!(first.recipe.id, "quick-tomato-pasta");
    assert_eq!(first.expiring_ingredients_count, 1);
    assert!(first.expiration_priority > 0.0);
}

#[test]
fn test_expiring_recipe_sorts_before_unurgent_ones() {
    let engine = SuggestionEngine::new(catalog());

    // Without prioritisation both pastas tie and the zero-priority one leads by catalog order
    let plain = engine.suggest(&inventory(), &RecipeSearchFilters::default());
    let plain_ids: Vec<&str> = plain.iter().map(|s| s.recipe.id.as_str()).collect();
    assert_eq!(plain_ids, vec!["pasta-aglio", "quick-tomato-pasta"]);
    assert_eq!(plain[0].expiration_priority, 0.0);
    assert!(plain[1].expiration_priority > 0.0);

    let prioritized = engine.suggest(&inventory(), &RecipeSearchFilters::prioritizing_expiring());
    assert_eq!(prioritized[0].recipe.id, "quick-tomato-pasta");
    assert!(
        prioritized
            .iter()
            .all(|s| s.expiration_priority > 0.0),
        "zero-priority recipes must not precede or join the prioritized ranking"
    );
}

#[test]
fn test_default_ranking_orders_by_match_score_and_keeps_catalog_order_on_ties() {
    let engine = SuggestionEngine::new(catalog());

    let suggestions = engine.suggest(&inventory(), &RecipeSearchFilters::default());
    let ids: Vec<&str> = suggestions.iter().map(|s| s.recipe.id.as_str()).collect();

    // Both pastas are complete matches; beef stew has nothing in stock
    assert_eq!(ids, vec!["pasta-aglio", "quick-tomato-pasta"]);
}

#[test]
fn test_two_key_order_when_prioritizing_expiring() {
    let catalog = vec![
        recipe(
            "a",
            "Spinach Salad",
            vec![
                RecipeIngredient::required("Spinach", 1.0, "bag", Category::Produce),
                RecipeIngredient::required("Feta", 100.0, "g", Category::Dairy),
                RecipeIngredient::required("Walnuts", 30.0, "g", Category::Pantry),
            ],
        ),
        recipe(
            "b",
            "Spinach Omelette",
            vec![
                RecipeIngredient::required("Spinach", 1.0, "bag", Category::Produce),
                RecipeIngredient::required("Eggs", 3.0, "pcs", Category::Dairy),
            ],
        ),
        recipe(
            "c",
            "Yogurt Bowl",
            vec![RecipeIngredient::required("Yogurt", 1.0, "cup", Category::Dairy)],
        ),
    ];
    let inventory = vec![
        stock("Spinach", Category::Produce, 3),
        stock("Feta", Category::Dairy, 30),
        stock("Eggs", Category::Dairy, 20),
        stock("Yogurt", Category::Dairy, 0),
    ];

    let engine = SuggestionEngine::new(catalog);
    let suggestions = engine.suggest(&inventory, &RecipeSearchFilters::prioritizing_expiring());

    for pair in suggestions.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.expiration_priority >= b.expiration_priority);
        if a.expiration_priority == b.expiration_priority {
            assert!(a.match_score >= b.match_score);
        }
    }

    let ids: Vec<&str> = suggestions.iter().map(|s| s.recipe.id.as_str()).collect();
    // c: 2.0/2.0 = 1.0, b: 1.5/4.0, a: 1.5/4.0 but lower match score
    assert_eq!(ids, vec!["c", "b", "a"]);
}

#[test]
fn test_scores_stay_within_unit_interval() {
    let engine = SuggestionEngine::new(catalog());
    let inventory = vec![
        stock("Tomato", Category::Produce, 0),
        stock("Pasta", Category::Pantry, 1),
        stock("Basil", Category::Produce, 1),
        stock("Olive Oil", Category::Condiments, 1),
    ];
    let filters = RecipeSearchFilters {
        expiration_weight_multiplier: 1.0,
        ..RecipeSearchFilters::prioritizing_expiring()
    };

    for recipe in engine.catalog() {
        let s = engine
            .suggestion_for(&recipe.id, &inventory, &filters)
            .expect("catalog recipe");
        assert!((0.0..=1.0).contains(&s.match_score));
        assert!((0.0..=1.0).contains(&s.expiration_priority));
        assert!(
            s.available_ingredients.len() + s.missing_ingredients.len()
                <= recipe.ingredients.len()
        );
    }
}

#[test]
fn test_required_ingredients_partitioned_exactly_once() {
    let engine = SuggestionEngine::new(catalog());

    for recipe in engine.catalog() {
        let s = engine
            .suggestion_for(&recipe.id, &inventory(), &RecipeSearchFilters::default())
            .expect("catalog recipe");

        for required in recipe.required_ingredients() {
            let in_available = s
                .available_ingredients
                .iter()
                .filter(|i| i.name == required.name)
                .count();
            let in_missing = s
                .missing_ingredients
                .iter()
                .filter(|i| i.name == required.name)
                .count();
            assert_eq!(in_available + in_missing, 1, "{}", required.name);
        }
    }
}

#[test]
fn test_raising_multiplier_never_lowers_match_score() {
    let recipe = recipe(
        "stir-fry",
        "Veggie Stir Fry",
        vec![
            RecipeIngredient::required("Broccoli", 1.0, "head", Category::Produce),
            RecipeIngredient::required("Tofu", 200.0, "g", Category::Other),
            RecipeIngredient::required("Soy Sauce", 2.0, "tbsp", Category::Condiments),
        ],
    );
    let inventory = vec![
        stock("Broccoli", Category::Produce, 2),
        stock("Tofu", Category::Other, 5),
    ];
    let engine = SuggestionEngine::new(vec![recipe]);

    let mut previous = 0.0;
    for step in 0..=10 {
        let filters = RecipeSearchFilters {
            expiration_weight_multiplier: step as f64 / 10.0,
            ..RecipeSearchFilters::prioritizing_expiring()
        };
        let s = engine
            .suggestion_for("stir-fry", &inventory, &filters)
            .expect("catalog recipe");
        assert!(s.expiration_priority > 0.0);
        assert!(s.match_score >= previous);
        previous = s.match_score;
    }
}

#[test]
fn test_expired_items_never_raise_priority() {
    let engine = SuggestionEngine::new(vec![quick_tomato_pasta()]);
    let inventory = vec![
        stock("Tomato", Category::Produce, 1).expired(),
        stock("Pasta", Category::Pantry, 365),
    ];

    let s = engine
        .suggestion_for(
            "quick-tomato-pasta",
            &inventory,
            &RecipeSearchFilters::prioritizing_expiring(),
        )
        .expect("catalog recipe");
    assert_eq!(s.expiration_priority, 0.0);
    assert!(
        engine
            .suggest(&inventory, &RecipeSearchFilters::prioritizing_expiring())
            .is_empty()
    );
}

#[test]
fn test_empty_inputs_yield_no_suggestions() {
    let engine = SuggestionEngine::new(catalog());
    assert!(engine.suggest(&[], &RecipeSearchFilters::default()).is_empty());

    let empty = SuggestionEngine::new(vec![]);
    assert!(
        empty
            .suggest(&inventory(), &RecipeSearchFilters::default())
            .is_empty()
    );
}

#[test]
fn test_token_overlap_false_positive_is_swappable() {
    let stew = recipe(
        "stew",
        "Beef Stew",
        vec![RecipeIngredient::required("Ground Beef", 500.0, "g", Category::Meat)],
    );
    let inventory = vec![stock("Beef Broth", Category::Meat, 30)];

    let loose = SuggestionEngine::new(vec![stew.clone()]);
    assert_eq!(loose.suggest(&inventory, &RecipeSearchFilters::default()).len(), 1);

    let strict = SuggestionEngine::with_matcher(vec![stew], ExactNameMatcher);
    assert!(
        strict
            .suggest(&inventory, &RecipeSearchFilters::default())
            .is_empty()
    );
}

#[test]
fn test_max_results_truncates_after_sorting() {
    let engine = SuggestionEngine::new(catalog());
    let filters = RecipeSearchFilters {
        max_results: Some(1),
        ..Default::default()
    };

    let suggestions = engine.suggest(&inventory(), &filters);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].recipe.id, "pasta-aglio");
}

#[test]
fn test_suggestions_serialize_with_camel_case_contract() {
    let engine = SuggestionEngine::new(vec![quick_tomato_pasta()]);
    let suggestions = engine.suggest(&inventory(), &RecipeSearchFilters::default());

    let json = serde_json::to_value(&suggestions).unwrap();
    let first = &json[0];
    assert_eq!(first["matchScore"], 1.0);
    assert_eq!(first["estimatedPrepTime"], 25);
    assert_eq!(first["recipe"]["difficulty"], "easy");
    assert!(first["expiringIngredients"].is_array());
}
