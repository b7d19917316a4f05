//! Property tests for the closed-vocabulary guarantees and the review resolver.

use std::collections::BTreeSet;

use pantry_core::ai::{GENERATE_RECIPES_PROMPT_NAME, SELECT_INGREDIENTS_PROMPT_NAME};
use pantry_core::contract::{parse, SchemaKind};
use pantry_core::{
    generate_recipes, resolve, select_ingredients, AllowedNameSet, FakeAiClient,
    IngredientSelection, PreferenceStatement, Resolution, StageError,
};
use proptest::prelude::*;
use proptest::sample::Index;
use proptest::test_runner::Config;
use serde_json::json;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(future)
}

fn shout(name: &str, upper: bool) -> String {
    if upper {
        name.to_uppercase()
    } else {
        format!("  {}", name)
    }
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn selection_is_bounded_and_closed(
        catalog in prop::collection::btree_set("[a-z]{3,12}", 10..30),
        picks in prop::collection::vec(any::<Index>(), 0..14),
        foreign in prop::collection::vec("[a-z]{3,8}[0-9]", 0..2),
        upper in any::<bool>()
    ) {
        let names: Vec<String> = catalog.iter().cloned().collect();
        let allowed = AllowedNameSet::from_names(names.clone()).unwrap();

        let picked: Vec<&String> = picks.iter().map(|i| i.get(&names)).collect();
        let distinct: BTreeSet<&String> = picked.iter().copied().collect();
        let mut proposed: Vec<String> = picked.iter().map(|n| shout(n, upper)).collect();
        proposed.extend(foreign.iter().cloned());

        let client = FakeAiClient::new().with_response(
            SELECT_INGREDIENTS_PROMPT_NAME,
            json!({ "ingredients": proposed }).to_string(),
        );
        let preference = PreferenceStatement::new("anything").unwrap();

        let result = block_on(select_ingredients(&client, &preference, &allowed));

        if let Ok(selection) = &result {
            prop_assert!((6..=10).contains(&selection.len()));
            for name in selection.iter() {
                prop_assert!(allowed.contains(name));
            }
        }

        let expect_ok = foreign.is_empty() && (6..=10).contains(&distinct.len());
        prop_assert_eq!(result.is_ok(), expect_ok);
    }

    #[test]
    fn generated_recipes_only_use_selection(
        recipe_picks in prop::collection::vec(
            (
                prop::collection::vec(any::<Index>(), 1..5),
                prop::option::of("[a-z]{3,8}[0-9]")
            ),
            1..6
        ),
        upper in any::<bool>()
    ) {
        let names = [
            "salmon",
            "spinach",
            "quinoa",
            "olive oil",
            "greek yogurt",
            "almonds",
            "kale",
        ];
        let allowed = AllowedNameSet::from_names(names).unwrap();
        let selection = IngredientSelection::from_catalog(names, &allowed).unwrap();

        let mut any_foreign = false;
        let recipes: Vec<serde_json::Value> = recipe_picks
            .iter()
            .enumerate()
            .map(|(i, (picks, foreign))| {
                let mut used: Vec<String> = picks
                    .iter()
                    .map(|p| shout(p.get::<&str>(&names), upper))
                    .collect();
                if let Some(extra) = foreign {
                    any_foreign = true;
                    used.push(extra.clone());
                }
                json!({
                    "title": format!("Recipe {}", i + 1),
                    "ingredients_used": used,
                    "instructions": ["Cook."],
                })
            })
            .collect();

        let client = FakeAiClient::new().with_response(
            GENERATE_RECIPES_PROMPT_NAME,
            json!({ "recipes": recipes }).to_string(),
        );

        match block_on(generate_recipes(&client, &selection)) {
            Ok(batch) => {
                prop_assert!(!any_foreign);
                for recipe in batch.iter() {
                    for name in &recipe.ingredients_used {
                        prop_assert!(selection.contains(name));
                    }
                }
            }
            Err(StageError::Constraint(_)) => prop_assert!(any_foreign),
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn parse_is_deterministic(raw in ".{0,200}", schema_is_batch in any::<bool>()) {
        let schema = if schema_is_batch {
            SchemaKind::RecipeBatch
        } else {
            SchemaKind::IngredientSelection
        };
        prop_assert_eq!(parse(&raw, schema), parse(&raw, schema));
    }

    #[test]
    fn parse_is_deterministic_on_near_valid_json(
        names in prop::collection::vec("[ a-zA-Z]{0,10}", 0..8)
    ) {
        let raw = json!({ "ingredients": names }).to_string();
        let first = parse(&raw, SchemaKind::IngredientSelection);
        prop_assert_eq!(&first, &parse(&raw, SchemaKind::IngredientSelection));
        prop_assert_eq!(first.is_ok(), names.iter().all(|n| !n.trim().is_empty()));
    }

    #[test]
    fn review_resolution_stays_in_range(expression in "[0-9a-z, ]{0,24}", len in 0usize..12) {
        match resolve(&expression, len) {
            Resolution::Terminate => prop_assert_eq!(expression.trim(), "none"),
            Resolution::Show(indices) => {
                for index in indices {
                    prop_assert!(index < len);
                }
            }
        }
    }
}
