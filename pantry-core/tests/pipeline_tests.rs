//! End-to-end tests: catalog records in, rendered recipes out, with a scripted provider.

use pantry_core::ai::{GENERATE_RECIPES_PROMPT_NAME, SELECT_INGREDIENTS_PROMPT_NAME};
use pantry_core::render::{render_selection, render_title_list};
use pantry_core::{
    run_review_loop, AllowedNameSet, CatalogEntry, ConstraintViolation, FakeAiClient, Pipeline,
    PipelineConfig, PreferenceStatement, Stage,
};

/// Product listings shaped like the fixture catalog: many fields, repeated names.
const CATALOG_JSON: &str = r#"[
    {"product_id": "AF-1", "name": "Salmon", "brand": "Kirkland", "price": 12.99},
    {"product_id": "AF-2", "name": "Spinach", "brand": "Earthbound Farm", "price": 2.49},
    {"product_id": "AF-3", "name": "salmon", "brand": "Amazon Fresh", "price": 10.49},
    {"product_id": "AF-4", "name": "Quinoa", "price": 4.99},
    {"product_id": "AF-5", "name": "Olive Oil", "price": 8.99},
    {"product_id": "AF-6", "name": "Greek Yogurt", "price": 5.49},
    {"product_id": "AF-7", "name": "Almonds", "price": 6.99},
    {"product_id": "AF-8", "name": "Blueberries", "price": 3.99},
    {"product_id": "AF-9", "name": "Kale", "price": 2.99},
    {"product_id": "AF-10", "name": "Frozen Pizza", "price": 7.99},
    {"product_id": "AF-11", "name": "Chickpeas", "price": 1.49}
]"#;

const SELECTION: &str = r#"```json
{"ingredients": ["Salmon", "Spinach", "Quinoa", "Olive Oil", "Greek Yogurt", "Almonds",
                 "Blueberries"]}
```"#;

const RECIPES: &str = r#"{
    "recipes": [
        {
            "title": "Salmon Quinoa Bowl",
            "ingredients_used": ["salmon", "quinoa", "spinach", "olive oil"],
            "quantities": {"salmon": "200 g", "quinoa": "1 cup"},
            "instructions": [
                "Cook the quinoa.",
                "Sear the salmon in olive oil.",
                "Serve over spinach."
            ]
        },
        {
            "title": "Berry Yogurt Parfait",
            "ingredients_used": ["greek yogurt", "blueberries", "almonds"],
            "instructions": ["Layer yogurt and berries.", "Top with almonds."]
        },
        {
            "title": "Wilted Spinach",
            "ingredients_used": ["spinach", "olive oil"],
            "instructions": ["Warm the oil.", "Wilt the spinach."]
        }
    ]
}"#;

fn catalog() -> AllowedNameSet {
    let records: Vec<CatalogEntry> = serde_json::from_str(CATALOG_JSON).unwrap();
    AllowedNameSet::load(&records).unwrap()
}

#[tokio::test]
async fn test_full_session() {
    let allowed = catalog();
    assert_eq!(allowed.len(), 10);

    let client = FakeAiClient::new()
        .with_response(SELECT_INGREDIENTS_PROMPT_NAME, SELECTION)
        .with_response(GENERATE_RECIPES_PROMPT_NAME, RECIPES);
    let preference = PreferenceStatement::new("Mediterranean, high protein, no red meat").unwrap();

    let outcome = Pipeline::new(&client, PipelineConfig::default())
        .run(&preference, &allowed)
        .await
        .unwrap();

    assert_eq!(outcome.selection.len(), 7);
    assert!(render_selection(&outcome.selection).contains(" - greek yogurt\n"));
    assert_eq!(
        render_title_list(&outcome.batch),
        "Available recipes:\n1. Salmon Quinoa Bowl\n2. Berry Yogurt Parfait\n3. Wilted Spinach\n"
    );

    let mut output = Vec::new();
    run_review_loop(&outcome.batch, "3,1\nabc\nnone\n".as_bytes(), &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    let spinach = text.find("== Wilted Spinach ==").unwrap();
    let bowl = text.find("== Salmon Quinoa Bowl ==").unwrap();
    assert!(spinach < bowl, "recipes render in the order typed");
    assert!(text.contains(" - salmon (200 g)\n"));
    assert!(text.contains(" 3. Serve over spinach.\n"));
    assert!(!text.contains("Berry Yogurt Parfait"));
}

#[tokio::test]
async fn test_selection_outside_catalog_stops_before_generation() {
    let client = FakeAiClient::new()
        .with_response(
            SELECT_INGREDIENTS_PROMPT_NAME,
            r#"{"ingredients": ["salmon", "spinach", "quinoa", "kale", "almonds", "lobster"]}"#,
        )
        .with_response(GENERATE_RECIPES_PROMPT_NAME, RECIPES);
    let preference = PreferenceStatement::new("Seafood").unwrap();

    let err = Pipeline::new(&client, PipelineConfig::default())
        .run(&preference, &catalog())
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Selection);
    assert_eq!(
        err.constraint_violation(),
        Some(&ConstraintViolation::UnknownIngredients {
            names: vec!["lobster".to_string()]
        })
    );
    assert_eq!(client.call_count(GENERATE_RECIPES_PROMPT_NAME), 0);
}

#[tokio::test]
async fn test_generation_parse_error_keeps_raw_text() {
    let raw = "Here are ten recipes you will love!";
    let client = FakeAiClient::new()
        .with_response(SELECT_INGREDIENTS_PROMPT_NAME, SELECTION)
        .with_response(GENERATE_RECIPES_PROMPT_NAME, raw);
    let preference = PreferenceStatement::new("Anything quick").unwrap();

    let err = Pipeline::new(&client, PipelineConfig::default())
        .run(&preference, &catalog())
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Generation);
    assert_eq!(err.parse_error().map(|e| e.raw.as_str()), Some(raw));
}
