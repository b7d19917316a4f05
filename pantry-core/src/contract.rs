//! Parsing and validation of the structured objects the provider returns.
//!
//! Each stage expects exactly one JSON object. The only repair applied is
//! removing a surrounding Markdown code fence; anything else that does not
//! match the schema is a [`ParseError`] carrying the raw text.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::types::Recipe;

/// The response shapes a stage can expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// `{"ingredients": [string, ...]}`
    IngredientSelection,
    /// `{"recipes": [{"title", "ingredients_used", "quantities"?, "instructions"}, ...]}`
    RecipeBatch,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::IngredientSelection => write!(f, "ingredient selection"),
            SchemaKind::RecipeBatch => write!(f, "recipe batch"),
        }
    }
}

/// A parsed response. Strings are trimmed; nothing is checked against the catalog yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredObject {
    IngredientSelection(Vec<String>),
    RecipeBatch(Vec<Recipe>),
}

#[derive(Debug, Deserialize)]
struct IngredientSelectionPayload {
    ingredients: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecipeBatchPayload {
    recipes: Vec<Recipe>,
}

/// Parse `raw` against `schema`. Pure: the same input always gives the same result.
pub fn parse(raw: &str, schema: SchemaKind) -> Result<StructuredObject, ParseError> {
    match schema {
        SchemaKind::IngredientSelection => {
            parse_ingredient_selection(raw).map(StructuredObject::IngredientSelection)
        }
        SchemaKind::RecipeBatch => parse_recipe_batch(raw).map(StructuredObject::RecipeBatch),
    }
}

pub fn parse_ingredient_selection(raw: &str) -> Result<Vec<String>, ParseError> {
    let schema = SchemaKind::IngredientSelection;
    let payload: IngredientSelectionPayload = parse_object(raw, schema)?;

    payload
        .ingredients
        .iter()
        .enumerate()
        .map(|(i, name)| non_empty(name, || format!("ingredients[{}] is empty", i), schema, raw))
        .collect()
}

pub fn parse_recipe_batch(raw: &str) -> Result<Vec<Recipe>, ParseError> {
    let schema = SchemaKind::RecipeBatch;
    let payload: RecipeBatchPayload = parse_object(raw, schema)?;

    if payload.recipes.is_empty() {
        return Err(ParseError::new(schema, "recipes is empty", raw));
    }

    payload
        .recipes
        .into_iter()
        .enumerate()
        .map(|(i, recipe)| clean_recipe(i, recipe, raw))
        .collect()
}

fn clean_recipe(index: usize, recipe: Recipe, raw: &str) -> Result<Recipe, ParseError> {
    let schema = SchemaKind::RecipeBatch;
    let at = |field: &str| format!("recipes[{}].{}", index, field);

    let title = non_empty(&recipe.title, || at("title is empty"), schema, raw)?;

    if recipe.ingredients_used.is_empty() {
        return Err(ParseError::new(schema, at("ingredients_used is empty"), raw));
    }
    let ingredients_used = recipe
        .ingredients_used
        .iter()
        .enumerate()
        .map(|(j, name)| {
            non_empty(name, || at(&format!("ingredients_used[{}] is empty", j)), schema, raw)
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Keys that only differ in surrounding whitespace would collapse on trim.
    let mut quantities = BTreeMap::new();
    for (name, amount) in &recipe.quantities {
        let name = non_empty(name, || at("quantities has an empty key"), schema, raw)?;
        let amount = non_empty(
            amount,
            || at(&format!("quantities[{:?}] is empty", name)),
            schema,
            raw,
        )?;
        if quantities.contains_key(&name) {
            let reason = at(&format!("quantities has duplicate key {:?}", name));
            return Err(ParseError::new(schema, reason, raw));
        }
        quantities.insert(name, amount);
    }

    if recipe.instructions.is_empty() {
        return Err(ParseError::new(schema, at("instructions is empty"), raw));
    }
    let instructions = recipe
        .instructions
        .iter()
        .enumerate()
        .map(|(j, step)| {
            non_empty(step, || at(&format!("instructions[{}] is empty", j)), schema, raw)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Recipe {
        title,
        ingredients_used,
        quantities,
        instructions,
    })
}

fn non_empty(
    value: &str,
    reason: impl FnOnce() -> String,
    schema: SchemaKind,
    raw: &str,
) -> Result<String, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ParseError::new(schema, reason(), raw))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Decode a single top-level JSON object into `T`.
fn parse_object<T: DeserializeOwned>(raw: &str, schema: SchemaKind) -> Result<T, ParseError> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ParseError::new(schema, format!("not valid JSON: {}", e), raw))?;

    if !value.is_object() {
        return Err(ParseError::new(
            schema,
            "expected a single JSON object at the top level",
            raw,
        ));
    }

    serde_json::from_value(value).map_err(|e| ParseError::new(schema, e.to_string(), raw))
}

/// Remove a surrounding ```` ``` ```` or ```` ```json ```` fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string ("json", "JSON", ...) on the opening line.
    match inner.find('\n') {
        Some(newline) if inner[..newline].chars().all(|c| c.is_ascii_alphanumeric()) => {
            inner[newline + 1..].trim()
        }
        _ => inner.trim(),
    }
}
