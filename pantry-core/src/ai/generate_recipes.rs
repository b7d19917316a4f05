//! Generation stage: write recipes that use only the selected ingredients.

use crate::ai::prompts::generate_recipes::{
    render_generate_recipes_system_prompt, render_generate_recipes_user_prompt,
    GENERATE_RECIPES_PROMPT_NAME,
};
use crate::ai::prompts::PromptHints;
use crate::ai::{AiClient, ChatRequest};
use crate::catalog::normalize_name;
use crate::contract::parse_recipe_batch;
use crate::error::{ConstraintViolation, RecipeOffense, StageError};
use crate::types::{IngredientSelection, Recipe, RecipeBatch};

/// Number of recipes requested per batch.
pub const RECIPE_COUNT: usize = 10;

pub const GENERATION_TEMPERATURE: f32 = 0.5;

/// Ask the provider for recipes built from `selection`.
///
/// If any recipe mentions an ingredient outside the selection, the whole
/// batch is rejected with [`ConstraintViolation::UnknownRecipeIngredients`]
/// listing every offending recipe. Nothing is dropped silently.
pub async fn generate_recipes(
    ai_client: &dyn AiClient,
    selection: &IngredientSelection,
) -> Result<RecipeBatch, StageError> {
    generate_recipes_with_hints(ai_client, selection, &PromptHints::default()).await
}

/// Same as [`generate_recipes`], with retry hints appended to the prompt.
pub async fn generate_recipes_with_hints(
    ai_client: &dyn AiClient,
    selection: &IngredientSelection,
    hints: &PromptHints,
) -> Result<RecipeBatch, StageError> {
    let request = ChatRequest::prompted(
        render_generate_recipes_system_prompt(RECIPE_COUNT),
        render_generate_recipes_user_prompt(selection, hints),
        GENERATION_TEMPERATURE,
    );

    let response = ai_client
        .complete(GENERATE_RECIPES_PROMPT_NAME, request)
        .await?;

    let recipes = parse_recipe_batch(&response.content)?;
    check_vocabulary(&recipes, selection)?;

    if recipes.len() != RECIPE_COUNT {
        tracing::warn!(
            requested = RECIPE_COUNT,
            received = recipes.len(),
            "Provider returned a different number of recipes than requested"
        );
    }

    Ok(RecipeBatch::new(recipes))
}

/// Every ingredient a recipe references must be in the selection.
pub fn check_vocabulary(
    recipes: &[Recipe],
    selection: &IngredientSelection,
) -> Result<(), ConstraintViolation> {
    let offenders: Vec<RecipeOffense> = recipes
        .iter()
        .enumerate()
        .filter_map(|(i, recipe)| {
            let mut unknown: Vec<String> = Vec::new();
            for name in recipe.referenced_ingredients() {
                let seen = unknown
                    .iter()
                    .any(|u| normalize_name(u) == normalize_name(name));
                if !selection.contains(name) && !seen {
                    unknown.push(name.to_string());
                }
            }
            (!unknown.is_empty()).then(|| RecipeOffense {
                position: i + 1,
                title: recipe.title.clone(),
                unknown,
            })
        })
        .collect();

    if offenders.is_empty() {
        Ok(())
    } else {
        Err(ConstraintViolation::UnknownRecipeIngredients { offenders })
    }
}
