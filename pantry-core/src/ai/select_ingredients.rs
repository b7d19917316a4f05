//! Selection stage: narrow the catalog to a handful of ingredients for the user.

use crate::ai::prompts::select_ingredients::{
    render_select_ingredients_system_prompt, render_select_ingredients_user_prompt,
    SELECT_INGREDIENTS_PROMPT_NAME,
};
use crate::ai::prompts::PromptHints;
use crate::ai::{AiClient, ChatRequest};
use crate::catalog::AllowedNameSet;
use crate::contract::parse_ingredient_selection;
use crate::error::StageError;
use crate::types::{IngredientSelection, PreferenceStatement};

pub const SELECTION_TEMPERATURE: f32 = 0.3;

/// Ask the provider for ingredients matching `preference`.
///
/// Returns only names from `allowed`, between [`IngredientSelection::MIN`] and
/// [`IngredientSelection::MAX`] of them. A name outside the catalog is a
/// constraint violation, not a parse failure.
pub async fn select_ingredients(
    ai_client: &dyn AiClient,
    preference: &PreferenceStatement,
    allowed: &AllowedNameSet,
) -> Result<IngredientSelection, StageError> {
    select_ingredients_with_hints(ai_client, preference, allowed, &PromptHints::default()).await
}

/// Same as [`select_ingredients`], with retry hints appended to the prompt.
pub async fn select_ingredients_with_hints(
    ai_client: &dyn AiClient,
    preference: &PreferenceStatement,
    allowed: &AllowedNameSet,
    hints: &PromptHints,
) -> Result<IngredientSelection, StageError> {
    let request = ChatRequest::prompted(
        render_select_ingredients_system_prompt(IngredientSelection::MIN, IngredientSelection::MAX),
        render_select_ingredients_user_prompt(preference, allowed, hints),
        SELECTION_TEMPERATURE,
    );

    let response = ai_client
        .complete(SELECT_INGREDIENTS_PROMPT_NAME, request)
        .await?;

    let proposed = parse_ingredient_selection(&response.content)?;
    let selection = IngredientSelection::from_catalog(&proposed, allowed)?;

    tracing::debug!(
        proposed = proposed.len(),
        selected = selection.len(),
        "Ingredient selection accepted"
    );

    Ok(selection)
}
