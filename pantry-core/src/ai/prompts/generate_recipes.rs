//! Prompt for writing recipes from a fixed ingredient selection.

use super::{append_hints, PromptHints};
use crate::types::IngredientSelection;

/// Prompt name for logs and test doubles.
pub const GENERATE_RECIPES_PROMPT_NAME: &str = "generate_recipes";

/// Render the system prompt for recipe generation.
pub fn render_generate_recipes_system_prompt(count: usize) -> String {
    format!(
        r#"You are a professional chef.

Using ONLY the provided ingredients, generate {count} simple recipes.

Rules:
- Do NOT introduce new ingredients, not even water, salt or oil unless listed
- Each recipe must include:
  - title
  - ingredients_used, spelled exactly as provided
  - quantities: how much of each ingredient is needed
  - instructions: step by step
- Keep recipes simple and realistic
- Respond with JSON only, no other text

JSON format:
{{
  "recipes": [
    {{
      "title": "Recipe Name",
      "ingredients_used": ["ingredient 1", "ingredient 2"],
      "quantities": {{"ingredient 1": "200 g", "ingredient 2": "1 cup"}},
      "instructions": ["step 1", "step 2"]
    }}
  ]
}}"#,
        count = count
    )
}

/// Render the user message listing the selected ingredients.
pub fn render_generate_recipes_user_prompt(
    selection: &IngredientSelection,
    hints: &PromptHints,
) -> String {
    let prompt = format!("Ingredients:\n{}", selection.as_slice().join(", "));
    append_hints(prompt, hints)
}
