//! Prompt for choosing ingredients from the catalog.

use super::{append_hints, PromptHints};
use crate::catalog::AllowedNameSet;
use crate::types::PreferenceStatement;

/// Prompt name for logs and test doubles.
pub const SELECT_INGREDIENTS_PROMPT_NAME: &str = "select_ingredients";

/// Render the system prompt binding the provider to the allowed list.
pub fn render_select_ingredients_system_prompt(min: usize, max: usize) -> String {
    format!(
        r#"You are a culinary assistant.

You may ONLY select ingredients from the allowed ingredient list.
Do NOT invent ingredients.

Task:
Given a user's food preferences and health goals,
select {min} to {max} relevant ingredients from the allowed list.

Rules:
- Use ONLY ingredients from the allowed list, spelled exactly as listed
- Select at least {min} and at most {max} ingredients
- Do NOT suggest recipes yet
- Do NOT add new ingredients
- Respond with JSON only, no other text

JSON format:
{{
  "ingredients": ["ingredient 1", "ingredient 2"]
}}"#,
        min = min,
        max = max
    )
}

/// Render the user message with the preferences and the allowed names.
pub fn render_select_ingredients_user_prompt(
    preference: &PreferenceStatement,
    allowed: &AllowedNameSet,
    hints: &PromptHints,
) -> String {
    let allowed_list = allowed.iter().collect::<Vec<_>>().join(", ");

    let prompt = format!(
        "User preferences:\n{preference}\n\nAllowed ingredients:\n{allowed_list}",
        preference = preference.as_str(),
        allowed_list = allowed_list
    );
    append_hints(prompt, hints)
}
