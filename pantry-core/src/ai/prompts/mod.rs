//! AI prompt templates.

pub mod generate_recipes;
pub mod select_ingredients;

pub use generate_recipes::{
    render_generate_recipes_system_prompt, render_generate_recipes_user_prompt,
};
pub use select_ingredients::{
    render_select_ingredients_system_prompt, render_select_ingredients_user_prompt,
};

/// Extra instructions for a retry after a rejected response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptHints {
    /// The previous answer was not a well-formed object.
    pub strict: bool,
    /// Names the provider used although they are not allowed.
    pub rejected: Vec<String>,
}

impl PromptHints {
    pub fn is_empty(&self) -> bool {
        !self.strict && self.rejected.is_empty()
    }

    /// Fold another round of hints into this one.
    pub fn merge(&mut self, other: PromptHints) {
        self.strict |= other.strict;
        for name in other.rejected {
            if !self.rejected.contains(&name) {
                self.rejected.push(name);
            }
        }
    }
}

/// Append retry hints to a user prompt.
pub(crate) fn append_hints(mut prompt: String, hints: &PromptHints) -> String {
    if !hints.rejected.is_empty() {
        prompt.push_str(&format!(
            "\n\nThese names were rejected because they are not allowed. Do NOT use them:\n{}",
            hints.rejected.join(", ")
        ));
    }
    if hints.strict {
        prompt.push_str(
            "\n\nYour previous answer could not be parsed. Reply with exactly one JSON object \
             matching the format, with no markdown, comments or explanations.",
        );
    }
    prompt
}
