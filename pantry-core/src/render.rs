//! Plain-text rendering for the console.

use crate::types::{IngredientSelection, Recipe, RecipeBatch};

pub fn render_selection(selection: &IngredientSelection) -> String {
    let mut out = String::from("Selected ingredients (from the catalog):\n");
    for name in selection.iter() {
        out.push_str(&format!(" - {}\n", name));
    }
    out
}

/// Numbered list of titles; numbers are the positions the review loop accepts.
pub fn render_title_list(batch: &RecipeBatch) -> String {
    let mut out = String::from("Available recipes:\n");
    for (i, recipe) in batch.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, recipe.title));
    }
    out
}

/// Title, ingredients (with amounts when known) and numbered steps.
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = format!("\n== {} ==\n\nIngredients:\n", recipe.title);
    for ingredient in &recipe.ingredients_used {
        match recipe.quantity_for(ingredient) {
            Some(amount) => out.push_str(&format!(" - {} ({})\n", ingredient, amount)),
            None => out.push_str(&format!(" - {}\n", ingredient)),
        }
    }

    out.push_str("\nInstructions:\n");
    for (i, step) in recipe.instructions.iter().enumerate() {
        out.push_str(&format!(" {}. {}\n", i + 1, step));
    }
    out
}
