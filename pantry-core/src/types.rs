use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{normalize_name, AllowedNameSet};
use crate::error::ConstraintViolation;

/// Free-form description of what the user likes to eat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceStatement(String);

impl PreferenceStatement {
    /// Returns `None` for blank input.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ingredients chosen for one session, every one a catalog member.
///
/// Only constructible through [`IngredientSelection::from_catalog`], so holding
/// one means the closed-vocabulary and size checks already passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientSelection(Vec<String>);

impl IngredientSelection {
    pub const MIN: usize = 6;
    pub const MAX: usize = 10;

    /// Validate proposed names against the catalog.
    ///
    /// Names are mapped to the catalog spelling and case-insensitive repeats
    /// are collapsed, first occurrence wins. Unknown names are reported before
    /// the size check.
    pub fn from_catalog<I, S>(
        names: I,
        allowed: &AllowedNameSet,
    ) -> Result<Self, ConstraintViolation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected: Vec<String> = Vec::new();
        let mut unknown: Vec<String> = Vec::new();

        for name in names {
            let name = name.as_ref();
            match allowed.canonical(name) {
                Some(canonical) => {
                    if !selected.iter().any(|s| s == canonical) {
                        selected.push(canonical.to_string());
                    }
                }
                None => unknown.push(name.trim().to_string()),
            }
        }

        if !unknown.is_empty() {
            return Err(ConstraintViolation::UnknownIngredients { names: unknown });
        }

        if !(Self::MIN..=Self::MAX).contains(&selected.len()) {
            return Err(ConstraintViolation::Cardinality {
                count: selected.len(),
                min: Self::MIN,
                max: Self::MAX,
            });
        }

        Ok(Self(selected))
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = normalize_name(name);
        self.0.iter().any(|s| *s == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A generated recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients_used: Vec<String>,
    /// Optional amount per ingredient, e.g. `"salmon" -> "200 g"`.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub quantities: BTreeMap<String, String>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Amount for an ingredient, matched case-insensitively.
    pub fn quantity_for(&self, ingredient: &str) -> Option<&str> {
        let wanted = normalize_name(ingredient);
        self.quantities
            .iter()
            .find(|(name, _)| normalize_name(name) == wanted)
            .map(|(_, amount)| amount.as_str())
    }

    /// Every ingredient name this recipe mentions, including quantity keys.
    pub fn referenced_ingredients(&self) -> impl Iterator<Item = &str> {
        self.ingredients_used
            .iter()
            .chain(self.quantities.keys())
            .map(String::as_str)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<BTreeMap<String, String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Recipes from one generation call, in provider order. Display positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeBatch(Vec<Recipe>);

impl RecipeBatch {
    pub(crate) fn new(recipes: Vec<Recipe>) -> Self {
        Self(recipes)
    }

    /// Recipe at a 1-based display position.
    pub fn get(&self, position: usize) -> Option<&Recipe> {
        position.checked_sub(1).and_then(|i| self.0.get(i))
    }

    pub fn as_slice(&self) -> &[Recipe] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecipeBatch {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
