use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::ai::AiError;
use crate::contract::SchemaKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog contains no records")]
    Empty,

    #[error("None of the {records} catalog records carries a usable name")]
    NoUsableNames { records: usize },
}

/// The provider answered, but not with a well-formed object of the expected shape.
///
/// `raw` holds the untouched response text for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed {schema} response: {reason}")]
pub struct ParseError {
    pub schema: SchemaKind,
    pub reason: String,
    pub raw: String,
}

impl ParseError {
    pub(crate) fn new(schema: SchemaKind, reason: impl Into<String>, raw: &str) -> Self {
        Self {
            schema,
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

/// A recipe that referenced ingredients outside its selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeOffense {
    /// 1-based position in the batch.
    pub position: usize,
    pub title: String,
    pub unknown: Vec<String>,
}

/// Well-formed output that breaks a domain rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    #[error("Expected between {min} and {max} ingredients, got {count}")]
    Cardinality { count: usize, min: usize, max: usize },

    #[error("Ingredients not in the catalog: {}", names.join(", "))]
    UnknownIngredients { names: Vec<String> },

    #[error("{} recipe(s) use ingredients outside the selection", offenders.len())]
    UnknownRecipeIngredients { offenders: Vec<RecipeOffense> },
}

impl ConstraintViolation {
    /// Names the provider should be told not to use again.
    pub fn rejected_names(&self) -> Vec<String> {
        match self {
            Self::Cardinality { .. } => Vec::new(),
            Self::UnknownIngredients { names } => names.clone(),
            Self::UnknownRecipeIngredients { offenders } => {
                let mut names: Vec<String> = Vec::new();
                for name in offenders.iter().flat_map(|o| o.unknown.iter()) {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
                names
            }
        }
    }
}

/// Failure of a single generation stage.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Provider(#[from] AiError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),
}

/// Which of the two generation calls a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Selection,
    Generation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Selection => write!(f, "ingredient selection"),
            Stage::Generation => write!(f, "recipe generation"),
        }
    }
}

#[derive(Error, Debug)]
#[error("{stage} failed after {attempts} attempt(s): {source}")]
pub struct PipelineError {
    pub stage: Stage,
    pub attempts: u32,
    #[source]
    pub source: StageError,
}

impl PipelineError {
    pub fn is_provider_failure(&self) -> bool {
        matches!(self.source, StageError::Provider(_))
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        match &self.source {
            StageError::Parse(e) => Some(e),
            _ => None,
        }
    }

    pub fn constraint_violation(&self) -> Option<&ConstraintViolation> {
        match &self.source {
            StageError::Constraint(v) => Some(v),
            _ => None,
        }
    }
}
