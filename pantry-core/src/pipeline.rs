//! Select → Generate orchestration.
//!
//! The two stages run strictly in sequence. On failure the orchestrator
//! decides whether another attempt makes sense, and with which hints:
//!
//! | failure                 | retry?                              |
//! |-------------------------|-------------------------------------|
//! | provider                | never, surfaced immediately         |
//! | parse                   | yes, with stricter format wording   |
//! | constraint violation    | yes, listing the rejected names     |
//!
//! With the default of one attempt per stage nothing is retried.

use std::env;

use crate::ai::{
    generate_recipes_with_hints, select_ingredients_with_hints, AiClient, ConfigError,
    PromptHints,
};
use crate::catalog::AllowedNameSet;
use crate::error::{PipelineError, Stage, StageError};
use crate::types::{IngredientSelection, PreferenceStatement, RecipeBatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Attempts per stage, at least 1.
    pub stage_attempts: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { stage_attempts: 1 }
    }
}

impl PipelineConfig {
    /// Optional:
    /// - `PANTRY_STAGE_ATTEMPTS`: attempts per stage (default: 1, no retry)
    pub fn from_env() -> Result<Self, ConfigError> {
        let stage_attempts = match env::var("PANTRY_STAGE_ATTEMPTS") {
            Ok(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "PANTRY_STAGE_ATTEMPTS".to_string(),
                    value: v.clone(),
                })?,
            Err(_) => 1,
        };

        Ok(Self { stage_attempts })
    }
}

/// Hints for another attempt after `error`, or `None` if retrying cannot help.
pub fn retry_hints(error: &StageError) -> Option<PromptHints> {
    match error {
        StageError::Provider(_) => None,
        StageError::Parse(_) => Some(PromptHints {
            strict: true,
            rejected: Vec::new(),
        }),
        StageError::Constraint(violation) => Some(PromptHints {
            strict: false,
            rejected: violation.rejected_names(),
        }),
    }
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub selection: IngredientSelection,
    pub batch: RecipeBatch,
}

pub struct Pipeline<'a> {
    ai_client: &'a dyn AiClient,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(ai_client: &'a dyn AiClient, config: PipelineConfig) -> Self {
        Self { ai_client, config }
    }

    pub async fn select(
        &self,
        preference: &PreferenceStatement,
        allowed: &AllowedNameSet,
    ) -> Result<IngredientSelection, PipelineError> {
        let mut hints = PromptHints::default();
        let mut attempt = 1;

        loop {
            match select_ingredients_with_hints(self.ai_client, preference, allowed, &hints).await
            {
                Ok(selection) => return Ok(selection),
                Err(error) => {
                    hints.merge(self.next_attempt(Stage::Selection, attempt, error)?);
                    attempt += 1;
                }
            }
        }
    }

    pub async fn generate(
        &self,
        selection: &IngredientSelection,
    ) -> Result<RecipeBatch, PipelineError> {
        let mut hints = PromptHints::default();
        let mut attempt = 1;

        loop {
            match generate_recipes_with_hints(self.ai_client, selection, &hints).await {
                Ok(batch) => return Ok(batch),
                Err(error) => {
                    hints.merge(self.next_attempt(Stage::Generation, attempt, error)?);
                    attempt += 1;
                }
            }
        }
    }

    /// Selection followed by generation.
    pub async fn run(
        &self,
        preference: &PreferenceStatement,
        allowed: &AllowedNameSet,
    ) -> Result<PipelineOutcome, PipelineError> {
        let selection = self.select(preference, allowed).await?;
        let batch = self.generate(&selection).await?;
        Ok(PipelineOutcome { selection, batch })
    }

    /// Either hints for the next attempt, or the final error.
    fn next_attempt(
        &self,
        stage: Stage,
        attempt: u32,
        error: StageError,
    ) -> Result<PromptHints, PipelineError> {
        let hints = if attempt < self.config.stage_attempts.max(1) {
            retry_hints(&error)
        } else {
            None
        };

        match hints {
            Some(hints) => {
                tracing::warn!(
                    stage = %stage,
                    attempt = attempt,
                    error = %error,
                    "Stage output rejected, retrying"
                );
                Ok(hints)
            }
            None => Err(PipelineError {
                stage,
                attempts: attempt,
                source: error,
            }),
        }
    }
}
