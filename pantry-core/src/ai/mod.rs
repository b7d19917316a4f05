//! AI client module: the completion boundary and the two generation stages.
//!
//! This module provides:
//! - `AiClient` trait for abstracting completion providers
//! - `OpenAiClient` for OpenAI-compatible endpoints, configured from the environment
//! - `FakeAiClient`, a scripted client for tests
//! - The selection and generation stages and their prompt templates
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENAI_API_KEY` (required): API key
//! - `PANTRY_AI_MODEL` (optional): Model name, e.g., "gpt-4.1-mini"
//! - `PANTRY_AI_BASE_URL` (optional): API base URL
//! - `PANTRY_AI_MAX_TOKENS` (optional): Completion token cap
//!
//! # Example
//!
//! ```ignore
//! use pantry_core::ai::{select_ingredients, OpenAiClient};
//!
//! let client = OpenAiClient::from_env()?;
//! let selection = select_ingredients(&client, &preference, &allowed).await?;
//! ```

mod client;
mod config;
mod fake;
mod generate_recipes;
pub mod prompts;
mod select_ingredients;
mod types;

pub use client::{AiClient, AiError, OpenAiClient};
pub use config::{AiConfig, ConfigError};
pub use fake::FakeAiClient;
pub use generate_recipes::{
    check_vocabulary, generate_recipes, generate_recipes_with_hints, GENERATION_TEMPERATURE,
    RECIPE_COUNT,
};
pub use prompts::generate_recipes::GENERATE_RECIPES_PROMPT_NAME;
pub use prompts::select_ingredients::SELECT_INGREDIENTS_PROMPT_NAME;
pub use prompts::PromptHints;
pub use select_ingredients::{
    select_ingredients, select_ingredients_with_hints, SELECTION_TEMPERATURE,
};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};
