pub mod ai;
pub mod catalog;
pub mod contract;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod review;
pub mod types;

pub use ai::{generate_recipes, select_ingredients, AiClient, AiError, FakeAiClient, OpenAiClient};
pub use catalog::{AllowedNameSet, CatalogEntry};
pub use contract::{parse, SchemaKind, StructuredObject};
pub use error::{
    CatalogError, ConstraintViolation, ParseError, PipelineError, RecipeOffense, Stage, StageError,
};
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutcome};
pub use review::{resolve, run_review_loop, Resolution, ReviewSession, ReviewState, ReviewStep};
pub use types::{IngredientSelection, PreferenceStatement, Recipe, RecipeBatch};
