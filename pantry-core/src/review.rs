//! Interactive review of a generated batch.
//!
//! The user types selection expressions until `none`:
//! - `none` ends the session,
//! - `all` shows every recipe in batch order,
//! - anything else is split on commas and each token that is a 1-based
//!   position inside the batch is kept, in the order typed (repeats included).
//!
//! Tokens that are not digits or fall outside the batch are dropped without
//! complaint, so bad input simply shows fewer (or no) recipes.

use std::io::{self, BufRead, Write};

use crate::render::render_recipe;
use crate::types::{Recipe, RecipeBatch};

pub const REVIEW_PROMPT: &str = "\nWhich recipe(s) do you want to see?\n\
    Enter numbers (e.g. 1,3) or 'all', enter 'none' to stop:\n> ";

/// Meaning of one selection expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Terminate,
    /// 0-based indices into the batch.
    Show(Vec<usize>),
}

/// Resolve an expression against a batch of `batch_len` recipes.
pub fn resolve(expression: &str, batch_len: usize) -> Resolution {
    let expression = expression.trim().to_lowercase();

    match expression.as_str() {
        "none" => Resolution::Terminate,
        "all" => Resolution::Show((0..batch_len).collect()),
        _ => Resolution::Show(
            expression
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
                .filter_map(|token| token.parse::<usize>().ok())
                .filter_map(|position| position.checked_sub(1))
                .filter(|&index| index < batch_len)
                .collect(),
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    AwaitingInput,
    Terminated,
}

/// Outcome of submitting one expression.
#[derive(Debug, PartialEq, Eq)]
pub enum ReviewStep<'a> {
    /// Recipes to render; the session is waiting for input again afterwards.
    Resolved(Vec<&'a Recipe>),
    Terminated,
}

/// Review state machine over a single batch.
#[derive(Debug)]
pub struct ReviewSession<'a> {
    batch: &'a RecipeBatch,
    state: ReviewState,
}

impl<'a> ReviewSession<'a> {
    pub fn new(batch: &'a RecipeBatch) -> Self {
        Self {
            batch,
            state: ReviewState::AwaitingInput,
        }
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    /// Feed one expression. Once terminated, every further call stays terminated.
    pub fn submit(&mut self, expression: &str) -> ReviewStep<'a> {
        if self.state == ReviewState::Terminated {
            return ReviewStep::Terminated;
        }

        match resolve(expression, self.batch.len()) {
            Resolution::Terminate => {
                self.state = ReviewState::Terminated;
                ReviewStep::Terminated
            }
            Resolution::Show(indices) => {
                let recipes = self.batch.as_slice();
                ReviewStep::Resolved(indices.into_iter().map(|i| &recipes[i]).collect())
            }
        }
    }
}

/// Prompt, read and render until `none` or end of input.
pub fn run_review_loop<R: BufRead, W: Write>(
    batch: &RecipeBatch,
    mut input: R,
    output: &mut W,
) -> io::Result<()> {
    let mut session = ReviewSession::new(batch);
    let mut line = String::new();

    while session.state() == ReviewState::AwaitingInput {
        output.write_all(REVIEW_PROMPT.as_bytes())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::debug!("Input closed, ending review");
            break;
        }

        if let ReviewStep::Resolved(recipes) = session.submit(&line) {
            for recipe in recipes {
                output.write_all(render_recipe(recipe).as_bytes())?;
            }
        }
    }

    Ok(())
}
