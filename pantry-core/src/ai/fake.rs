//! Scripted AI client for tests.
//!
//! Responses are queued per prompt name and handed out in order, so a test
//! can script a failing first attempt followed by a good retry without any
//! network access.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{AiClient, AiError, ChatRequest, ChatResponse, Usage};

type Scripted = Result<String, String>;

/// A fake AI client that replays queued responses.
///
/// Every request is recorded and can be inspected with [`FakeAiClient::requests`].
#[derive(Debug, Default)]
pub struct FakeAiClient {
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<(String, ChatRequest)>>,
}

impl FakeAiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completion for the next call with `prompt_name`.
    pub fn with_response(self, prompt_name: &str, content: impl Into<String>) -> Self {
        self.push(prompt_name, Ok(content.into()));
        self
    }

    /// Queue a provider failure for the next call with `prompt_name`.
    pub fn with_error(self, prompt_name: &str, message: impl Into<String>) -> Self {
        self.push(prompt_name, Err(message.into()));
        self
    }

    fn push(&self, prompt_name: &str, scripted: Scripted) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(prompt_name.to_string())
            .or_default()
            .push_back(scripted);
    }

    /// All requests received so far, in order, with their prompt names.
    pub fn requests(&self) -> Vec<(String, ChatRequest)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls made with `prompt_name`.
    pub fn call_count(&self, prompt_name: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(name, _)| name == prompt_name)
            .count()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((prompt_name.to_string(), request));

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(prompt_name)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Ok(content)) => Ok(ChatResponse {
                content,
                usage: Usage::default(),
            }),
            Some(Err(message)) => Err(AiError::Api(message)),
            None => Err(AiError::Api(format!(
                "FakeAiClient: No response configured for prompt {:?}",
                prompt_name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    fn request(text: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(text)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_responses_are_replayed_in_order() {
        let client = FakeAiClient::new()
            .with_response("select", "first")
            .with_response("select", "second");

        let a = client.complete("select", request("a")).await.unwrap();
        let b = client.complete("select", request("b")).await.unwrap();
        assert_eq!(a.content, "first");
        assert_eq!(b.content, "second");
        assert_eq!(client.call_count("select"), 2);
    }

    #[tokio::test]
    async fn test_unscripted_prompt_fails() {
        let client = FakeAiClient::new().with_response("select", "{}");
        let result = client.complete("generate", request("x")).await;
        assert!(matches!(result, Err(AiError::Api(_))));
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let client = FakeAiClient::new().with_error("generate", "quota exceeded");
        let err = client.complete("generate", request("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: quota exceeded");
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let client = FakeAiClient::new().with_response("select", "{}");
        client.complete("select", request("hello")).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "select");
        assert_eq!(requests[0].1.messages[0].content, "hello");
    }
}
