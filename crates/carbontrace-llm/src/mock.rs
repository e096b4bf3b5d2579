//! Mock provider for deterministic testing

use crate::LlmError;
use carbontrace_domain::traits::LlmProvider;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

#[derive(Debug, Default)]
struct MockState {
    rules: Vec<(String, MockReply)>,
    last_prompt: Option<String>,
    last_schema: Option<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// A rule matches when the prompt *contains* its key, so tests can route on
/// the activity description embedded in a larger prompt. The first matching
/// rule wins; otherwise the default response is returned.
///
/// # Examples
///
/// ```
/// use carbontrace_domain::traits::LlmProvider;
/// use carbontrace_llm::MockProvider;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut provider = MockProvider::default();
/// provider.add_response("beef", r#"{"itemName": "beef"}"#);
/// provider.add_error("unreachable");
///
/// assert!(provider.generate("ate beef").await.unwrap().contains("beef"));
/// assert!(provider.generate("unreachable provider").await.is_err());
/// assert_eq!(provider.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            delay: None,
            state: Arc::new(Mutex::new(MockState::default())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait this long before answering (for timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Return `response` for any prompt containing `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.state()
            .rules
            .push((needle.into(), MockReply::Text(response.into())));
    }

    /// Fail any prompt containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.state().rules.push((needle.into(), MockReply::Error));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    /// The most recent prompt received
    pub fn last_prompt(&self) -> Option<String> {
        self.state().last_prompt.clone()
    }

    /// The most recent schema received through `generate_structured`
    pub fn last_schema(&self) -> Option<String> {
        self.state().last_schema.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panic in another test thread must not cascade into this one
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reply_for(&self, prompt: &str, schema: Option<&str>) -> MockReply {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state();
        state.last_prompt = Some(prompt.to_string());
        if let Some(schema) = schema {
            state.last_schema = Some(schema.to_string());
        }

        state
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| MockReply::Text(self.default_response.clone()))
    }

    async fn respond(&self, reply: MockReply) -> Result<String, LlmError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error => Err(LlmError::Communication("Mock error".to_string())),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let reply = self.reply_for(prompt, None);
        self.respond(reply).await
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        let reply = self.reply_for(prompt, Some(schema));
        self.respond(reply).await
    }
}
