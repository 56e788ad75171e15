//! Scripted transport - replays queued replies and failures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use buddy_core::{async_trait, ChatRequest, GenerateRequest, ProviderFailure, Transport};

type Reply = Result<Option<String>, ProviderFailure>;

/// A transport that replays a script of replies, then a fallback.
///
/// Both call shapes share one script. Every request is recorded so tests
/// can assert on what was sent and how many calls were made.
#[derive(Debug)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    calls: AtomicUsize,
    chat_requests: Mutex<Vec<ChatRequest>>,
    generate_requests: Mutex<Vec<GenerateRequest>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedTransport {
    /// An empty script that replies with no text once exhausted.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Ok(None),
            calls: AtomicUsize::new(0),
            chat_requests: Mutex::new(Vec::new()),
            generate_requests: Mutex::new(Vec::new()),
        }
    }

    /// A transport that always replies with `text`.
    pub fn always_reply(text: impl Into<String>) -> Self {
        Self::new().otherwise(Ok(Some(text.into())))
    }

    /// A transport that always fails with `failure`.
    pub fn always_fail(failure: impl Into<ProviderFailure>) -> Self {
        Self::new().otherwise(Err(failure.into()))
    }

    /// Queue a successful reply.
    pub fn then_reply(self, text: impl Into<String>) -> Self {
        self.then(Ok(Some(text.into())))
    }

    /// Queue a success with no text.
    pub fn then_empty(self) -> Self {
        self.then(Ok(None))
    }

    /// Queue a failure.
    pub fn then_fail(self, failure: impl Into<ProviderFailure>) -> Self {
        self.then(Err(failure.into()))
    }

    /// Queue an arbitrary result.
    pub fn then(self, reply: Reply) -> Self {
        lock(&self.script).push_back(reply);
        self
    }

    /// Set the result returned once the script is exhausted.
    pub fn otherwise(mut self, reply: Reply) -> Self {
        self.fallback = reply;
        self
    }

    /// Total calls across both call shapes.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Chat requests received, in order.
    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        lock(&self.chat_requests).clone()
    }

    /// Generate requests received, in order.
    pub fn generate_requests(&self) -> Vec<GenerateRequest> {
        lock(&self.generate_requests).clone()
    }

    fn next_reply(&self) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn chat(&self, request: &ChatRequest) -> Result<Option<String>, ProviderFailure> {
        lock(&self.chat_requests).push(request.clone());
        self.next_reply()
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, ProviderFailure> {
        lock(&self.generate_requests).push(request.clone());
        self.next_reply()
    }

    fn name(&self) -> &str {
        "ScriptedTransport"
    }
}
