//! Scripted transport that never touches the network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::FetchError;
use crate::port::outbound::transport::PositionTransport;

/// A transport with a queue of canned responses.
///
/// Each call to `get_json()` pops the next response. Once the queue is
/// empty every call fails with a network error.
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<Value, FetchError>>>,
    calls: Arc<AtomicU32>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Queue a successful body.
    #[must_use]
    pub fn with_body(self, body: Value) -> Self {
        self.responses.lock().push_back(Ok(body));
        self
    }

    /// Queue a failure.
    #[must_use]
    pub fn with_error(self, error: FetchError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    /// Handle for observing the call count after the stub is moved.
    pub fn call_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PositionTransport for StubTransport {
    fn endpoint(&self) -> &str {
        "stub://position"
    }

    async fn get_json(&self) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("no scripted response".into())))
    }
}
