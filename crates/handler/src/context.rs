use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-invocation context supplied by the host.
///
/// Not consulted by the report logic; the request id only tags log lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    request_id: String,
}

impl InvocationContext {
    /// Context for a run started now, with a fresh time-ordered request id.
    pub fn new() -> Self {
        Self::with_request_id(Uuid::now_v7().to_string())
    }

    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}
