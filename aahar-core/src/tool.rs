use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-request context shared by every tool invocation: the raw user query,
/// the rendered chat history, and the most recent substantial assistant
/// answer (for tools that rework a previous response).
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    pub query: String,
    pub history: String,
    pub last_answer: Option<String>,
}

#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// Whether a successful result ends the conversation turn. Every
    /// production tool answers the user directly; a tool returning `false`
    /// feeds its output back into the planner via the scratchpad instead.
    fn ends_turn(&self) -> bool {
        true
    }

    async fn execute(&self, args: Value, ctx: &RequestContext) -> Result<String, ToolError>;
}
