use std::collections::HashMap;
use std::sync::Arc;

use aahar_core::{CompletionModel, LlmRequest, PromptTemplate};
use regex::Regex;

use crate::action::{AgentDecision, DecisionError, RawDecision};
use crate::prompts::orchestrator_prompt;

/// Shown when the planner's output could not be parsed or validated.
pub const MALFORMED_DECISION_ANSWER: &str =
    "An internal system error occurred while processing the AI's decision. Please try again.";

/// Shown when the planner's output was valid JSON but not a JSON object.
pub const NON_OBJECT_DECISION_ANSWER: &str =
    "An internal system error occurred due to an unexpected data format from the AI. Please try again.";

/// Shown when the planner model itself could not be reached.
pub const UNREACHABLE_MODEL_ANSWER: &str =
    "I'm experiencing a technical issue. Please try again later.";

/// Turns (history, query, scratchpad) into the next [`AgentDecision`].
///
/// This boundary is infallible by construction: a malformed model response
/// terminates the turn via a synthetic `Finish`, never via an error. There
/// is no retry against the model.
pub struct DecisionEngine {
    model: Arc<dyn CompletionModel>,
    model_name: String,
    temperature: f32,
    prompt: PromptTemplate,
    tool_catalog: String,
}

impl DecisionEngine {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        model_name: impl Into<String>,
        tool_catalog: impl Into<String>,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            temperature: 0.1,
            prompt: orchestrator_prompt(),
            tool_catalog: tool_catalog.into(),
        }
    }

    pub async fn decide(&self, chat_history: &str, query: &str, scratchpad: &str) -> AgentDecision {
        let vars: HashMap<&str, String> = [
            ("tools", self.tool_catalog.clone()),
            ("chat_history", chat_history.to_string()),
            ("query", query.to_string()),
            ("agent_scratchpad", scratchpad.to_string()),
        ]
        .into_iter()
        .collect();

        let rendered = match self.prompt.render(&vars) {
            Ok(rendered) => rendered,
            Err(err) => {
                tracing::error!(error = %err, "orchestrator prompt failed to render");
                return synthetic_finish(
                    format!("Orchestrator prompt failed to render: {err}"),
                    MALFORMED_DECISION_ANSWER,
                );
            }
        };

        let request =
            LlmRequest::prompt(self.model_name.clone(), rendered).with_temperature(self.temperature);
        let response = match self.model.complete(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "planner model unreachable");
                return synthetic_finish(
                    format!("Planner model unreachable: {err}"),
                    UNREACHABLE_MODEL_ANSWER,
                );
            }
        };

        parse_decision(&response.content)
    }
}

/// Parse a planner response: raw JSON, or JSON inside the first fenced code
/// block. Anything else becomes a synthetic terminal decision.
pub fn parse_decision(content: &str) -> AgentDecision {
    let json_str = extract_json_block(content);

    let value: serde_json::Value = match serde_json::from_str(json_str) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, raw = json_str, "planner output is not valid JSON");
            return synthetic_finish(
                format!("Planner returned invalid JSON: {err}"),
                MALFORMED_DECISION_ANSWER,
            );
        }
    };

    if !value.is_object() {
        tracing::error!(raw = json_str, "planner output is not a JSON object");
        return synthetic_finish(
            "Planner output was valid JSON but not a JSON object.".to_string(),
            NON_OBJECT_DECISION_ANSWER,
        );
    }

    let raw: RawDecision = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(error = %err, "planner output does not fit the decision shape");
            return synthetic_finish(
                format!("Planner output failed validation: {err}"),
                MALFORMED_DECISION_ANSWER,
            );
        }
    };

    match AgentDecision::from_raw(raw) {
        Ok(decision) => decision,
        Err(err @ DecisionError::Empty) => synthetic_finish(
            format!("Planner decision rejected: {err}"),
            MALFORMED_DECISION_ANSWER,
        ),
        Err(err @ DecisionError::InvalidArgs { .. }) => {
            tracing::error!(error = %err, "planner tool arguments failed validation");
            synthetic_finish(
                format!("Planner decision rejected: {err}"),
                MALFORMED_DECISION_ANSWER,
            )
        }
    }
}

fn extract_json_block(content: &str) -> &str {
    if content.contains("```") {
        // Non-greedy first fenced block, with or without a `json` tag.
        if let Ok(pattern) = Regex::new(r"(?s)```(?:json)?\s*(.*?)```") {
            if let Some(captures) = pattern.captures(content) {
                if let Some(inner) = captures.get(1) {
                    return inner.as_str().trim();
                }
            }
        }
    }
    content.trim()
}

fn synthetic_finish(thought: String, answer: &str) -> AgentDecision {
    AgentDecision::Finish {
        thought: Some(thought),
        answer: answer.to_string(),
    }
}
