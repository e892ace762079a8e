use std::sync::Arc;

use aahar_core::RequestContext;

use crate::action::{AgentDecision, ToolInvocation};
use crate::engine::DecisionEngine;
use crate::registry::ToolRegistry;
use crate::scratchpad::Scratchpad;
use crate::session::SessionStore;

/// Upper bound on planner calls for a single request.
pub const MAX_ITERATIONS: usize = 6;

/// Shown when the loop exhausts its iterations without a terminal outcome.
pub const FALLBACK_ANSWER: &str =
    "I couldn't finalize my response after several attempts. Please try rephrasing your request.";

/// Assistant turns shorter than this don't count as reformattable plans.
const SUBSTANTIAL_ANSWER_LEN: usize = 50;

/// The agent loop: plan → dispatch → record, bounded by [`MAX_ITERATIONS`].
///
/// Termination policy: a final answer, an unknown tool name, a tool error,
/// or any tool whose result ends the turn all stop the loop on that same
/// iteration. Whatever text the loop produces is appended to the session
/// alongside the query, on every path, so history always reflects what the
/// user was shown.
pub struct AgentExecutor {
    engine: DecisionEngine,
    registry: ToolRegistry,
    sessions: Arc<SessionStore>,
}

impl AgentExecutor {
    pub fn new(engine: DecisionEngine, registry: ToolRegistry, sessions: Arc<SessionStore>) -> Self {
        Self {
            engine,
            registry,
            sessions,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub async fn run(&self, session_id: &str, query: &str) -> String {
        let history = self.sessions.render_history(session_id).await;
        let last_answer = self
            .sessions
            .last_substantial_answer(session_id, SUBSTANTIAL_ANSWER_LEN)
            .await;
        let ctx = RequestContext {
            query: query.to_string(),
            history: history.clone(),
            last_answer,
        };

        let mut scratchpad = Scratchpad::new();
        let mut answer: Option<String> = None;

        for iteration in 0..MAX_ITERATIONS {
            tracing::info!(session_id, iteration = iteration + 1, "agent iteration");

            let decision = self
                .engine
                .decide(&history, query, &scratchpad.render())
                .await;

            match decision {
                AgentDecision::Finish { answer: text, .. } => {
                    tracing::info!(session_id, iteration = iteration + 1, "final answer");
                    answer = Some(text);
                    break;
                }
                AgentDecision::Act { invocation, .. } => {
                    let tool_name = invocation.name().to_string();
                    tracing::info!(session_id, tool = %tool_name, "dispatching tool");

                    if let ToolInvocation::Unknown(name) = &invocation {
                        tracing::warn!(session_id, tool = %name, "unknown tool requested");
                        answer = Some(format!("Unknown tool '{name}' requested."));
                        break;
                    }

                    let args = invocation.args_value();
                    let Some(tool) = self.registry.get(&tool_name) else {
                        tracing::warn!(session_id, tool = %tool_name, "tool not registered");
                        answer = Some(format!("Unknown tool '{tool_name}' requested."));
                        break;
                    };

                    match tool.execute(args.clone(), &ctx).await {
                        Ok(output) => {
                            if tool.ends_turn() {
                                answer = Some(output);
                                break;
                            }
                            scratchpad.push(tool_name, args, output);
                        }
                        Err(err) => {
                            tracing::error!(session_id, tool = %tool_name, error = %err, "tool failed");
                            answer = Some(format!("Error executing tool '{tool_name}': {err}"));
                            break;
                        }
                    }
                }
            }
        }

        let answer = answer.unwrap_or_else(|| {
            tracing::warn!(session_id, "agent loop exhausted without a terminal outcome");
            FALLBACK_ANSWER.to_string()
        });

        self.sessions
            .append_exchange(session_id, query, &answer)
            .await;
        answer
    }
}
