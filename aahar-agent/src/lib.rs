mod action;
mod engine;
mod executor;
mod prompts;
mod query;
mod registry;
mod scratchpad;
mod session;
pub mod tools;

pub use action::{
    AgentDecision, ComparisonArgs, DecisionError, NutritionFactsArgs, PlanRequest, RawDecision,
    RecipeArgs, ToolInvocation, WeatherArgs,
};
pub use engine::{
    parse_decision, DecisionEngine, MALFORMED_DECISION_ANSWER, NON_OBJECT_DECISION_ANSWER,
    UNREACHABLE_MODEL_ANSWER,
};
pub use executor::{AgentExecutor, FALLBACK_ANSWER, MAX_ITERATIONS};
pub use prompts::{
    meal_analysis_prompt, merge_prompt_default, merge_prompt_table, orchestrator_prompt,
    rag_prompt, weather_suggestion_prompt,
};
pub use query::{extract_diet_goal, extract_diet_preference, extract_region, wants_table};
pub use registry::{RegistryError, ToolRegistry, ToolRegistryBuilder};
pub use scratchpad::{Scratchpad, ScratchpadEntry};
pub use session::{ConversationTurn, SessionStore, TurnRole};
