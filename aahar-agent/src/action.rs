use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// The raw JSON shape the planner model is asked to emit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDecision {
    #[serde(default)]
    pub thought: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<Value>,
    #[serde(default)]
    pub final_answer: Option<String>,
}

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("decision names neither a tool nor a final answer")]
    Empty,
    #[error("invalid arguments for tool '{tool}': {source}")]
    InvalidArgs {
        tool: String,
        source: serde_json::Error,
    },
}

/// A validated planner decision: either invoke one tool or finish the turn.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentDecision {
    Act {
        thought: Option<String>,
        invocation: ToolInvocation,
    },
    Finish {
        thought: Option<String>,
        answer: String,
    },
}

impl AgentDecision {
    /// A `final_answer` wins over a simultaneously-present tool name.
    pub fn from_raw(raw: RawDecision) -> Result<Self, DecisionError> {
        if let Some(answer) = raw.final_answer {
            return Ok(AgentDecision::Finish {
                thought: raw.thought,
                answer,
            });
        }

        let Some(tool_name) = raw.tool_name else {
            return Err(DecisionError::Empty);
        };

        let input = raw.tool_input.unwrap_or_else(|| json!({}));
        let invocation = ToolInvocation::decode(&tool_name, input)?;
        Ok(AgentDecision::Act {
            thought: raw.thought,
            invocation,
        })
    }
}

/// One tagged variant per tool, each carrying its own typed parameter
/// record. An unrecognized name is preserved so the loop can report it.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    HandleGreeting,
    HandleIdentity,
    ReformatDietPlan(PlanRequest),
    GenerateDietPlan(PlanRequest),
    FetchRecipe(RecipeArgs),
    LookupNutritionFacts(NutritionFactsArgs),
    CompareNutrition(ComparisonArgs),
    WeatherSuggestion(WeatherArgs),
    Unknown(String),
}

impl ToolInvocation {
    pub fn decode(tool_name: &str, input: Value) -> Result<Self, DecisionError> {
        let args = |source| DecisionError::InvalidArgs {
            tool: tool_name.to_string(),
            source,
        };
        Ok(match tool_name {
            "handle_greeting" => ToolInvocation::HandleGreeting,
            "handle_identity" => ToolInvocation::HandleIdentity,
            "reformat_diet_plan" => {
                ToolInvocation::ReformatDietPlan(serde_json::from_value(input).map_err(args)?)
            }
            "generate_diet_plan" => {
                ToolInvocation::GenerateDietPlan(serde_json::from_value(input).map_err(args)?)
            }
            "fetch_recipe" => {
                ToolInvocation::FetchRecipe(serde_json::from_value(input).map_err(args)?)
            }
            "lookup_nutrition_facts" => {
                ToolInvocation::LookupNutritionFacts(serde_json::from_value(input).map_err(args)?)
            }
            "get_nutrition_comparison" => {
                ToolInvocation::CompareNutrition(serde_json::from_value(input).map_err(args)?)
            }
            "get_weather_based_suggestion" => {
                ToolInvocation::WeatherSuggestion(serde_json::from_value(input).map_err(args)?)
            }
            other => ToolInvocation::Unknown(other.to_string()),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            ToolInvocation::HandleGreeting => "handle_greeting",
            ToolInvocation::HandleIdentity => "handle_identity",
            ToolInvocation::ReformatDietPlan(_) => "reformat_diet_plan",
            ToolInvocation::GenerateDietPlan(_) => "generate_diet_plan",
            ToolInvocation::FetchRecipe(_) => "fetch_recipe",
            ToolInvocation::LookupNutritionFacts(_) => "lookup_nutrition_facts",
            ToolInvocation::CompareNutrition(_) => "get_nutrition_comparison",
            ToolInvocation::WeatherSuggestion(_) => "get_weather_based_suggestion",
            ToolInvocation::Unknown(name) => name,
        }
    }

    /// Arguments in the wire shape the registry dispatches on. Validity is
    /// guaranteed: the record was decoded from the planner's JSON already.
    pub fn args_value(&self) -> Value {
        match self {
            ToolInvocation::HandleGreeting
            | ToolInvocation::HandleIdentity
            | ToolInvocation::Unknown(_) => json!({}),
            ToolInvocation::ReformatDietPlan(args) | ToolInvocation::GenerateDietPlan(args) => {
                serde_json::to_value(args).unwrap_or_else(|_| json!({}))
            }
            ToolInvocation::FetchRecipe(args) => {
                serde_json::to_value(args).unwrap_or_else(|_| json!({}))
            }
            ToolInvocation::LookupNutritionFacts(args) => {
                serde_json::to_value(args).unwrap_or_else(|_| json!({}))
            }
            ToolInvocation::CompareNutrition(args) => {
                serde_json::to_value(args).unwrap_or_else(|_| json!({}))
            }
            ToolInvocation::WeatherSuggestion(args) => {
                serde_json::to_value(args).unwrap_or_else(|_| json!({}))
            }
        }
    }
}

/// Preferences for diet-plan generation and reformatting.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PlanRequest {
    #[serde(default = "default_dietary_type")]
    pub dietary_type: String,
    #[serde(default = "default_goal")]
    pub goal: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub wants_table: bool,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            dietary_type: default_dietary_type(),
            goal: default_goal(),
            region: default_region(),
            wants_table: false,
        }
    }
}

impl PlanRequest {
    /// Fill any field the planner left at its default from query keywords.
    pub fn refine_from_query(mut self, query: &str) -> Self {
        if self.dietary_type == default_dietary_type() {
            self.dietary_type = crate::query::extract_diet_preference(query).to_string();
        }
        if self.goal == default_goal() {
            self.goal = crate::query::extract_diet_goal(query).to_string();
        }
        if self.region == default_region() {
            self.region = crate::query::extract_region(query).to_string();
        }
        self.wants_table = self.wants_table || crate::query::wants_table(query);
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RecipeArgs {
    #[serde(default = "default_unknown")]
    pub recipe_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NutritionFactsArgs {
    #[serde(default = "default_unknown")]
    pub food_item: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ComparisonArgs {
    #[serde(default)]
    pub food_items: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct WeatherArgs {
    #[serde(default)]
    pub city: Option<String>,
}

fn default_dietary_type() -> String {
    "any".to_string()
}

fn default_goal() -> String {
    "diet".to_string()
}

fn default_region() -> String {
    "Indian".to_string()
}

fn default_unknown() -> String {
    "unknown".to_string()
}
