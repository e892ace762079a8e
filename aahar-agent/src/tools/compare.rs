use std::sync::Arc;

use aahar_core::{RequestContext, Tool, ToolError};
use aahar_nutrition::{format_record, NutritionHandle};
use serde_json::Value;

use crate::action::ComparisonArgs;

/// At most this many items per comparison.
pub const COMPARISON_LIMIT: usize = 5;

pub struct ComparisonTool {
    nutrition: Arc<NutritionHandle>,
}

impl ComparisonTool {
    pub fn new(nutrition: Arc<NutritionHandle>) -> Self {
        Self { nutrition }
    }
}

#[async_trait::async_trait]
impl Tool for ComparisonTool {
    fn name(&self) -> &str {
        "get_nutrition_comparison"
    }

    fn description(&self) -> &str {
        "Compare nutrition between multiple food items. Input: `food_items` (list of food names)"
    }

    async fn execute(&self, args: Value, _ctx: &RequestContext) -> Result<String, ToolError> {
        let args: ComparisonArgs = serde_json::from_value(args)?;
        tracing::info!(items = ?args.food_items, "comparing nutrition");

        if args.food_items.len() < 2 {
            return Ok("Please provide at least 2 food items for comparison.".to_string());
        }

        let table = self.nutrition.snapshot();
        let separator = "=".repeat(50);
        let mut result = String::from("**Nutrition Comparison:**\n\n");
        for item in args.food_items.iter().take(COMPARISON_LIMIT) {
            match table.search(item, 1).first() {
                Some(record) => {
                    result.push_str(&format_record(record));
                    result.push('\n');
                }
                None => {
                    result.push_str(&format!("**{item}:** Nutrition data not available\n"));
                }
            }
            result.push_str(&separator);
            result.push('\n');
        }

        Ok(result)
    }
}
