use std::sync::Arc;

use aahar_core::{RequestContext, Tool, ToolError};
use aahar_nutrition::{format_record, NutritionHandle};
use serde_json::Value;

use crate::action::NutritionFactsArgs;

const NON_VEG_VS_VEG: &str = r#"**Comparing Non-Vegetarian vs. Vegetarian Nutrition:**

**Non-Vegetarian (e.g., Chicken Breast - 100g cooked):**
- Calories: ~165 kcal
- Protein: ~31g (complete protein with all essential amino acids)
- Fat: ~3.6g (low in saturated fat if skinless)
- Carbs: 0g
- Key nutrients: B vitamins (B12, niacin), iron (heme), zinc, selenium

**Vegetarian Protein Sources:**

*Lentils (100g cooked):*
- Calories: ~116 kcal
- Protein: ~9g (incomplete, but becomes complete when paired with grains)
- Fat: ~0.4g (very low)
- Carbs: ~20g
- Key nutrients: Fiber (8g), folate, potassium, iron (non-heme), magnesium

*Paneer (100g):*
- Calories: ~265 kcal
- Protein: ~18g (complete protein)
- Fat: ~20g (higher in saturated fat)
- Carbs: ~1.2g
- Key nutrients: Calcium (208mg), phosphorus, Vitamin B12

**Summary:** Non-vegetarian options provide complete proteins and better iron/B12 bioavailability. Vegetarian diets excel in fiber, diverse micronutrients, and can be lower in saturated fat. Both can meet nutritional needs with proper planning."#;

pub struct NutritionFactsTool {
    nutrition: Arc<NutritionHandle>,
}

impl NutritionFactsTool {
    pub fn new(nutrition: Arc<NutritionHandle>) -> Self {
        Self { nutrition }
    }
}

#[async_trait::async_trait]
impl Tool for NutritionFactsTool {
    fn name(&self) -> &str {
        "lookup_nutrition_facts"
    }

    fn description(&self) -> &str {
        "Look up detailed nutrition facts from the database. Input: `food_item`"
    }

    async fn execute(&self, args: Value, _ctx: &RequestContext) -> Result<String, ToolError> {
        let args: NutritionFactsArgs = serde_json::from_value(args)?;
        tracing::info!(food_item = %args.food_item, "looking up nutrition facts");

        let table = self.nutrition.snapshot();
        let matches = table.search(&args.food_item, 3);
        if !matches.is_empty() {
            let mut result = format!(
                "**Detailed Nutrition Information for '{}':**\n\n",
                args.food_item
            );
            for (idx, record) in matches.iter().enumerate() {
                result.push_str(&format!(
                    "**Option {}:** {}\n\n",
                    idx + 1,
                    format_record(record)
                ));
            }
            return Ok(result);
        }

        let cleaned = args.food_item.to_lowercase();
        if cleaned.contains("non veg vs veg") || cleaned.contains("non-veg vs veg") {
            return Ok(NON_VEG_VS_VEG.to_string());
        }

        Ok(format!(
            "Specific nutrition data for '{}' not found in our database. For accurate nutrition information, please specify a common Indian food item or dish name.",
            args.food_item
        ))
    }
}
