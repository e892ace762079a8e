use serde::{Deserialize, Deserializer, Serialize};

/// The seven aggregatable columns, in dataset order.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    "Calories (kcal)",
    "Protein (g)",
    "Carbs (g)",
    "Sugar (g)",
    "Fat (g)",
    "Fiber (g)",
    "Sodium (mg)",
];

/// One dataset row. Field names mirror the dataset's JSON keys exactly so
/// records round-trip through the HTTP surface unchanged.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NutritionRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Dish Name")]
    pub dish_name: String,
    #[serde(rename = "Region", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(
        rename = "Serving Size",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub serving_size: Option<String>,
    #[serde(
        rename = "Calories (kcal)",
        default,
        deserialize_with = "lenient_number"
    )]
    pub calories: Option<f64>,
    #[serde(rename = "Protein (g)", default, deserialize_with = "lenient_number")]
    pub protein: Option<f64>,
    #[serde(rename = "Carbs (g)", default, deserialize_with = "lenient_number")]
    pub carbs: Option<f64>,
    #[serde(rename = "Sugar (g)", default, deserialize_with = "lenient_number")]
    pub sugar: Option<f64>,
    #[serde(rename = "Fat (g)", default, deserialize_with = "lenient_number")]
    pub fat: Option<f64>,
    #[serde(rename = "Fiber (g)", default, deserialize_with = "lenient_number")]
    pub fiber: Option<f64>,
    #[serde(rename = "Sodium (mg)", default, deserialize_with = "lenient_number")]
    pub sodium: Option<f64>,
    #[serde(
        rename = "Key Vitamins & Minerals",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vitamins: Option<String>,
}

impl NutritionRecord {
    /// Values in `NUMERIC_COLUMNS` order.
    pub fn numeric_values(&self) -> [Option<f64>; 7] {
        [
            self.calories,
            self.protein,
            self.carbs,
            self.sugar,
            self.fat,
            self.fiber,
            self.sodium,
        ]
    }

    /// Lowercased dish name + category, the haystack for fuzzy matching.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {}",
            self.dish_name.to_lowercase(),
            self.category.to_lowercase()
        )
    }
}

/// Accepts numbers, numeric strings, or junk; junk coerces to `None`
/// instead of failing the whole dataset load.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        let record: NutritionRecord = serde_json::from_str(
            r#"{"Category": "Rice & Grains", "Dish Name": "Cooked Rice (White)",
                "Calories (kcal)": 205, "Protein (g)": "4.3", "Carbs (g)": "n/a"}"#,
        )
        .unwrap();
        assert_eq!(record.calories, Some(205.0));
        assert_eq!(record.protein, Some(4.3));
        assert_eq!(record.carbs, None);
    }

    #[test]
    fn serializes_with_dataset_keys() {
        let record: NutritionRecord = serde_json::from_str(
            r#"{"Category": "Legumes & Dal", "Dish Name": "Cooked Lentils (Mixed Dal)",
                "Calories (kcal)": 230}"#,
        )
        .unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Dish Name"], "Cooked Lentils (Mixed Dal)");
        assert_eq!(value["Calories (kcal)"], 230.0);
    }
}
