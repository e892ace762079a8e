use crate::record::NutritionRecord;

/// Minimal built-in dataset used when the dataset file is missing or
/// unreadable, so every lookup path stays exercisable.
pub fn fallback_records() -> Vec<NutritionRecord> {
    vec![
        NutritionRecord {
            category: "Breads & Roti".to_string(),
            dish_name: "Plain Roti / Chapati (Whole Wheat)".to_string(),
            region: Some("Pan-India".to_string()),
            serving_size: Some("1 medium".to_string()),
            calories: Some(95.0),
            protein: Some(3.0),
            carbs: Some(18.0),
            sugar: Some(0.0),
            fat: Some(1.0),
            fiber: Some(3.0),
            sodium: Some(150.0),
            vitamins: Some("Iron, Magnesium, B-Vitamins".to_string()),
        },
        NutritionRecord {
            category: "Rice & Grains".to_string(),
            dish_name: "Cooked Rice (White)".to_string(),
            region: Some("Pan-India".to_string()),
            serving_size: Some("1 cup".to_string()),
            calories: Some(205.0),
            protein: Some(4.3),
            carbs: Some(45.0),
            sugar: Some(0.1),
            fat: Some(0.4),
            fiber: Some(0.6),
            sodium: Some(2.0),
            vitamins: Some("Manganese, Selenium".to_string()),
        },
        NutritionRecord {
            category: "Legumes & Dal".to_string(),
            dish_name: "Cooked Lentils (Mixed Dal)".to_string(),
            region: Some("Pan-India".to_string()),
            serving_size: Some("1 cup".to_string()),
            calories: Some(230.0),
            protein: Some(18.0),
            carbs: Some(40.0),
            sugar: Some(4.0),
            fat: Some(0.8),
            fiber: Some(16.0),
            sodium: Some(4.0),
            vitamins: Some("Iron, Folate, Potassium, Magnesium".to_string()),
        },
    ]
}
