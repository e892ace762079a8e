use aahar_nutrition::{NutritionError, NutritionRecord};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

pub async fn search(
    Path(food_name): Path<String>,
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Json<Value> {
    let limit = params.limit.unwrap_or(5);
    let table = state.nutrition.snapshot();
    let results: Vec<NutritionRecord> = table
        .search(&food_name, limit)
        .into_iter()
        .cloned()
        .collect();
    Json(json!({
        "query": food_name,
        "results_found": results.len(),
        "results": results,
    }))
}

pub async fn categories(State(state): State<AppState>) -> Json<Value> {
    let table = state.nutrition.snapshot();
    if table.is_empty() {
        return Json(json!({"message": "Nutrition database not loaded or empty"}));
    }
    let (names, counts) = table.categories();
    Json(json!({
        "total_categories": names.len(),
        "categories": names,
        "items_per_category": counts,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

pub async fn dishes_by_category(
    Query(params): Query<CategoryParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<NutritionRecord>>, ApiError> {
    let table = state.nutrition.snapshot();
    if table.is_empty() {
        return Err(ApiError::ServiceUnavailable(
            "Nutrition database not loaded or empty".to_string(),
        ));
    }
    let limit = params.limit.unwrap_or(50);
    match table.dishes_in_category(&params.category, limit) {
        Some(records) => Ok(Json(records.into_iter().cloned().collect())),
        None => Err(ApiError::NotFound(format!(
            "Category '{}' not found.",
            params.category
        ))),
    }
}

#[derive(Debug, Deserialize)]
pub struct RegionalParams {
    #[serde(default)]
    pub dietary_type: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

pub async fn regional(
    Path(region): Path<String>,
    Query(params): Query<RegionalParams>,
    State(state): State<AppState>,
) -> Json<Value> {
    let dietary_type = params.dietary_type.unwrap_or_else(|| "any".to_string());
    let goal = params.goal.unwrap_or_else(|| "diet".to_string());
    let limit = params.limit.unwrap_or(10);

    let table = state.nutrition.snapshot();
    let suggestions = table.regional_suggestions(&region, &dietary_type, &goal);
    let truncated: Vec<NutritionRecord> =
        suggestions.iter().take(limit).map(|r| (*r).clone()).collect();
    Json(json!({
        "region": region,
        "dietary_type": dietary_type,
        "goal": goal,
        "suggestions_found": suggestions.len(),
        "suggestions": truncated,
    }))
}

pub async fn compare(
    State(state): State<AppState>,
    Json(food_items): Json<Vec<String>>,
) -> Result<Json<Value>, ApiError> {
    if food_items.len() < 2 {
        return Err(ApiError::BadRequest(
            "At least 2 food items required for comparison".to_string(),
        ));
    }

    let table = state.nutrition.snapshot();
    let comparison: Vec<Value> = food_items
        .iter()
        .take(5)
        .map(|item| match table.search(item, 1).first() {
            Some(record) => serde_json::to_value(record).unwrap_or_else(|_| {
                json!({"Dish Name": item, "error": "Not found in database"})
            }),
            None => json!({"Dish Name": item, "error": "Not found in database"}),
        })
        .collect();

    Ok(Json(json!({
        "comparison": comparison,
        "items_compared": comparison.len(),
    })))
}

pub async fn upload(
    State(state): State<AppState>,
    payload: String,
) -> Result<Json<Value>, ApiError> {
    match state.nutrition.replace_from_json(&payload) {
        Ok(count) => Ok(Json(json!({
            "status": "success",
            "records_loaded": count,
            "message": "Nutrition database updated successfully",
        }))),
        Err(NutritionError::Json(_)) => {
            Err(ApiError::BadRequest("Invalid JSON format".to_string()))
        }
        // Structural rejection is reported in-band, not as an HTTP failure.
        Err(NutritionError::InvalidStructure(message)) => Ok(Json(json!({
            "status": "error",
            "message": message,
        }))),
        Err(err) => Err(ApiError::Internal(format!(
            "Error updating nutrition database: {err}"
        ))),
    }
}
