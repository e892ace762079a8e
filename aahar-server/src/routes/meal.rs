use std::collections::{BTreeMap, HashMap};

use aahar_agent::meal_analysis_prompt;
use aahar_core::LlmRequest;
use aahar_nutrition::{NutritionRecord, NutritionTable};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

const ANALYSIS_TEMPERATURE: f32 = 0.5;

const NOTHING_FOUND_ANALYSIS: &str =
    "No dishes from your list were found in our database. We are unable to provide an analysis.";

const ANALYSIS_FAILED: &str =
    "An error occurred while generating the AI analysis for this meal.";

#[derive(Debug, Deserialize)]
pub struct MealAnalysisRequest {
    pub dish_names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MealAnalysisResponse {
    pub analysis: String,
    pub totals: BTreeMap<String, f64>,
    pub found_dishes: Vec<NutritionRecord>,
    pub not_found_dishes: Vec<String>,
}

/// Match each dish against the dataset, aggregate the numeric columns, and
/// ask the completion model for a short analysis of the identified items.
pub async fn analyze_meal(
    State(state): State<AppState>,
    Json(request): Json<MealAnalysisRequest>,
) -> Result<Json<MealAnalysisResponse>, ApiError> {
    if request.dish_names.is_empty() {
        return Err(ApiError::BadRequest(
            "The 'dish_names' list cannot be empty.".to_string(),
        ));
    }

    tracing::info!(dishes = ?request.dish_names, "analyzing meal");

    let table = state.nutrition.snapshot();
    let mut found: Vec<NutritionRecord> = Vec::new();
    let mut not_found: Vec<String> = Vec::new();
    for dish in &request.dish_names {
        match table.search(dish, 1).first() {
            Some(record) => found.push((*record).clone()),
            None => not_found.push(dish.clone()),
        }
    }

    if found.is_empty() {
        return Ok(Json(MealAnalysisResponse {
            analysis: NOTHING_FOUND_ANALYSIS.to_string(),
            totals: BTreeMap::new(),
            found_dishes: Vec::new(),
            not_found_dishes: not_found,
        }));
    }

    let refs: Vec<&NutritionRecord> = found.iter().collect();
    let totals = NutritionTable::meal_totals(&refs);

    let dish_list = found
        .iter()
        .map(|record| format!("- {}", record.dish_name))
        .collect::<Vec<_>>()
        .join("\n");
    let totals_summary = serde_json::to_string_pretty(&totals).unwrap_or_default();
    let not_found_list = if not_found.is_empty() {
        "None".to_string()
    } else {
        not_found.join(", ")
    };

    let vars: HashMap<&str, String> = [
        ("dish_list", dish_list),
        ("totals_summary", totals_summary),
        ("not_found_list", not_found_list),
    ]
    .into_iter()
    .collect();

    let analysis = match meal_analysis_prompt().render(&vars) {
        Ok(rendered) => {
            let request = LlmRequest::prompt(state.model_name.clone(), rendered)
                .with_temperature(ANALYSIS_TEMPERATURE);
            match state.model.complete(request).await {
                Ok(response) => response.content.trim().to_string(),
                Err(err) => {
                    tracing::error!(error = %err, "meal analysis completion failed");
                    ANALYSIS_FAILED.to_string()
                }
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "meal analysis prompt failed to render");
            ANALYSIS_FAILED.to_string()
        }
    };

    Ok(Json(MealAnalysisResponse {
        analysis,
        totals,
        found_dishes: found,
        not_found_dishes: not_found,
    }))
}
