use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let records = state.nutrition.snapshot().len();
    Json(json!({
        "message": "Enhanced Indian Diet Recommendation API with Nutrition Database is running.",
        "features": [
            "RAG-based diet suggestions",
            "Comprehensive nutrition database integration",
            "Multi-model LLM responses (Groq + Gemini)",
            "Weather-based food suggestions",
            "Nutrition facts lookup and comparison",
            "Recipe suggestions with nutrition info",
            "Regional cuisine preferences",
            "Full meal nutritional analysis",
        ],
        "usage": "Use POST /chat for conversational AI or POST /analyze-meal for meal analysis.",
        "nutrition_database_records": records,
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let table = state.nutrition.snapshot();
    let components = json!({
        "nutrition_database": !table.is_empty(),
        "knowledge_base": state.knowledge_docs > 0,
        "completion_model": true,
        "groq_api": state.groq_configured,
        "weather_api": state.weather_configured,
    });

    let critical = ["nutrition_database", "knowledge_base", "completion_model"];
    let healthy = critical
        .iter()
        .all(|name| components[name].as_bool().unwrap_or(false));

    Json(json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "components": components,
        "database_stats": {
            "nutrition_records": table.len(),
            "active_sessions": state.sessions.active_count().await,
        },
    }))
}

pub async fn popular_queries(State(state): State<AppState>) -> Json<Value> {
    let table = state.nutrition.snapshot();
    let (categories, _) = table.categories();
    Json(json!({
        "active_sessions": state.sessions.active_count().await,
        "total_nutrition_records": table.len(),
        "database_categories": categories.len(),
        "note": "Detailed analytics would require persistent storage and proper tracking",
    }))
}
