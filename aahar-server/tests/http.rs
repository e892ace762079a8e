use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aahar_agent::tools::production_registry;
use aahar_agent::{AgentExecutor, DecisionEngine, SessionStore};
use aahar_core::{
    AaharError, CompletionModel, EnsembleModel, LlmRequest, LlmResponse, Retriever,
    ScoredDocument, WeatherProvider, WeatherReport,
};
use aahar_nutrition::{fallback_records, NutritionHandle, NutritionTable};
use aahar_server::{app, AppState, Config};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use axum_extra::extract::cookie::Key;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
    last: String,
}

impl ScriptedModel {
    fn new(responses: &[&str]) -> Self {
        let mut queue: VecDeque<String> = responses.iter().map(|r| r.to_string()).collect();
        let last = queue
            .back()
            .cloned()
            .unwrap_or_else(|| r#"{"final_answer": "ok"}"#.to_string());
        if !queue.is_empty() {
            queue.pop_back();
        }
        Self {
            responses: Mutex::new(queue),
            last,
        }
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(&self, _request: LlmRequest) -> Result<LlmResponse, AaharError> {
        let content = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.clone());
        Ok(LlmResponse { content })
    }
}

struct EmptyRetriever;

#[async_trait]
impl Retriever for EmptyRetriever {
    async fn retrieve(
        &self,
        _query: &str,
        _top_k: usize,
    ) -> Result<Vec<ScoredDocument>, AaharError> {
        Ok(Vec::new())
    }
}

struct SilentEnsemble;

#[async_trait]
impl EnsembleModel for SilentEnsemble {
    async fn suggest(
        &self,
        _query: &str,
        _dietary_type: &str,
        _goal: &str,
        _region: &str,
    ) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

struct NoWeather;

#[async_trait]
impl WeatherProvider for NoWeather {
    async fn current(&self, _city: &str) -> Option<WeatherReport> {
        None
    }
}

fn test_config() -> Config {
    Config {
        gemini_api_key: Some("test-key".to_string()),
        groq_api_key: None,
        openweather_api_key: None,
        secret_key: "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".to_string(),
        port: 0,
        gemini_model: "mock-model".to_string(),
        nutrition_data_path: "nutrition_data.json".to_string(),
        knowledge_base_path: "knowledge_base.txt".to_string(),
        session_ttl_secs: 3600,
    }
}

fn test_state(responses: &[&str], knowledge_docs: usize) -> AppState {
    let config = Arc::new(test_config());
    let model: Arc<ScriptedModel> = Arc::new(ScriptedModel::new(responses));
    let model: Arc<dyn CompletionModel> = model;
    let nutrition = Arc::new(NutritionHandle::new(NutritionTable::from_records(
        fallback_records(),
    )));
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(3600)));
    let registry = production_registry(
        model.clone(),
        config.gemini_model.clone(),
        Arc::new(EmptyRetriever),
        Arc::new(SilentEnsemble),
        Arc::new(NoWeather),
        nutrition.clone(),
    )
    .unwrap();
    let engine = DecisionEngine::new(
        model.clone(),
        config.gemini_model.clone(),
        registry.describe(),
    );
    let executor = Arc::new(AgentExecutor::new(engine, registry, sessions.clone()));
    let cookie_key = Key::derive_from(config.secret_key.as_bytes());
    let model_name = config.gemini_model.clone();

    AppState {
        config,
        cookie_key,
        nutrition,
        sessions,
        executor,
        model,
        model_name,
        knowledge_docs,
        groq_configured: false,
        weather_configured: false,
    }
}

fn test_app(responses: &[&str]) -> Router {
    app(test_state(responses, 1))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn root_reports_capabilities() {
    let (status, body) = get_json(test_app(&[]), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nutrition_database_records"], 3);
    assert!(body["features"].as_array().unwrap().len() >= 5);
}

#[tokio::test]
async fn health_is_healthy_with_all_critical_components() {
    let (status, body) = get_json(test_app(&[]), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["nutrition_database"], true);
    assert_eq!(body["components"]["groq_api"], false);
    assert_eq!(body["database_stats"]["nutrition_records"], 3);
}

#[tokio::test]
async fn health_degrades_without_knowledge_base() {
    let (status, body) = get_json(app(test_state(&[], 0)), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["knowledge_base"], false);
}

#[tokio::test]
async fn nutrition_search_returns_exact_match_first() {
    let (status, body) = get_json(
        test_app(&[]),
        "/nutrition/search/Cooked%20Rice%20(White)?limit=5",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results_found"], 1);
    assert_eq!(body["results"][0]["Dish Name"], "Cooked Rice (White)");
    assert_eq!(body["results"][0]["Calories (kcal)"], 205.0);
}

#[tokio::test]
async fn nutrition_categories_lists_counts() {
    let (status, body) = get_json(test_app(&[]), "/nutrition/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_categories"], 3);
    assert_eq!(body["items_per_category"]["Rice & Grains"], 1);
}

#[tokio::test]
async fn dishes_by_category_is_case_insensitive_and_404s_on_miss() {
    let (status, body) = get_json(
        test_app(&[]),
        "/nutrition/dishes-by-category?category=rice%20%26%20grains",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["Dish Name"], "Cooked Rice (White)");

    let (status, body) = get_json(
        test_app(&[]),
        "/nutrition/dishes-by-category?category=Desserts",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Desserts"));
}

#[tokio::test]
async fn regional_endpoint_filters_and_counts() {
    let (status, body) = get_json(
        test_app(&[]),
        "/nutrition/regional/Indian?dietary_type=vegetarian&goal=weight%20loss&limit=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "Indian");
    assert_eq!(body["dietary_type"], "vegetarian");
    assert_eq!(body["suggestions_found"], 3);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["suggestions"][0]["Dish Name"],
        "Plain Roti / Chapati (Whole Wheat)"
    );
}

#[tokio::test]
async fn compare_rejects_fewer_than_two_items() {
    let (status, _body) = post_json(test_app(&[]), "/nutrition/compare", json!(["rice"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn compare_two_items_reports_both() {
    let (status, body) = post_json(
        test_app(&[]),
        "/nutrition/compare",
        json!(["Cooked Rice (White)", "NotARealDish123"]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items_compared"], 2);
    assert_eq!(body["comparison"][0]["Dish Name"], "Cooked Rice (White)");
    assert_eq!(body["comparison"][1]["error"], "Not found in database");
}

#[tokio::test]
async fn analyze_meal_totals_only_found_dishes() {
    let (status, body) = post_json(
        test_app(&["A light meal dominated by rice."]),
        "/analyze-meal",
        json!({"dish_names": ["Cooked Rice (White)", "NotARealDish123"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found_dishes"].as_array().unwrap().len(), 1);
    assert_eq!(body["not_found_dishes"], json!(["NotARealDish123"]));
    assert_eq!(body["totals"]["Calories (kcal)"], 205.0);
    assert_eq!(body["analysis"], "A light meal dominated by rice.");
}

#[tokio::test]
async fn analyze_meal_rejects_empty_list() {
    let (status, _body) = post_json(test_app(&[]), "/analyze-meal", json!({"dish_names": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_meal_with_no_matches_explains_itself() {
    let (status, body) = post_json(
        test_app(&[]),
        "/analyze-meal",
        json!({"dish_names": ["NotARealDish123"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found_dishes"].as_array().unwrap().len(), 0);
    assert!(body["analysis"].as_str().unwrap().contains("unable"));
    assert_eq!(body["totals"], json!({}));
}

#[tokio::test]
async fn chat_grows_session_by_two_turns_per_call() {
    let state = test_state(&[r#"{"final_answer": "Namaste."}"#], 1);
    let sessions = state.sessions.clone();
    let router = app(state);

    let (status, body) = post_json(
        router.clone(),
        "/chat",
        json!({"query": "hi", "session_id": "fixed-session"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "fixed-session");
    assert_eq!(sessions.turn_count("fixed-session").await, 2);

    let (_, body) = post_json(
        router,
        "/chat",
        json!({"query": "more", "session_id": "fixed-session"}),
    )
    .await;
    assert_eq!(body["session_id"], "fixed-session");
    assert_eq!(sessions.turn_count("fixed-session").await, 4);
}

#[tokio::test]
async fn chat_generates_session_id_and_sets_cookie() {
    let router = test_app(&[r#"{"final_answer": "hello"}"#]);
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"query": "hi"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("aahar_session="));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["session_id"]
        .as_str()
        .unwrap()
        .starts_with("session_"));
    assert_eq!(body["answer"], "hello");
}

#[tokio::test]
async fn chat_answers_even_when_the_planner_is_malformed() {
    let (status, body) = post_json(
        test_app(&["no json here"]),
        "/chat",
        json!({"query": "hi", "session_id": "s"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["answer"].as_str().unwrap().contains("try again"));
}

#[tokio::test]
async fn upload_replaces_dataset_and_reports_errors() {
    let state = test_state(&[], 1);
    let nutrition = state.nutrition.clone();
    let router = app(state);

    let payload = json!([{
        "Dish Name": "Idli",
        "Category": "Breakfast",
        "Calories (kcal)": 58,
        "Protein (g)": 2
    }]);
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/nutrition/upload")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["records_loaded"], 1);
    assert_eq!(nutrition.snapshot().len(), 1);

    // Invalid JSON is a request error.
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/nutrition/upload")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("{{{"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A structurally invalid dataset is reported in-band and leaves the
    // table untouched.
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/nutrition/upload")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from(json!([{"Dish Name": "X"}]).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(nutrition.snapshot().len(), 1);
}

#[tokio::test]
async fn analytics_reports_session_and_dataset_counters() {
    let state = test_state(&[r#"{"final_answer": "ok"}"#], 1);
    let sessions = state.sessions.clone();
    let router = app(state);

    post_json(
        router.clone(),
        "/chat",
        json!({"query": "hi", "session_id": "a"}),
    )
    .await;
    assert_eq!(sessions.active_count().await, 1);

    let (status, body) = get_json(router, "/analytics/popular-queries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active_sessions"], 1);
    assert_eq!(body["total_nutrition_records"], 3);
    assert_eq!(body["database_categories"], 3);
}
