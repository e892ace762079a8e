use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aahar_agent::tools::production_registry;
use aahar_agent::{AgentExecutor, DecisionEngine, SessionStore};
use aahar_core::{
    AaharError, CompletionModel, Document, EnsembleModel, LlmRequest, LlmResponse, Retriever,
    ScoredDocument, WeatherProvider, WeatherReport,
};
use aahar_nutrition::{fallback_records, NutritionHandle, NutritionTable};
use async_trait::async_trait;

struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompt(&self, idx: usize) -> String {
        self.prompts.lock().unwrap()[idx].clone()
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, AaharError> {
        self.prompts
            .lock()
            .unwrap()
            .push(request.messages[0].content.clone());
        let content = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted");
        Ok(LlmResponse { content })
    }
}

struct StubRetriever;

#[async_trait]
impl Retriever for StubRetriever {
    async fn retrieve(
        &self,
        _query: &str,
        _top_k: usize,
    ) -> Result<Vec<ScoredDocument>, AaharError> {
        Ok(vec![ScoredDocument {
            document: Document::new("kb-0", "Millets are rich in fiber and iron."),
            score: 0.9,
        }])
    }
}

struct StubEnsemble;

#[async_trait]
impl EnsembleModel for StubEnsemble {
    async fn suggest(
        &self,
        _query: &str,
        _dietary_type: &str,
        _goal: &str,
        _region: &str,
    ) -> BTreeMap<String, String> {
        [
            ("llama", "Ragi dosa with chutney."),
            ("gemma", "Moong dal salad."),
            ("mixtral", "Vegetable upma."),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
}

struct StubWeather;

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn current(&self, city: &str) -> Option<WeatherReport> {
        (city == "Kolkata").then(|| WeatherReport {
            city: city.to_string(),
            temperature: 33.0,
            condition: "humid".to_string(),
            humidity: 80.0,
        })
    }
}

fn wired_executor(model: Arc<ScriptedModel>) -> AgentExecutor {
    let nutrition = Arc::new(NutritionHandle::new(NutritionTable::from_records(
        fallback_records(),
    )));
    let registry = production_registry(
        model.clone(),
        "mock-model",
        Arc::new(StubRetriever),
        Arc::new(StubEnsemble),
        Arc::new(StubWeather),
        nutrition,
    )
    .unwrap();
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(3600)));
    let engine = DecisionEngine::new(model, "mock-model", registry.describe());
    AgentExecutor::new(engine, registry, sessions)
}

#[tokio::test]
async fn diet_plan_merges_rag_ensemble_and_dataset() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "generate_diet_plan", "tool_input": {"dietary_type": "vegetarian", "goal": "weight loss", "region": "Bengali"}}"#,
        "Eat shukto and fish-free thali.",
        "Final merged Bengali plan.",
    ]));
    let executor = wired_executor(model.clone());

    let answer = executor
        .run("s1", "vegetarian weight loss plan for Kolkata")
        .await;
    assert_eq!(answer, "Final merged Bengali plan.");

    // Second call is the knowledge-base prompt, third merges everything.
    let rag_prompt = model.prompt(1);
    assert!(rag_prompt.contains("Millets are rich in fiber and iron."));
    assert!(rag_prompt.contains("vegetarian"));

    let merge_prompt = model.prompt(2);
    assert!(merge_prompt.contains("Primary RAG Answer:\nEat shukto and fish-free thali."));
    assert!(merge_prompt.contains("- LLaMA: Ragi dosa with chutney."));
    assert!(merge_prompt.contains("- Mixtral: Vegetable upma."));
    assert!(merge_prompt.contains("Detailed Nutrition Database Information:"));
}

#[tokio::test]
async fn table_request_uses_the_table_merge_prompt() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "generate_diet_plan", "tool_input": {"wants_table": true}}"#,
        "RAG text.",
        "| Meal | Food |",
    ]));
    let executor = wired_executor(model.clone());

    let answer = executor.run("s1", "diet plan as a table").await;
    assert_eq!(answer, "| Meal | Food |");
    assert!(model.prompt(2).contains("markdown table"));
}

#[tokio::test]
async fn plan_defaults_are_refined_from_query_keywords() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "generate_diet_plan", "tool_input": {}}"#,
        "RAG text.",
        "| Meal | Food |",
    ]));
    let executor = wired_executor(model.clone());

    let answer = executor
        .run("s1", "punjabi veg plan to lose weight, in a table")
        .await;
    assert_eq!(answer, "| Meal | Food |");

    let merge_prompt = model.prompt(2);
    assert!(merge_prompt.contains("markdown table"));
    assert!(merge_prompt.contains("vegetarian"));
    assert!(merge_prompt.contains("weight loss"));
    assert!(merge_prompt.contains("North Indian"));
}

#[tokio::test]
async fn recipe_tool_appends_dataset_nutrition() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "fetch_recipe", "tool_input": {"recipe_name": "Cooked Rice (White)"}}"#,
    ]));
    let executor = wired_executor(model);

    let answer = executor.run("s1", "how do I cook rice?").await;
    assert!(answer.starts_with("Recipe for Cooked Rice (White):"));
    assert!(answer.contains("**Nutrition Information:**"));
    assert!(answer.contains("205 kcal"));
}

#[tokio::test]
async fn nutrition_facts_tool_formats_matches() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "lookup_nutrition_facts", "tool_input": {"food_item": "dal"}}"#,
    ]));
    let executor = wired_executor(model);

    let answer = executor.run("s1", "nutrition of dal?").await;
    assert!(answer.starts_with("**Detailed Nutrition Information for 'dal':**"));
    assert!(answer.contains("Cooked Lentils (Mixed Dal)"));
}

#[tokio::test]
async fn comparison_tool_needs_two_items() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "get_nutrition_comparison", "tool_input": {"food_items": ["rice"]}}"#,
    ]));
    let executor = wired_executor(model);

    let answer = executor.run("s1", "compare rice").await;
    assert_eq!(answer, "Please provide at least 2 food items for comparison.");
}

#[tokio::test]
async fn comparison_tool_reports_missing_items_inline() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "get_nutrition_comparison", "tool_input": {"food_items": ["Cooked Rice (White)", "NotARealDish123"]}}"#,
    ]));
    let executor = wired_executor(model);

    let answer = executor.run("s1", "compare").await;
    assert!(answer.contains("Cooked Rice (White)"));
    assert!(answer.contains("**NotARealDish123:** Nutrition data not available"));
}

#[tokio::test]
async fn weather_tool_renders_conditions_into_the_prompt() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "get_weather_based_suggestion", "tool_input": {"city": "Kolkata"}}"#,
        "Have chilled lassi and curd rice.",
    ]));
    let executor = wired_executor(model.clone());

    let answer = executor
        .run("s1", "veg food for kolkata weather to lose weight")
        .await;
    assert_eq!(answer, "Have chilled lassi and curd rice.");

    let weather_prompt = model.prompt(1);
    assert!(weather_prompt.contains("**Kolkata**"));
    assert!(weather_prompt.contains("**33°C**"));
    assert!(weather_prompt.contains("humid"));
    assert!(weather_prompt.contains("**vegetarian**"));
    assert!(weather_prompt.contains("**weight loss**"));
}

#[tokio::test]
async fn weather_tool_degrades_on_unknown_city() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "get_weather_based_suggestion", "tool_input": {"city": "Atlantis"}}"#,
    ]));
    let executor = wired_executor(model);

    let answer = executor.run("s1", "food for my city").await;
    assert_eq!(
        answer,
        "Couldn't retrieve weather for Atlantis. Please check the city name."
    );
}

#[tokio::test]
async fn weather_tool_requires_a_city() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "get_weather_based_suggestion", "tool_input": {}}"#,
    ]));
    let executor = wired_executor(model);

    let answer = executor.run("s1", "weather food").await;
    assert_eq!(answer, "City not provided for weather suggestion.");
}

#[tokio::test]
async fn reformat_without_previous_plan_explains_itself() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "reformat_diet_plan", "tool_input": {"wants_table": true}}"#,
    ]));
    let executor = wired_executor(model);

    let answer = executor.run("s1", "make that a table").await;
    assert_eq!(answer, "No substantial previous diet plan found to reformat.");
}

#[tokio::test]
async fn reformat_reworks_the_previous_substantial_answer() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"final_answer": "Breakfast: poha. Lunch: dal, rice, sabzi. Dinner: roti with paneer."}"#,
        r#"{"tool_name": "reformat_diet_plan", "tool_input": {"wants_table": true}}"#,
        "| Meal | Items |",
    ]));
    let executor = wired_executor(model.clone());

    executor.run("s1", "give me a plan").await;
    let answer = executor.run("s1", "as a table please").await;
    assert_eq!(answer, "| Meal | Items |");

    let reformat_prompt = model.prompt(2);
    assert!(reformat_prompt.contains("Previous Answer to Reformat:\nBreakfast: poha."));
    assert!(reformat_prompt.contains("markdown table"));
}

#[tokio::test]
async fn weather_temperature_formatting_is_plain() {
    // 33.0 renders as "33" in prompts, keeping the degree line readable.
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool_name": "get_weather_based_suggestion", "tool_input": {"city": "Kolkata"}}"#,
        "ok",
    ]));
    let executor = wired_executor(model.clone());
    executor.run("s1", "anything").await;
    assert!(model.prompt(1).contains("**33°C**"));
}
