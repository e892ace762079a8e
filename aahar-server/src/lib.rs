mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;
use std::time::Duration;

use aahar_agent::tools::production_registry;
use aahar_agent::{AgentExecutor, DecisionEngine, SessionStore};
use aahar_core::{CompletionModel, EnsembleModel, Retriever, WeatherProvider};
use aahar_llm::{GeminiClient, GroqEnsemble, OpenWeatherClient};
use aahar_nutrition::NutritionHandle;
use aahar_retrieval::{index_knowledge_base, CosineStore, EmbeddingRetriever, HashingEmbedder};
use anyhow::Context;
use axum_extra::extract::cookie::Key;

pub use config::Config;
pub use error::ApiError;
pub use routes::app;
pub use state::AppState;

const EMBEDDING_DIMENSION: usize = 256;

/// Wire all production components from configuration. Fails only on the
/// errors the service treats as fatal: a missing completion-service key or
/// an unusable cookie secret.
pub async fn bootstrap(config: Config) -> anyhow::Result<AppState> {
    config.validate()?;
    let config = Arc::new(config);

    let nutrition = Arc::new(NutritionHandle::load_or_fallback(&config.nutrition_data_path));

    let embedder = HashingEmbedder::new(EMBEDDING_DIMENSION);
    let store = CosineStore::new();
    let knowledge_docs =
        match index_knowledge_base(&config.knowledge_base_path, &embedder, &store).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(error = %err, path = %config.knowledge_base_path, "knowledge base unavailable, retrieval degraded");
                0
            }
        };
    let retriever: Arc<dyn Retriever> = Arc::new(EmbeddingRetriever::new(embedder, store));

    let gemini_key = config
        .gemini_api_key
        .clone()
        .context("GEMINI_API_KEY is not set")?;
    let model: Arc<dyn CompletionModel> =
        Arc::new(GeminiClient::new(gemini_key, config.gemini_model.clone()));
    let ensemble: Arc<dyn EnsembleModel> = Arc::new(GroqEnsemble::new(config.groq_api_key.clone()));
    let weather: Arc<dyn WeatherProvider> =
        Arc::new(OpenWeatherClient::new(config.openweather_api_key.clone()));

    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session_ttl_secs,
    )));
    let registry = production_registry(
        model.clone(),
        config.gemini_model.clone(),
        retriever,
        ensemble,
        weather,
        nutrition.clone(),
    )?;
    let engine = DecisionEngine::new(
        model.clone(),
        config.gemini_model.clone(),
        registry.describe(),
    );
    let executor = Arc::new(AgentExecutor::new(engine, registry, sessions.clone()));

    let cookie_key = Key::derive_from(config.secret_key.as_bytes());
    let model_name = config.gemini_model.clone();
    let groq_configured = config.groq_api_key.is_some();
    let weather_configured = config.openweather_api_key.is_some();

    Ok(AppState {
        config,
        cookie_key,
        nutrition,
        sessions,
        executor,
        model,
        model_name,
        knowledge_docs,
        groq_configured,
        weather_configured,
    })
}

/// Periodically drop sessions idle past their TTL.
pub fn spawn_session_sweeper(sessions: Arc<SessionStore>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sessions.sweep_expired().await;
        }
    });
}
