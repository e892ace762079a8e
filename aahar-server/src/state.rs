use std::sync::Arc;

use aahar_agent::{AgentExecutor, SessionStore};
use aahar_core::CompletionModel;
use aahar_nutrition::NutritionHandle;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cookie_key: Key,
    pub nutrition: Arc<NutritionHandle>,
    pub sessions: Arc<SessionStore>,
    pub executor: Arc<AgentExecutor>,
    pub model: Arc<dyn CompletionModel>,
    pub model_name: String,
    pub knowledge_docs: usize,
    pub groq_configured: bool,
    pub weather_configured: bool,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.cookie_key.clone()
    }
}
