//! Groq OpenAI-compatible chat-completions client with a fixed-set
//! ensemble fan-out.

use std::collections::BTreeMap;
use std::time::Duration;

use aahar_core::EnsembleModel;
use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 250;

/// Alias → provider model id for the fixed ensemble.
pub const ENSEMBLE_MODELS: [(&str, &str); 3] = [
    ("llama", "llama3-70b-8192"),
    ("gemma", "gemma2-9b-it"),
    ("mixtral", "mixtral-8x7b-32768"),
];

#[derive(Clone)]
pub struct GroqEnsemble {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl GroqEnsemble {
    pub fn new(api_key: Option<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("valid reqwest client config");
        Self {
            base_url: GROQ_BASE_URL.to_string(),
            api_key,
            http,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn suggest_single(
        &self,
        api_key: &str,
        alias: &str,
        model: &str,
        prompt: &str,
    ) -> String {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.5,
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let result = async {
            let response = self
                .http
                .post(&url)
                .bearer_auth(api_key)
                .json(&request)
                .send()
                .await?
                .error_for_status()?;
            response.json::<ChatCompletionResponse>().await
        }
        .await;

        match result {
            Ok(body) => body
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .unwrap_or_else(|| format!("No suggestion from {model}.")),
            Err(err) => {
                tracing::error!(alias, error = %err, "ensemble endpoint failed");
                format!("Error from {alias}: {err}")
            }
        }
    }
}

#[async_trait::async_trait]
impl EnsembleModel for GroqEnsemble {
    async fn suggest(
        &self,
        query: &str,
        dietary_type: &str,
        goal: &str,
        region: &str,
    ) -> BTreeMap<String, String> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("ensemble API key not available, skipping fan-out");
            return ENSEMBLE_MODELS
                .iter()
                .map(|(alias, _)| (alias.to_string(), "Groq API key not available.".to_string()))
                .collect();
        };

        let prompt = format!(
            "User query: '{query}'. Provide a concise, practical {dietary_type} diet \
             suggestion or food item for {goal}, tailored for a {region} Indian context. \
             Focus on readily available ingredients. Be brief and to the point."
        );

        let calls = ENSEMBLE_MODELS.map(|(alias, model)| {
            let prompt = prompt.clone();
            async move {
                let text = self.suggest_single(api_key, alias, model, &prompt).await;
                (alias.to_string(), text)
            }
        });

        join_all(calls).await.into_iter().collect()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
