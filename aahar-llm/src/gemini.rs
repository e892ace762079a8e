//! Google Gemini `generateContent` client.

use std::time::Duration;

use aahar_core::{AaharError, CompletionModel, LlmRequest, LlmResponse, Role};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    http: Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("valid reqwest client config");
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            http,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn model_name(&self, request_model: &str) -> String {
        let model = if request_model.is_empty() {
            self.model.as_str()
        } else {
            request_model
        };
        model
            .trim()
            .strip_prefix("models/")
            .unwrap_or(model)
            .to_string()
    }

    fn generate_url(&self, request_model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name(request_model)
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

fn is_blocked_finish_reason(reason: &str) -> bool {
    matches!(reason, "SAFETY" | "RECITATION" | "BLOCKLIST")
}

fn build_request(input: &LlmRequest) -> GenerateContentRequest {
    let contents = input
        .messages
        .iter()
        .filter(|message| message.role != Role::System)
        .map(|message| Content {
            role: Some(match message.role {
                Role::Assistant => "model".to_string(),
                _ => "user".to_string(),
            }),
            parts: vec![Part {
                text: Some(message.content.clone()),
            }],
        })
        .collect();

    let system_parts: Vec<Part> = input
        .messages
        .iter()
        .filter(|message| message.role == Role::System)
        .map(|message| Part {
            text: Some(message.content.clone()),
        })
        .collect();

    GenerateContentRequest {
        contents,
        system_instruction: (!system_parts.is_empty()).then_some(Content {
            role: None,
            parts: system_parts,
        }),
        generation_config: input
            .temperature
            .map(|temperature| GenerationConfig { temperature }),
    }
}

#[async_trait::async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, input: LlmRequest) -> Result<LlmResponse, AaharError> {
        let request = build_request(&input);

        let response = self
            .http
            .post(self.generate_url(&input.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|err| AaharError::LlmProvider(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));
            return Err(AaharError::LlmProvider(message));
        }

        let response = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|err| AaharError::LlmProvider(err.to_string()))?;

        let candidate = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .ok_or_else(|| AaharError::LlmProvider("No candidates in response".to_string()))?;

        let finish_reason = candidate.finish_reason;
        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty()
            && finish_reason
                .as_deref()
                .map(is_blocked_finish_reason)
                .unwrap_or(false)
        {
            let reason = finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
            return Err(AaharError::LlmProvider(format!(
                "Generation blocked: {}",
                reason
            )));
        }

        Ok(LlmResponse { content: text })
    }
}
