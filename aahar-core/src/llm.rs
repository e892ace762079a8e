use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::AaharError;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LlmRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl LlmRequest {
    /// Single-prompt request, the shape every caller in this service uses.
    pub fn prompt(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(content)],
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LlmResponse {
    pub content: String,
}

#[async_trait::async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, AaharError>;
}

/// Secondary-model fan-out: several independent completion endpoints asked
/// the same question concurrently. The result maps a fixed model alias to
/// its suggestion text; a failed endpoint contributes an error string under
/// its alias rather than failing the whole call.
#[async_trait::async_trait]
pub trait EnsembleModel: Send + Sync {
    async fn suggest(
        &self,
        query: &str,
        dietary_type: &str,
        goal: &str,
        region: &str,
    ) -> BTreeMap<String, String>;
}
