use clap::Parser;
use thiserror::Error;

/// Minimum cookie-secret length accepted by the signing key derivation.
const MIN_SECRET_LEN: usize = 32;

const DEFAULT_SECRET: &str = "a_very_secure_random_key_CHANGE_THIS_IN_PRODUCTION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingGeminiKey,
    #[error("cookie secret must be at least {MIN_SECRET_LEN} bytes")]
    WeakSecret,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "aahar-server", about, version)]
pub struct Config {
    /// API key for the primary completion service. Required.
    #[arg(long, env = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,

    /// API key for the secondary-model ensemble. Optional; without it the
    /// ensemble reports "key not available" per model.
    #[arg(long, env = "GROQ_API_KEY")]
    pub groq_api_key: Option<String>,

    /// API key for the weather service. Optional; without it weather-based
    /// suggestions return no data.
    #[arg(long, env = "OPENWEATHER_API_KEY")]
    pub openweather_api_key: Option<String>,

    /// Secret used to sign the session cookie.
    #[arg(long, env = "AAHAR_SECRET_KEY", default_value = DEFAULT_SECRET)]
    pub secret_key: String,

    #[arg(long, env = "PORT", default_value_t = 10000)]
    pub port: u16,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(long, env = "NUTRITION_DATA_PATH", default_value = "nutrition_data.json")]
    pub nutrition_data_path: String,

    #[arg(long, env = "KNOWLEDGE_BASE_PATH", default_value = "knowledge_base.txt")]
    pub knowledge_base_path: String,

    /// Idle seconds before a session is swept.
    #[arg(long, env = "SESSION_TTL_SECS", default_value_t = 3600)]
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .gemini_api_key
            .as_deref()
            .map_or(true, |key| key.trim().is_empty())
        {
            return Err(ConfigError::MissingGeminiKey);
        }
        if self.secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret);
        }
        Ok(())
    }
}
