mod gemini;
mod groq;
mod weather;

pub use gemini::GeminiClient;
pub use groq::{GroqEnsemble, ENSEMBLE_MODELS};
pub use weather::OpenWeatherClient;
