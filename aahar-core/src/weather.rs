use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub condition: String,
    pub humidity: f64,
}

/// Current-weather lookup. Any failure (missing key, unknown city, provider
/// outage) is reported as `None`; callers degrade to explanatory text.
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Option<WeatherReport>;
}
