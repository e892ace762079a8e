//! OpenWeatherMap current-weather client.

use std::time::Duration;

use aahar_core::{WeatherProvider, WeatherReport};
use reqwest::Client;
use serde::Deserialize;

const OPENWEATHER_BASE_URL: &str = "http://api.openweathermap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("valid reqwest client config");
        Self {
            base_url: OPENWEATHER_BASE_URL.to_string(),
            api_key,
            http,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> Option<WeatherReport> {
        let api_key = match self.api_key.as_deref() {
            Some(key) => key,
            None => {
                tracing::warn!("weather API key not set, skipping lookup");
                return None;
            }
        };

        let url = format!("{}/data/2.5/weather", self.base_url.trim_end_matches('/'));
        let result = async {
            let response = self
                .http
                .get(&url)
                .query(&[("q", city), ("appid", api_key), ("units", "metric")])
                .send()
                .await?
                .error_for_status()?;
            response.json::<CurrentWeatherResponse>().await
        }
        .await;

        match result {
            Ok(body) => {
                let condition = body
                    .weather
                    .into_iter()
                    .next()
                    .map(|c| c.description)
                    .unwrap_or_else(|| "unknown".to_string());
                Some(WeatherReport {
                    city: city.to_string(),
                    temperature: body.main.temp,
                    condition,
                    humidity: body.main.humidity,
                })
            }
            Err(err) => {
                tracing::error!(city, error = %err, "weather lookup failed");
                None
            }
        }
    }
}
