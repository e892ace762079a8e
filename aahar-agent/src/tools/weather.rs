use std::collections::HashMap;
use std::sync::Arc;

use aahar_core::{CompletionModel, LlmRequest, RequestContext, Tool, ToolError, WeatherProvider};
use serde_json::Value;

use crate::action::WeatherArgs;
use crate::prompts::weather_suggestion_prompt;
use crate::query::{extract_diet_goal, extract_diet_preference};

const GENERATION_TEMPERATURE: f32 = 0.5;

/// Weather-appropriate food suggestion: look up current conditions for the
/// requested city, then ask the completion model for matching foods.
pub struct WeatherTool {
    model: Arc<dyn CompletionModel>,
    model_name: String,
    weather: Arc<dyn WeatherProvider>,
}

impl WeatherTool {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        model_name: impl Into<String>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            weather,
        }
    }
}

#[async_trait::async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather_based_suggestion"
    }

    fn description(&self) -> &str {
        "Weather-appropriate food suggestions. Input: `city`"
    }

    async fn execute(&self, args: Value, ctx: &RequestContext) -> Result<String, ToolError> {
        let args: WeatherArgs = serde_json::from_value(args)?;
        let Some(city) = args.city.filter(|city| !city.trim().is_empty()) else {
            return Ok("City not provided for weather suggestion.".to_string());
        };
        tracing::info!(city = %city, "weather-based suggestion");

        let Some(report) = self.weather.current(&city).await else {
            return Ok(format!(
                "Couldn't retrieve weather for {city}. Please check the city name."
            ));
        };

        let vars: HashMap<&str, String> = [
            ("city", report.city.clone()),
            ("temperature", report.temperature.to_string()),
            ("condition", report.condition.clone()),
            ("humidity", report.humidity.to_string()),
            (
                "dietary_type",
                extract_diet_preference(&ctx.query).to_string(),
            ),
            ("goal", extract_diet_goal(&ctx.query).to_string()),
            ("query", ctx.query.clone()),
        ]
        .into_iter()
        .collect();

        let rendered = weather_suggestion_prompt()
            .render(&vars)
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        let request = LlmRequest::prompt(self.model_name.clone(), rendered)
            .with_temperature(GENERATION_TEMPERATURE);

        let response = self
            .model
            .complete(request)
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        Ok(response.content)
    }
}
