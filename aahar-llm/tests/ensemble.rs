use aahar_core::EnsembleModel;
use aahar_llm::{GroqEnsemble, ENSEMBLE_MODELS};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn missing_key_short_circuits_without_calls() {
    let ensemble = GroqEnsemble::new(None);
    let suggestions = ensemble
        .suggest("light dinner", "vegetarian", "weight loss", "Bengali")
        .await;

    assert_eq!(suggestions.len(), ENSEMBLE_MODELS.len());
    for (alias, _) in ENSEMBLE_MODELS {
        assert_eq!(suggestions[alias], "Groq API key not available.");
    }
}

#[tokio::test]
async fn one_failing_endpoint_does_not_poison_the_fanout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("llama3-70b-8192");
            then.status(500).body("upstream exploded");
        })
        .await;
    for model in ["gemma2-9b-it", "mixtral-8x7b-32768"] {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .body_contains(model);
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "Try moong dal chilla."}}]
                }));
            })
            .await;
    }

    let ensemble = GroqEnsemble::new(Some("key".to_string())).with_base_url(server.base_url());
    let suggestions = ensemble
        .suggest("breakfast ideas", "vegetarian", "diet", "Indian")
        .await;

    assert!(suggestions["llama"].starts_with("Error from llama"));
    assert_eq!(suggestions["gemma"], "Try moong dal chilla.");
    assert_eq!(suggestions["mixtral"], "Try moong dal chilla.");
}
