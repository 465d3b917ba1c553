//! Pricing strategy suggestions with a deterministic fallback.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::advisor::prompts::build_pricing_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, Decoded, TextGenerator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSuggestion {
    pub recommendation: String,
    pub target_rate: f64,
    pub tip: String,
}

/// Deterministic advice applied when the capability fails or replies with
/// something other than the requested JSON.
pub fn fallback_suggestion(current_rate: f64) -> PricingSuggestion {
    PricingSuggestion {
        recommendation: "Consider reviewing your rates based on market standards".to_string(),
        target_rate: current_rate * 1.1,
        tip: "Track your project success rate to optimize pricing".to_string(),
    }
}

/// Asks the capability for pricing advice; the JSON reply is decoded with
/// an explicit fallback path. Never errors.
pub async fn pricing_suggestion(
    generator: &dyn TextGenerator,
    total_earnings: f64,
    total_hours: f64,
    current_rate: f64,
) -> Decoded<PricingSuggestion> {
    let prompt = build_pricing_prompt(total_earnings, total_hours, current_rate);

    match generator.generate(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(text) => match serde_json::from_str(strip_json_fences(&text)) {
            Ok(suggestion) => Decoded::Parsed(suggestion),
            Err(e) => {
                warn!("pricing suggestion reply was not valid JSON: {e}");
                Decoded::Fallback(fallback_suggestion(current_rate))
            }
        },
        Err(e) => {
            warn!("pricing suggestion failed: {e}");
            Decoded::Fallback(fallback_suggestion(current_rate))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct StubGenerator(Result<&'static str, ()>);

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.0
                .map(String::from)
                .map_err(|_| LlmError::EmptyContent)
        }
    }

    #[tokio::test]
    async fn test_valid_json_reply_is_parsed() {
        let reply = r#"{"recommendation": "Raise rates", "target_rate": 55.0, "tip": "Anchor high"}"#;
        let decoded = pricing_suggestion(&StubGenerator(Ok(reply)), 10000.0, 200.0, 50.0).await;

        assert!(!decoded.used_fallback());
        assert_eq!(decoded.into_inner().target_rate, 55.0);
    }

    #[tokio::test]
    async fn test_fenced_json_reply_is_parsed() {
        let reply = "```json\n{\"recommendation\": \"Hold\", \"target_rate\": 40.0, \"tip\": \"Wait\"}\n```";
        let decoded = pricing_suggestion(&StubGenerator(Ok(reply)), 0.0, 0.0, 40.0).await;
        assert!(!decoded.used_fallback());
    }

    #[tokio::test]
    async fn test_prose_reply_falls_back() {
        let decoded =
            pricing_suggestion(&StubGenerator(Ok("You should charge more.")), 0.0, 0.0, 30.0).await;

        assert!(decoded.used_fallback());
        let suggestion = decoded.into_inner();
        assert!((suggestion.target_rate - 33.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_capability_failure_falls_back() {
        let decoded = pricing_suggestion(&StubGenerator(Err(())), 0.0, 0.0, 20.0).await;
        assert!(decoded.used_fallback());
        assert!((decoded.into_inner().target_rate - 22.0).abs() < 1e-9);
    }
}
