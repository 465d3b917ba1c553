//! Drafted replies to client messages.

use tracing::warn;

use crate::advisor::prompts::build_communication_prompt;
use crate::llm_client::prompts::PROFESSIONAL_TONE_SYSTEM;
use crate::llm_client::{Decoded, TextGenerator};

/// Canned acknowledgement used when the capability fails.
const COMMUNICATION_FALLBACK: &str = "Thank you for your message. I'll review \
this and get back to you shortly with a detailed response.";

/// Drafts a diplomatic reply to a client message. Never errors.
pub async fn generate_communication_response(
    generator: &dyn TextGenerator,
    message_type: &str,
    client_message: &str,
    context: &serde_json::Value,
) -> Decoded<String> {
    let prompt = build_communication_prompt(message_type, client_message, context);

    match generator.generate(&prompt, PROFESSIONAL_TONE_SYSTEM).await {
        Ok(text) if !text.trim().is_empty() => Decoded::Parsed(text.trim().to_string()),
        Ok(_) => Decoded::Fallback(COMMUNICATION_FALLBACK.to_string()),
        Err(e) => {
            warn!("communication drafting failed, using canned text: {e}");
            Decoded::Fallback(COMMUNICATION_FALLBACK.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use serde_json::json;

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    #[tokio::test]
    async fn test_capability_failure_uses_canned_text() {
        let decoded = generate_communication_response(
            &FailingGenerator,
            "negotiation",
            "Can you lower the price?",
            &json!({"project": "Site rebuild"}),
        )
        .await;

        assert!(decoded.used_fallback());
        assert!(decoded.into_inner().starts_with("Thank you for your message."));
    }
}
