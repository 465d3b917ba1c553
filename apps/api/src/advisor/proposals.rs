//! Proposal drafting over the external text capability.

use tracing::warn;

use crate::advisor::prompts::build_proposal_prompt;
use crate::llm_client::prompts::PROFESSIONAL_TONE_SYSTEM;
use crate::llm_client::{Decoded, TextGenerator};
use crate::models::job::JobOpportunityRow;
use crate::models::user::User;

/// Canned paragraph used when the capability fails or returns nothing.
const PROPOSAL_FALLBACK: &str = "I'm interested in your project and believe my \
skills align well with your requirements. I'd love to discuss how I can help \
you achieve your goals.";

/// Drafts a proposal for (user, job). Never errors.
pub async fn generate_proposal(
    generator: &dyn TextGenerator,
    user: &User,
    job: &JobOpportunityRow,
) -> Decoded<String> {
    let prompt = build_proposal_prompt(user, job);

    match generator.generate(&prompt, PROFESSIONAL_TONE_SYSTEM).await {
        Ok(text) if !text.trim().is_empty() => Decoded::Parsed(text.trim().to_string()),
        Ok(_) => Decoded::Fallback(PROPOSAL_FALLBACK.to_string()),
        Err(e) => {
            warn!("proposal generation failed, using canned text: {e}");
            Decoded::Fallback(PROPOSAL_FALLBACK.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    struct StubGenerator(Result<&'static str, ()>);

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.0
                .map(String::from)
                .map_err(|_| LlmError::EmptyContent)
        }
    }

    fn fixture_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "dev@example.com".to_string(),
            password_digest: String::new(),
            full_name: "Dev".to_string(),
            skills: "Python, React".to_string(),
            experience_level: "intermediate".to_string(),
            hourly_rate: 45.0,
            portfolio_url: None,
            bio: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn fixture_job() -> JobOpportunityRow {
        JobOpportunityRow {
            id: Uuid::new_v4(),
            title: "Django API".to_string(),
            description: "Build a REST API".to_string(),
            required_skills: vec!["Django".to_string()],
            budget: Some(900.0),
            source: crate::models::job::JobSource::Reddit,
            source_url: None,
            client_name: None,
            match_score: 80.0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_generated_text_is_parsed() {
        let generated =
            generate_proposal(&StubGenerator(Ok("Here is my pitch.")), &fixture_user(), &fixture_job())
                .await;
        assert_eq!(generated, Decoded::Parsed("Here is my pitch.".to_string()));
    }

    #[tokio::test]
    async fn test_capability_failure_uses_canned_text() {
        let generated =
            generate_proposal(&StubGenerator(Err(())), &fixture_user(), &fixture_job()).await;
        assert!(generated.used_fallback());
        assert!(generated.into_inner().contains("interested in your project"));
    }

    #[tokio::test]
    async fn test_blank_reply_uses_canned_text() {
        let generated =
            generate_proposal(&StubGenerator(Ok("   ")), &fixture_user(), &fixture_job()).await;
        assert!(generated.used_fallback());
    }
}
