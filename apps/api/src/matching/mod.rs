//! Match scoring — a thin adapter over the external text capability.
//!
//! Scoring never raises to its caller: any failure, malformed reply, or
//! out-of-range value decodes to the 0.0 fallback or is clamped.

pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::llm_client::{Decoded, TextGenerator};

/// The scoring capability the ingestion pipeline depends on.
/// Swapped for a stub in tests.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn calculate_job_match(
        &self,
        user_skills: &[String],
        job_skills: &[String],
        description: &str,
    ) -> f64;
}

/// Scores via the external generative-text capability.
pub struct LlmMatchScorer {
    generator: Arc<dyn TextGenerator>,
}

impl LlmMatchScorer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn calculate_job_match(
        &self,
        user_skills: &[String],
        job_skills: &[String],
        description: &str,
    ) -> f64 {
        let prompt = prompts::build_match_prompt(user_skills, job_skills, description);

        let decoded = match self
            .generator
            .generate(&prompt, prompts::MATCH_SCORE_SYSTEM)
            .await
        {
            Ok(text) => decode_score(&text),
            Err(e) => {
                warn!("match scoring failed, using fallback score: {e}");
                Decoded::Fallback(0.0)
            }
        };

        if decoded.used_fallback() {
            debug!("match score fell back to default");
        }
        decoded.into_inner()
    }
}

/// Decodes the first integer in the model's free-text reply, clamped to
/// [0, 100]. A reply with no integer decodes to the 0.0 fallback.
pub fn decode_score(text: &str) -> Decoded<f64> {
    let re = Regex::new(r"\d+").expect("static regex compiles");
    match re.find(text).and_then(|m| m.as_str().parse::<f64>().ok()) {
        Some(score) => Decoded::Parsed(score.clamp(0.0, 100.0)),
        None => Decoded::Fallback(0.0),
    }
}
