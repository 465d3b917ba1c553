//! Skill-gap analysis over skills harvested from missed opportunities.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::advisor::prompts::build_skill_gap_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, Decoded, TextGenerator};

/// One recommended skill from the analysis reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapAdvice {
    pub skill: String,
    #[serde(default)]
    pub priority: f64,
    #[serde(default)]
    pub resource: Option<String>,
}

/// Asks the capability which missing skills matter most. A failed call or
/// malformed reply decodes to an empty recommendation list. Never errors.
pub async fn analyze_skill_gaps(
    generator: &dyn TextGenerator,
    user_skills: &[String],
    missed_job_skills: &[String],
) -> Decoded<Vec<SkillGapAdvice>> {
    let prompt = build_skill_gap_prompt(user_skills, missed_job_skills);

    match generator.generate(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(text) => match serde_json::from_str(strip_json_fences(&text)) {
            Ok(advice) => Decoded::Parsed(advice),
            Err(e) => {
                warn!("skill gap reply was not a valid JSON array: {e}");
                Decoded::Fallback(Vec::new())
            }
        },
        Err(e) => {
            warn!("skill gap analysis failed: {e}");
            Decoded::Fallback(Vec::new())
        }
    }
}
