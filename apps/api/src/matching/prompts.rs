/// The scorer sends the job description truncated to this many characters.
pub const DESCRIPTION_LIMIT: usize = 500;

/// System prompt for match scoring. The reply is decoded as a bare integer.
pub const MATCH_SCORE_SYSTEM: &str = "You evaluate how well a freelancer's \
    skills match a job posting. Respond with a single integer between 0 and \
    100 and nothing else.";

/// Builds the match-scoring prompt. The weighting rubric is delegated
/// entirely to the model's judgment; nothing is computed locally.
pub fn build_match_prompt(
    user_skills: &[String],
    job_skills: &[String],
    description: &str,
) -> String {
    let description: String = description.chars().take(DESCRIPTION_LIMIT).collect();
    format!(
        "User Skills: {}\n\
         Job Required Skills: {}\n\
         Job Description: {}\n\n\
         Calculate a match score (0-100) based on:\n\
         1. Direct skill matches (40%)\n\
         2. Related/transferable skills (30%)\n\
         3. Experience level fit (20%)\n\
         4. Project complexity fit (10%)\n\n\
         Return only the numerical score.",
        user_skills.join(", "),
        job_skills.join(", "),
        description
    )
}
