//! Prompt builders for the advisory features.

use crate::models::job::JobOpportunityRow;
use crate::models::user::User;

const JOB_DESCRIPTION_LIMIT: usize = 300;
const MISSED_SKILLS_LIMIT: usize = 20;

pub fn build_proposal_prompt(user: &User, job: &JobOpportunityRow) -> String {
    let description: String = job.description.chars().take(JOB_DESCRIPTION_LIMIT).collect();
    let budget = job
        .budget
        .map(|b| format!("${b}"))
        .unwrap_or_else(|| "Not specified".to_string());

    format!(
        "Create a professional freelance proposal for:\n\n\
         Freelancer Profile:\n\
         - Skills: {}\n\
         - Experience: {}\n\
         - Hourly Rate: ${}/hour\n\n\
         Job Details:\n\
         - Title: {}\n\
         - Description: {}\n\
         - Budget: {}\n\n\
         Write a compelling 150-200 word proposal that:\n\
         1. Shows understanding of requirements\n\
         2. Highlights relevant skills\n\
         3. Includes a brief approach/timeline\n\
         4. Ends with a call to action\n\n\
         Keep it professional but personable.",
        user.skills, user.experience_level, user.hourly_rate, job.title, description, budget
    )
}

pub fn build_pricing_prompt(total_earnings: f64, total_hours: f64, current_rate: f64) -> String {
    format!(
        "Freelancer Analysis:\n\
         - Total Earnings: ${total_earnings}\n\
         - Total Hours: {total_hours}\n\
         - Current Average Rate: ${current_rate}/hour\n\n\
         Based on this data, provide pricing strategy advice:\n\
         1. Should they increase/decrease rates?\n\
         2. What's a good target hourly rate?\n\
         3. One actionable tip for pricing\n\n\
         Format as JSON with keys: recommendation, target_rate, tip"
    )
}

pub fn build_skill_gap_prompt(user_skills: &[String], missed_skills: &[String]) -> String {
    let missed: Vec<&str> = missed_skills
        .iter()
        .take(MISSED_SKILLS_LIMIT)
        .map(String::as_str)
        .collect();

    format!(
        "User Current Skills: {}\n\
         Skills from Missed Jobs: {}\n\n\
         Identify the top 5 missing skills that would:\n\
         1. Open the most new opportunities\n\
         2. Command higher rates\n\
         3. Are learnable in 1-3 months\n\n\
         For each skill, provide:\n\
         - skill name (key: skill)\n\
         - priority score 1-10 (key: priority)\n\
         - learning resource suggestion (key: resource)\n\n\
         Format as JSON array.",
        user_skills.join(", "),
        missed.join(", ")
    )
}

pub fn build_communication_prompt(
    message_type: &str,
    client_message: &str,
    context: &serde_json::Value,
) -> String {
    format!(
        "Communication Type: {message_type}\n\
         Client Message: \"{client_message}\"\n\
         Context: {context}\n\n\
         Generate a professional, diplomatic response that:\n\
         1. Addresses the client's concern\n\
         2. Maintains a positive relationship\n\
         3. Protects the freelancer's interests\n\
         4. Suggests next steps if appropriate\n\n\
         Keep it concise (2-3 sentences) and professional."
    )
}
