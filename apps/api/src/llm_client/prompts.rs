// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment for client-facing prose (proposals, replies).
pub const PROFESSIONAL_TONE_SYSTEM: &str = "You are an assistant for a working \
    freelancer. Write in a professional but personable voice. \
    Be concise and concrete. Never invent credentials or project history \
    that was not provided in the prompt.";
