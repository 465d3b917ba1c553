//! Skill extraction — maps free-text job titles onto a fixed tag vocabulary.

/// Fixed catalog of skill tags recognized in job titles.
const SKILL_CATALOG: &[&str] = &[
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "PHP",
    "Laravel",
    "Django",
    "HTML",
    "CSS",
    "WordPress",
    "Shopify",
    "SEO",
    "Digital Marketing",
    "Data Analysis",
    "Machine Learning",
    "AI",
    "Flutter",
    "React Native",
    "iOS",
    "Android",
    "Unity",
    "Game Development",
    "Blockchain",
    "Web3",
    "Graphic Design",
    "UI/UX",
    "Figma",
    "Photoshop",
    "Video Editing",
];

/// Sentinel tag used when a title matches nothing in the catalog.
pub const GENERAL_TAG: &str = "General";

/// Returns the catalog tags appearing in the title (case-insensitive
/// substring match, catalog order, each at most once). Never empty: a title
/// matching nothing yields exactly `["General"]`.
pub fn extract_skills(title: &str) -> Vec<String> {
    let title_lower = title.to_lowercase();

    let found: Vec<String> = SKILL_CATALOG
        .iter()
        .filter(|skill| title_lower.contains(&skill.to_lowercase()))
        .map(|s| s.to_string())
        .collect();

    if found.is_empty() {
        vec![GENERAL_TAG.to_string()]
    } else {
        found
    }
}
