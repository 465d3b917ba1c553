//! Budget extraction — pulls a dollar figure out of free-text job posts.

use regex::Regex;

const MIN_BUDGET: f64 = 10.0;
const MAX_BUDGET: f64 = 100_000.0;

/// Patterns in priority order. The first pattern with any match decides the
/// outcome; later patterns are never consulted after that.
const BUDGET_PATTERNS: &[&str] = &[
    r"\$(\d+(?:,\d+)?(?:\.\d+)?)",
    r"(\d+(?:,\d+)?(?:\.\d+)?)\s*(?:dollars?|\$)",
    r"budget:?\s*\$?(\d+(?:,\d+)?(?:\.\d+)?)",
    r"pay:?\s*\$?(\d+(?:,\d+)?(?:\.\d+)?)",
];

/// Extracts a budget estimate from free text. The value must fall inside
/// [10, 100000] inclusive; anything else (including parse failures) is
/// treated as "no value". Never errors.
pub fn extract_budget(text: &str) -> Option<f64> {
    let text = text.to_lowercase();

    for pattern in BUDGET_PATTERNS {
        let re = Regex::new(pattern).expect("static regex compiles");
        if let Some(caps) = re.captures(&text) {
            let raw = caps.get(1)?.as_str().replace(',', "");
            let value = raw.parse::<f64>().ok()?;
            return (MIN_BUDGET..=MAX_BUDGET).contains(&value).then_some(value);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_prefix() {
        assert_eq!(extract_budget("budget: $250"), Some(250.0));
    }

    #[test]
    fn test_below_range_is_none() {
        assert_eq!(extract_budget("$5"), None);
    }

    #[test]
    fn test_above_range_is_none() {
        assert_eq!(extract_budget("$150000"), None);
    }

    #[test]
    fn test_no_numeric_pattern_is_none() {
        assert_eq!(extract_budget("negotiable, depends on scope"), None);
    }

    #[test]
    fn test_comma_thousands_stripped() {
        assert_eq!(extract_budget("offering $1,500 for the full build"), Some(1500.0));
    }

    #[test]
    fn test_dollars_suffix() {
        assert_eq!(extract_budget("paying 2000 dollars"), Some(2000.0));
    }

    #[test]
    fn test_pay_prefix_without_dollar_sign() {
        assert_eq!(extract_budget("pay: 300"), Some(300.0));
    }

    #[test]
    fn test_decimal_value() {
        assert_eq!(extract_budget("$99.50 per article"), Some(99.5));
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        // "$20" matches the dollar-sign pattern before "budget: 90000" is seen.
        assert_eq!(extract_budget("deposit $20 now, budget: 90000"), Some(20.0));
    }

    #[test]
    fn test_out_of_range_first_pattern_does_not_fall_through() {
        // The dollar-sign pattern matches "$5"; its rejection ends the search
        // even though the budget pattern would have produced 500.
        assert_eq!(extract_budget("$5 tip, budget: 500"), None);
    }

    #[test]
    fn test_range_bounds_inclusive() {
        assert_eq!(extract_budget("$10"), Some(10.0));
        assert_eq!(extract_budget("$100,000"), Some(100000.0));
    }
}
