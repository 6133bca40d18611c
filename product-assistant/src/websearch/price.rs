//! Price token extraction from free text.

use std::sync::LazyLock;

use regex::Regex;

/// Currency matchers, tried in order; the first that matches wins.
static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"₹[\d,]+", r"Rs\.?\s*[\d,]+", r"INR\s*[\d,]+", r"\$[\d,]+"]
        .into_iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// First price token in `text`, by matcher priority rather than by position.
pub fn extract_price(text: &str) -> Option<String> {
    PRICE_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}
