//! Text heuristics that drive routing: product intent, apology detection, echo guard.
//!
//! All matching is case-insensitive substring matching. The lists are kept exactly as they
//! are; "not found" inside a legitimate answer still counts as an apology.

/// Words that send a question to the product index.
pub const PRODUCT_KEYWORDS: [&str; 3] = ["price", "review", "product"];

/// Phrases marking an answer or context as insufficient.
pub const APOLOGY_PHRASES: [&str; 5] = [
    "i am sorry",
    "cannot provide",
    "not included",
    "no relevant documents",
    "not found",
];

/// Web search outputs that carry no usable context.
pub const INVALID_WEB_MARKERS: [&str; 3] = [
    "web search failed",
    "no web results found",
    "web search returned results, but none were usable",
];

pub fn has_product_intent(text: &str) -> bool {
    let lower = text.to_lowercase();
    PRODUCT_KEYWORDS.iter().any(|k| lower.contains(k))
}

pub fn contains_apology(text: &str) -> bool {
    let lower = text.to_lowercase();
    APOLOGY_PHRASES.iter().any(|p| lower.contains(p))
}

/// Keeps ASCII letters and digits, lowercased.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// True when `answer` is the query handed back unchanged (ignoring case and punctuation).
pub fn is_echo(answer: &str, query: &str) -> bool {
    normalize(answer) == normalize(query)
}

/// Deterministic answer when nothing usable was found.
pub fn no_information_message(query: &str) -> String {
    format!("No price information found online for {}.", query.trim())
}

/// Web context that must not reach the generator: empty, a failure text, or an echo of the
/// query.
pub fn is_invalid_web_context(context: &str, query: &str) -> bool {
    if context.trim().is_empty() {
        return true;
    }
    let lower = context.to_lowercase();
    INVALID_WEB_MARKERS.iter().any(|m| lower.contains(m)) || is_echo(context, query)
}
