//! Last-resort regex extraction for when the model's structured output is
//! missing or degenerate.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::{clean_description, normalize};
use crate::rules::HouseholdRules;

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

static EN_PHRASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\ben\s+(.+)$").unwrap());

static CARD_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+?)\s+con\s+tarjeta").unwrap());

/// Tokens that end a merchant phrase.
const STOPWORDS: &[&str] = &[
    "y", "e", "o", "u", "con", "por", "para", "que", "en", "de", "del", "al", "el", "la", "los",
    "las", "un", "una", "unos", "unas",
];

const ARTICLES: &[&str] = &["el", "la", "los", "las", "un", "una", "unos", "unas"];

/// Pull the first number out of the text, tolerating thousands separators.
/// Returns 0 when no digits are present.
pub fn extract_amount(text: &str) -> f64 {
    let stripped = text.replace(',', "");
    AMOUNT_RE
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Best-effort merchant recovery from raw text, in priority order:
/// rent keyword, "en <merchant>" phrase, "<merchant> con tarjeta" phrase,
/// last word-like token. A candidate that turns out to be a payer name is
/// rejected outright, never recorded as a merchant.
pub fn extract_merchant(text: &str, rules: &HouseholdRules) -> String {
    let lower = normalize(text);

    let rent = normalize(&rules.rent_keyword);
    if !rent.is_empty() && lower.contains(&rent) {
        return rules.rent_label.clone();
    }

    let candidate = en_phrase(&lower)
        .or_else(|| card_phrase(&lower))
        .or_else(|| last_word_token(&lower))
        .unwrap_or_default();

    let cleaned = clean_description(&candidate);
    if cleaned.is_empty() || rules.is_payer(&cleaned) {
        return String::new();
    }
    cleaned
}

/// "en <words>": skip leading articles, keep tokens until a stopword.
fn en_phrase(lower: &str) -> Option<String> {
    let caps = EN_PHRASE.captures(lower)?;
    let mut kept: Vec<&str> = Vec::new();
    for (i, token) in caps[1].split_whitespace().enumerate() {
        if i == 0 && ARTICLES.contains(&token) {
            continue;
        }
        if STOPWORDS.contains(&token) {
            break;
        }
        kept.push(token);
    }
    if kept.is_empty() { None } else { Some(kept.join(" ")) }
}

/// "<words> con tarjeta": keep the segment after the last stopword,
/// dropping bare numbers.
fn card_phrase(lower: &str) -> Option<String> {
    let caps = CARD_PHRASE.captures(lower)?;
    let mut kept: Vec<&str> = Vec::new();
    for token in caps[1].split_whitespace() {
        if STOPWORDS.contains(&token) {
            kept.clear();
            continue;
        }
        if token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            continue;
        }
        kept.push(token);
    }
    if kept.is_empty() { None } else { Some(kept.join(" ")) }
}

/// The last token that still looks like a word.
fn last_word_token(lower: &str) -> Option<String> {
    lower
        .split_whitespace()
        .rev()
        .find(|t| t.chars().any(|c| c.is_alphabetic()) && !STOPWORDS.contains(t))
        .map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_amount_with_thousands_separator() {
        assert_eq!(extract_amount("gasté 1,200 en el super"), 1200.0);
    }

    #[test]
    fn test_extract_amount_decimal_and_missing() {
        assert_eq!(extract_amount("café 45.50"), 45.5);
        assert_eq!(extract_amount("sin números aquí"), 0.0);
    }

    #[test]
    fn test_extract_merchant_rent_keyword() {
        let rules = HouseholdRules::default();
        assert_eq!(extract_merchant("pagué la renta del depa", &rules), "Renta");
    }

    #[test]
    fn test_extract_merchant_en_phrase() {
        let rules = HouseholdRules::default();
        assert_eq!(
            extract_merchant("ayer gasté 500 en walmart con tarjeta amex", &rules),
            "Walmart"
        );
        assert_eq!(extract_merchant("gasté 80 en el oxxo de la esquina", &rules), "Oxxo");
    }

    #[test]
    fn test_extract_merchant_card_phrase() {
        let rules = HouseholdRules::default();
        assert_eq!(extract_merchant("starbucks 120 con tarjeta", &rules), "Starbucks");
    }

    #[test]
    fn test_extract_merchant_last_token() {
        let rules = HouseholdRules::default();
        assert_eq!(extract_merchant("500 gasolina", &rules), "Gasolina");
    }

    #[test]
    fn test_extract_merchant_rejects_payer_name() {
        let rules = HouseholdRules::default();
        assert_eq!(extract_merchant("500 dani", &rules), "");
    }

    #[test]
    fn test_extract_merchant_nothing_usable() {
        let rules = HouseholdRules::default();
        assert_eq!(extract_merchant("500", &rules), "");
    }
}
