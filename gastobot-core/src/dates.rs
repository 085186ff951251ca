//! Deterministic date resolution.
//!
//! The model is never trusted to invent a date: if the text doesn't mention
//! one, the expense happened today; if it uses a relative keyword, plain
//! date arithmetic wins over whatever the model converted it to.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

/// Spanish month names ("setiembre" is a common regional spelling).
const MONTHS: &[&str] = &[
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "setiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Relative-date keywords with their day offsets, in precedence order:
/// "anteayer"/"antier" before "ayer", "pasado mañana" before "mañana",
/// "hoy" last. First match wins, avoiding substring collisions.
const RELATIVE_KEYWORDS: &[(&str, i64)] = &[
    ("anteayer", -2),
    ("antier", -2),
    ("ayer", -1),
    ("pasado mañana", 2),
    ("pasado manana", 2),
    ("mañana", 1),
    ("manana", 1),
    ("hoy", 0),
];

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}-\d{1,2}-\d{1,2}\b").unwrap());

static DMY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}[/-]\d{1,2}(?:[/-]\d{2,4})?\b").unwrap());

/// Pure substring/regex test for whether the text references a date at all.
/// False positives (a stray "3-4" range, say) are a known limitation.
pub fn mentions_date(text: &str) -> bool {
    let lower = text.to_lowercase();
    MONTHS.iter().any(|m| lower.contains(m))
        || RELATIVE_KEYWORDS.iter().any(|(kw, _)| lower.contains(kw))
        || ISO_DATE.is_match(&lower)
        || DMY_DATE.is_match(&lower)
}

/// Resolve a relative-date keyword against `today`, or `None` when the text
/// carries no relative keyword.
pub fn resolve_relative(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = text.to_lowercase();
    RELATIVE_KEYWORDS
        .iter()
        .find(|(kw, _)| lower.contains(kw))
        .map(|(_, offset)| today + Duration::days(*offset))
}

/// Decide the final expense date.
///
/// Trust ladder: no date mentioned -> `today` (overriding the model);
/// relative keyword -> deterministic arithmetic; otherwise the model's
/// proposed date if it parses as `YYYY-MM-DD`, else `today`.
pub fn finalize(text: &str, model_date: &str, today: NaiveDate) -> NaiveDate {
    if !mentions_date(text) {
        return today;
    }
    if let Some(resolved) = resolve_relative(text, today) {
        return resolved;
    }
    NaiveDate::parse_from_str(model_date.trim(), "%Y-%m-%d").unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_mentions_date_positive() {
        assert!(mentions_date("el 3 de marzo pagué la luz"));
        assert!(mentions_date("gasto del 2025-06-09"));
        assert!(mentions_date("gasto del 9/6"));
        assert!(mentions_date("gasto del 09/06/2025"));
        assert!(mentions_date("ayer compré café"));
        assert!(mentions_date("Pasado mañana pago la renta"));
    }

    #[test]
    fn test_mentions_date_negative() {
        assert!(!mentions_date("gasté 80 en un café"));
        assert!(!mentions_date("500 en el super con tarjeta"));
    }

    #[test]
    fn test_resolve_relative_offsets() {
        let today = d(2025, 6, 10);
        assert_eq!(resolve_relative("ayer gasté 500", today), Some(d(2025, 6, 9)));
        assert_eq!(resolve_relative("antier pagué el gas", today), Some(d(2025, 6, 8)));
        assert_eq!(resolve_relative("hoy compré pan", today), Some(today));
        assert_eq!(resolve_relative("mañana pago la luz", today), Some(d(2025, 6, 11)));
        assert_eq!(resolve_relative("sin fecha aquí", today), None);
    }

    #[test]
    fn test_resolve_relative_precedence() {
        let today = d(2025, 6, 10);
        // "anteayer" contains "ayer"; "pasado mañana" contains "mañana"
        assert_eq!(resolve_relative("anteayer gasté 100", today), Some(d(2025, 6, 8)));
        assert_eq!(
            resolve_relative("pasado mañana pago el agua", today),
            Some(d(2025, 6, 12))
        );
    }

    #[test]
    fn test_finalize_overrides_model_when_no_date_mentioned() {
        let today = d(2025, 6, 10);
        assert_eq!(finalize("spent 80 on coffee", "2020-01-01", today), today);
    }

    #[test]
    fn test_finalize_relative_beats_model_date() {
        let today = d(2025, 6, 10);
        assert_eq!(finalize("ayer gasté 500", "2020-01-01", today), d(2025, 6, 9));
    }

    #[test]
    fn test_finalize_uses_valid_model_date() {
        let today = d(2025, 6, 10);
        assert_eq!(
            finalize("el 3 de marzo pagué la luz", "2025-03-03", today),
            d(2025, 3, 3)
        );
    }

    #[test]
    fn test_finalize_falls_back_on_garbage_model_date() {
        let today = d(2025, 6, 10);
        assert_eq!(finalize("el 3 de marzo pagué la luz", "no-date", today), today);
        assert_eq!(finalize("el 3 de marzo pagué la luz", "", today), today);
    }
}
