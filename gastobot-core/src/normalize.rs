//! Shared text cleanup for catalog keys and display descriptions.

/// Filler phrases stripped from the front of a description, longest first.
/// Stripping repeats until no entry matches; each strip shortens the text,
/// so the pass terminates and the result is a stable fixed point.
const FILLER_PREFIXES: &[&str] = &[
    "suscripción a",
    "suscripcion a",
    "suscripción de",
    "suscripcion de",
    "servicio de",
    "recarga de",
    "compra en",
    "compra de",
    "gasto en",
    "gasto de",
    "pago de",
    "pago a",
    "pago en",
    "en",
];

/// Leading articles dropped after filler removal.
const ARTICLES: &[&str] = &["el", "la", "los", "las", "un", "una", "unos", "unas"];

/// Lowercase, collapse whitespace runs to single spaces, trim ends.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn raw merchant text into a display description: normalized, filler
/// prefixes and leading articles stripped, each remaining word capitalized.
/// Cleaning an already-clean description changes nothing.
///
/// Empty input yields an empty string.
pub fn clean_description(text: &str) -> String {
    let mut norm = normalize(text);
    if norm.is_empty() {
        return String::new();
    }

    loop {
        let stripped = FILLER_PREFIXES
            .iter()
            .chain(ARTICLES.iter())
            .find_map(|prefix| strip_word_prefix(&norm, prefix).map(str::to_string));
        match stripped {
            Some(rest) => norm = rest,
            None => break,
        }
    }

    norm.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip `prefix` only when it is followed by more text, so a merchant whose
/// whole name matches a filler phrase is left alone.
fn strip_word_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(prefix)?;
    let rest = rest.strip_prefix(' ')?;
    if rest.is_empty() { None } else { Some(rest) }
}

/// Uppercase the first character of a word, leaving the rest as-is.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Uber   Eats \t MX "), "uber eats mx");
    }

    #[test]
    fn test_clean_strips_filler_prefix() {
        assert_eq!(clean_description("pago de luz"), "Luz");
        assert_eq!(clean_description("compra en walmart"), "Walmart");
        assert_eq!(clean_description("suscripción a netflix"), "Netflix");
    }

    #[test]
    fn test_clean_strips_chained_fillers() {
        // stripping one filler can expose another; both go
        assert_eq!(clean_description("pago de servicio de agua"), "Agua");
        assert_eq!(clean_description("el pago de agua"), "Agua");
    }

    #[test]
    fn test_clean_strips_leading_article() {
        assert_eq!(clean_description("el oxxo de la esquina"), "Oxxo De La Esquina");
        // a bare article is not erased into nothing
        assert_eq!(clean_description("la"), "La");
    }

    #[test]
    fn test_clean_capitalizes_words() {
        assert_eq!(clean_description("uber eats"), "Uber Eats");
        assert_eq!(clean_description("CAFÉ"), "Café");
    }

    #[test]
    fn test_clean_empty_input() {
        assert_eq!(clean_description(""), "");
        assert_eq!(clean_description("   "), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for input in [
            "compra en walmart",
            "pago de la renta",
            "pago de servicio de agua",
            "el pago de la luz",
            "Uber Eats",
            "el super",
            "gasolina",
            "",
        ] {
            let once = clean_description(input);
            assert_eq!(clean_description(&once), once, "input: {input:?}");
        }
    }
}
