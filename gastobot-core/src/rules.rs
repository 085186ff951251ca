//! Deployment-specific interpretation rules: household payer names and the
//! rent special-case. These are configuration data, not logic, so a new
//! household only edits its config file.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdRules {
    /// Name fragments of household members, matched case-insensitively.
    /// A closed list, not open-ended NLP.
    pub payers: Vec<String>,
    /// Keyword that marks a rent payment in free text.
    pub rent_keyword: String,
    /// Canonical description recorded for rent expenses.
    pub rent_label: String,
    /// Category/type forced when the rent keyword misses the catalog;
    /// rent is frequent enough to deserve a fixed override.
    pub rent_category: String,
    pub rent_tipo: String,
}

impl Default for HouseholdRules {
    fn default() -> Self {
        Self {
            payers: vec!["dani".to_string(), "vale".to_string()],
            rent_keyword: "renta".to_string(),
            rent_label: "Renta".to_string(),
            rent_category: "Vivienda".to_string(),
            rent_tipo: "Fijo".to_string(),
        }
    }
}

impl HouseholdRules {
    /// True when the text normalizes to exactly a known payer name.
    /// Used to reject payer names posing as merchant descriptions.
    pub fn is_payer(&self, text: &str) -> bool {
        let norm = normalize(text);
        !norm.is_empty() && self.payers.iter().any(|p| normalize(p) == norm)
    }

    /// True when the text is the rent keyword or the canonical rent label.
    pub fn is_rent(&self, text: &str) -> bool {
        let norm = normalize(text);
        !norm.is_empty()
            && (norm == normalize(&self.rent_keyword) || norm == normalize(&self.rent_label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_payer_exact_normalized_match() {
        let rules = HouseholdRules::default();
        assert!(rules.is_payer("Dani"));
        assert!(rules.is_payer("  dani "));
        assert!(!rules.is_payer("Daniela's Cafe"));
        assert!(!rules.is_payer(""));
    }

    #[test]
    fn test_is_rent_matches_keyword_and_label() {
        let rules = HouseholdRules::default();
        assert!(rules.is_rent("renta"));
        assert!(rules.is_rent("Renta"));
        assert!(!rules.is_rent("rentas y más"));
    }
}
