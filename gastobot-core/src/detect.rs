//! Keyword detectors that outrank model output whenever they fire.

use crate::normalize::{capitalize, normalize};
use crate::record::PaymentMethod;
use crate::rules::HouseholdRules;

// Checked in this order: transfer wording can co-occur with a generic
// "tarjeta" mention ("transferencia desde la tarjeta"), so transfer wins.
const TRANSFER_WORDS: &[&str] = &["transferencia", "transferí", "transferi", "transfer", "spei"];
const CASH_WORDS: &[&str] = &["efectivo"];
const CARD_WORDS: &[&str] = &["tarjeta", "tdc", "crédito", "credito", "débito", "debito"];

/// Scan the raw text for a payment-method signal.
pub fn detect_payment_method(text: &str) -> PaymentMethod {
    let lower = normalize(text);
    if TRANSFER_WORDS.iter().any(|w| lower.contains(w)) {
        return PaymentMethod::Transfer;
    }
    if CASH_WORDS.iter().any(|w| lower.contains(w)) {
        return PaymentMethod::Cash;
    }
    if CARD_WORDS.iter().any(|w| lower.contains(w)) {
        return PaymentMethod::Card;
    }
    PaymentMethod::Unknown
}

/// Scan the text for a known household member name; empty when none match.
pub fn detect_payer(text: &str, rules: &HouseholdRules) -> String {
    let lower = normalize(text);
    for name in &rules.payers {
        let fragment = normalize(name);
        if !fragment.is_empty() && lower.contains(&fragment) {
            return capitalize(&fragment);
        }
    }
    String::new()
}
