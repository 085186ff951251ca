//! Finalized expense record and its ledger-row projection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the expense was paid. `Unknown` means neither the model nor the
/// keyword detector found a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "efectivo")]
    Cash,
    #[serde(rename = "tarjeta")]
    Card,
    #[serde(rename = "transferencia")]
    Transfer,
    #[serde(rename = "otro")]
    Unknown,
}

impl PaymentMethod {
    /// Constrain free text (model output) to the fixed vocabulary.
    pub fn parse(text: &str) -> PaymentMethod {
        match text.trim().to_lowercase().as_str() {
            "efectivo" | "cash" => PaymentMethod::Cash,
            "tarjeta" | "card" | "credito" | "crédito" | "debito" | "débito" => {
                PaymentMethod::Card
            }
            "transferencia" | "transfer" | "spei" => PaymentMethod::Transfer,
            _ => PaymentMethod::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "efectivo",
            PaymentMethod::Card => "tarjeta",
            PaymentMethod::Transfer => "transferencia",
            PaymentMethod::Unknown => "otro",
        }
    }
}

/// A fully interpreted expense, ready to be appended to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    /// Always resolved to a concrete date, never blank.
    pub date: NaiveDate,
    /// Normalized merchant/item name (title-cased, no filler words).
    pub description: String,
    /// Catalog category, or "otros" when the lookup missed.
    pub category: String,
    /// Catalog type, or "otros" when the lookup missed.
    pub tipo: String,
    /// Non-negative; 0 when wholly unrecoverable.
    pub amount: f64,
    pub method: PaymentMethod,
    /// Card or bank name; empty string when unspecified.
    pub card: String,
    /// Household member who paid; empty when none detected.
    pub payer: String,
}

/// Ledger columns, in the order a deployment's sheet expects them.
/// The sheet schema evolved across revisions, so the order is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKey {
    #[serde(rename = "fecha")]
    Date,
    #[serde(rename = "descripcion")]
    Description,
    #[serde(rename = "categoria")]
    Category,
    #[serde(rename = "tipo")]
    Tipo,
    #[serde(rename = "pagador")]
    Payer,
    #[serde(rename = "monto")]
    Amount,
    #[serde(rename = "metodo")]
    Method,
    #[serde(rename = "tarjeta")]
    Card,
    #[serde(rename = "registrado")]
    Timestamp,
    #[serde(rename = "origen")]
    Source,
}

/// Column order of the original "Gastos AI" tab.
pub fn default_columns() -> Vec<ColumnKey> {
    vec![
        ColumnKey::Date,
        ColumnKey::Description,
        ColumnKey::Category,
        ColumnKey::Tipo,
        ColumnKey::Amount,
        ColumnKey::Method,
        ColumnKey::Card,
        ColumnKey::Timestamp,
        ColumnKey::Source,
    ]
}

impl ExpenseRecord {
    /// Project the record into a ledger row in the given column order.
    /// `registered_at` and `source` fill the bookkeeping columns.
    pub fn row(&self, columns: &[ColumnKey], registered_at: &str, source: &str) -> Vec<String> {
        columns
            .iter()
            .map(|col| match col {
                ColumnKey::Date => self.date.format("%Y-%m-%d").to_string(),
                ColumnKey::Description => self.description.clone(),
                ColumnKey::Category => self.category.clone(),
                ColumnKey::Tipo => self.tipo.clone(),
                ColumnKey::Payer => self.payer.clone(),
                ColumnKey::Amount => format_amount(self.amount),
                ColumnKey::Method => self.method.as_str().to_string(),
                ColumnKey::Card => self.card.clone(),
                ColumnKey::Timestamp => registered_at.to_string(),
                ColumnKey::Source => source.to_string(),
            })
            .collect()
    }
}

/// Render whole amounts without a trailing ".0" so the sheet treats them
/// as plain numbers.
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount}")
    }
}
