//! The register flow: interpret one message, append the ledger row, build
//! the WhatsApp confirmation text.

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use gastobot_core::{CatalogIndex, ColumnKey, ExpenseRecord, Interpreter, ModelClient};
use gastobot_sheets::SheetsClient;
use tracing::info;

/// Single generic reply for any failure; diagnostic detail goes to the log,
/// never to the chat.
pub const GENERIC_ERROR: &str =
    "❌ Ocurrió un error al registrar tu gasto.\nRevisa el formato o intenta de nuevo.";

pub struct Bot<M> {
    pub(crate) interpreter: Interpreter<M>,
    pub(crate) sheets: SheetsClient,
    pub(crate) ledger_range: String,
    pub(crate) columns: Vec<ColumnKey>,
    pub(crate) source_label: String,
    pub(crate) tz: Tz,
}

impl<M: ModelClient> Bot<M> {
    /// Interpret the message and append it to the ledger. A failed append
    /// leaves no partial record; the caller maps any error to
    /// [`GENERIC_ERROR`].
    pub async fn register(&self, text: &str, catalog: &CatalogIndex) -> Result<String> {
        let now = Utc::now().with_timezone(&self.tz);
        let record = self
            .interpreter
            .interpret(text, now.date_naive(), catalog)
            .await?;

        let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
        let row = record.row(&self.columns, &stamp, &self.source_label);
        self.sheets
            .append_row(&self.ledger_range, &row)
            .await
            .context("append ledger row")?;

        info!(
            date = %record.date,
            description = %record.description,
            amount = record.amount,
            "expense recorded"
        );
        Ok(confirmation(&record))
    }
}

/// Confirmation text echoed back over WhatsApp.
pub fn confirmation(record: &ExpenseRecord) -> String {
    let mut msg = format!(
        "✅ Gasto registrado:\n\
         • Fecha: {}\n\
         • Descripción: {}\n\
         • Categoría: {}\n\
         • Tipo: {}\n\
         • Monto: {}\n\
         • Método: {}\n\
         • Tarjeta: {}",
        record.date.format("%Y-%m-%d"),
        record.description,
        record.category,
        record.tipo,
        record.amount,
        record.method.as_str(),
        if record.card.is_empty() { "-" } else { &record.card },
    );
    if !record.payer.is_empty() {
        msg.push_str(&format!("\n• Pagó: {}", record.payer));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gastobot_core::PaymentMethod;

    fn record() -> ExpenseRecord {
        ExpenseRecord {
            date: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
            description: "Walmart".to_string(),
            category: "Super".to_string(),
            tipo: "Variable".to_string(),
            amount: 500.0,
            method: PaymentMethod::Card,
            card: "AMEX".to_string(),
            payer: String::new(),
        }
    }

    #[test]
    fn test_confirmation_lists_fields() {
        let msg = confirmation(&record());
        assert!(msg.starts_with("✅ Gasto registrado:"));
        assert!(msg.contains("• Fecha: 2025-06-09"));
        assert!(msg.contains("• Descripción: Walmart"));
        assert!(msg.contains("• Monto: 500"));
        assert!(msg.contains("• Método: tarjeta"));
        assert!(msg.contains("• Tarjeta: AMEX"));
        assert!(!msg.contains("Pagó"));
    }

    #[test]
    fn test_confirmation_empty_card_and_payer() {
        let mut rec = record();
        rec.card = String::new();
        rec.payer = "Dani".to_string();
        let msg = confirmation(&rec);
        assert!(msg.contains("• Tarjeta: -"));
        assert!(msg.ends_with("• Pagó: Dani"));
    }
}
