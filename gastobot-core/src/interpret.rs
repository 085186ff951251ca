//! The orchestrator: raw message text -> finalized [`ExpenseRecord`].
//!
//! Each stage has a single deterministic authority that can overrule the
//! model: date arithmetic, keyword detectors, regex fallbacks, then the
//! catalog. The model only fills in what no rule can check.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::CatalogIndex;
use crate::dates;
use crate::detect::{detect_payer, detect_payment_method};
use crate::error::InterpretError;
use crate::fallback::{extract_amount, extract_merchant};
use crate::normalize::{clean_description, normalize};
use crate::record::{ExpenseRecord, PaymentMethod};
use crate::rules::HouseholdRules;

/// Text-completion service. Treated as unreliable: it may omit fields,
/// hallucinate values, or wrap the JSON in prose.
#[allow(async_fn_in_trait)]
pub trait ModelClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Stateless per request; the catalog is passed per call so a reload swaps
/// in a new index without touching the interpreter.
pub struct Interpreter<M> {
    model: M,
    rules: HouseholdRules,
}

/// Raw fields as the model reported them. Every field may be missing or
/// wrongly typed (`monto` arrives as number or string depending on the
/// model's mood), so each one stays a `Value` until coerced. A nonsensical
/// field degrades to a safe default; only malformed JSON fails the request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelFields {
    fecha: serde_json::Value,
    descripcion: serde_json::Value,
    monto: serde_json::Value,
    metodo_pago: serde_json::Value,
    tarjeta: serde_json::Value,
}

impl<M: ModelClient> Interpreter<M> {
    pub fn new(model: M, rules: HouseholdRules) -> Self {
        Self { model, rules }
    }

    /// Interpret one expense message against `today` and the given catalog.
    pub async fn interpret(
        &self,
        text: &str,
        today: NaiveDate,
        catalog: &CatalogIndex,
    ) -> Result<ExpenseRecord, InterpretError> {
        let prompt = build_prompt(text, today);
        let reply = self
            .model
            .complete(&prompt)
            .await
            .map_err(InterpretError::Model)?;

        let fields: ModelFields =
            serde_json::from_str(carve_json(&reply)?).map_err(InterpretError::BadJson)?;
        debug!(?fields, "model fields");

        let mut description = clean_description(&coerce_text(&fields.descripcion));
        let mut amount = coerce_amount(&fields.monto);
        let mut method = PaymentMethod::parse(&coerce_text(&fields.metodo_pago));
        let card = coerce_text(&fields.tarjeta);

        // Deterministic detectors outrank the model whenever they fire.
        let detected = detect_payment_method(text);
        if detected != PaymentMethod::Unknown {
            method = detected;
        }

        let date = dates::finalize(text, &coerce_text(&fields.fecha), today);
        let payer = detect_payer(text, &self.rules);

        // Fallback repairs: an empty description, or a payer name posing as
        // one, is replaced by regex extraction from the raw text.
        if description.is_empty() || self.rules.is_payer(&description) {
            description = extract_merchant(text, &self.rules);
        }
        if amount == 0.0 {
            amount = extract_amount(text);
        }

        let key = normalize(&description);
        let (category, tipo) = match catalog.lookup(&key) {
            Some(entry) => (entry.category.clone(), entry.tipo.clone()),
            None if self.rules.is_rent(&key) => (
                self.rules.rent_category.clone(),
                self.rules.rent_tipo.clone(),
            ),
            None => ("otros".to_string(), "otros".to_string()),
        };

        let record = ExpenseRecord {
            date,
            description,
            category,
            tipo,
            amount,
            method,
            card,
            payer,
        };
        debug!(?record, "interpreted expense");
        Ok(record)
    }
}

/// Extraction prompt. The model must not invent a date the user never
/// stated, so `fecha` is required to stay empty unless the text mentions one.
fn build_prompt(text: &str, today: NaiveDate) -> String {
    format!(
        r#"Eres un asistente que extrae información de gastos a partir de mensajes en español.

Hoy es {today}.

Del siguiente texto identifica:
- fecha del gasto SOLO si el texto la menciona explícitamente; si no, deja "fecha" vacía
- descripción del gasto: únicamente el comercio o concepto, sin verbos ni artículos (por ejemplo: "uber", "luz", "super")
- monto como número
- método de pago: exactamente uno de "efectivo", "tarjeta", "transferencia", o "" si no se menciona
- tarjeta o banco si se menciona (por ejemplo: BBVA, AMEX, Banorte), o "" si no

Devuelve SOLO un JSON válido con esta estructura, sin texto extra:

{{
  "fecha": "YYYY-MM-DD",
  "descripcion": "texto corto",
  "monto": 123.45,
  "metodo_pago": "tarjeta | efectivo | transferencia | ",
  "tarjeta": ""
}}

Texto de entrada:
"""{text}""""#
    )
}

/// Locate the JSON object between the first `{` and the last `}`.
fn carve_json(reply: &str) -> Result<&str, InterpretError> {
    let start = reply.find('{').ok_or(InterpretError::NoJson)?;
    let end = reply.rfind('}').ok_or(InterpretError::NoJson)?;
    if end < start {
        return Err(InterpretError::NoJson);
    }
    Ok(&reply[start..=end])
}

/// Coerce a text field to a trimmed string; anything that isn't text-like
/// degrades to empty.
fn coerce_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Coerce whatever the model put in `monto` into a non-negative number;
/// 0 when unrecoverable.
fn coerce_amount(value: &serde_json::Value) -> f64 {
    let amount = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().replace(',', "").parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if amount.is_finite() { amount.abs() } else { 0.0 }
}
