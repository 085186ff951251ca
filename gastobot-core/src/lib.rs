//! gastobot-core: text-to-structured-expense interpretation pipeline.
//!
//! A raw WhatsApp message goes in, a finalized [`ExpenseRecord`] comes out.
//! The model call is the least trusted source in the pipeline: every field it
//! proposes can be overridden by a deterministic rule (date arithmetic,
//! keyword detectors, regex fallbacks) before the catalog enriches the result.

pub mod catalog;
pub mod dates;
pub mod detect;
pub mod error;
pub mod fallback;
pub mod interpret;
pub mod normalize;
pub mod record;
pub mod rules;

pub use catalog::{CatalogEntry, CatalogIndex};
pub use error::InterpretError;
pub use interpret::{Interpreter, ModelClient};
pub use record::{ColumnKey, ExpenseRecord, PaymentMethod, default_columns};
pub use rules::HouseholdRules;
