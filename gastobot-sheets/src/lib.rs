//! gastobot-sheets: catalog source and ledger sink collaborators.
//!
//! Thin plumbing around the spreadsheet values API plus a local CSV catalog
//! source for offline runs. All interpretation logic lives in gastobot-core.

pub mod client;
pub mod csv_source;

pub use client::SheetsClient;
pub use csv_source::load_catalog_csv;
