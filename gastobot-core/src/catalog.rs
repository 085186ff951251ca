//! In-memory catalog index: normalized merchant text -> (category, type).
//!
//! Built wholesale from the catalog source at startup or on an explicit
//! reload; read-only during request handling. When the source is unreachable
//! the caller builds an empty index and every lookup falls back to
//! "otros"/"otros" downstream.

use std::collections::HashMap;

use crate::normalize::normalize;

/// Accepted spellings of the description column; a row whose first cell
/// normalizes to one of these is a header and is skipped.
const HEADER_TOKENS: &[&str] = &["descripcion", "descripción", "description"];

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub category: String,
    pub tipo: String,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: HashMap<String, CatalogEntry>,
}

impl CatalogIndex {
    /// Build the index from raw catalog rows. Rows with fewer than three
    /// cells or an empty normalized key are skipped; on duplicate keys the
    /// later row wins.
    pub fn from_rows(rows: &[Vec<String>]) -> CatalogIndex {
        let mut entries = HashMap::new();
        for row in rows {
            if row.len() < 3 {
                continue;
            }
            let key = normalize(&row[0]);
            if key.is_empty() || HEADER_TOKENS.contains(&key.as_str()) {
                continue;
            }
            entries.insert(
                key,
                CatalogEntry {
                    category: row[1].trim().to_string(),
                    tipo: row[2].trim().to_string(),
                },
            );
        }
        CatalogIndex { entries }
    }

    /// Exact-match lookup on an already-normalized key. A miss is not an
    /// error; the caller supplies the default.
    pub fn lookup(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_build_skips_header_row() {
        let idx = CatalogIndex::from_rows(&rows(&[
            &["Descripción", "Categoría", "Tipo"],
            &["luz", "Servicios", "Fijo"],
        ]));
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.lookup("luz").unwrap().category, "Servicios");
    }

    #[test]
    fn test_build_normalizes_keys_and_trims_values() {
        let idx = CatalogIndex::from_rows(&rows(&[&["  Uber  Eats ", " Comida ", " Variable "]]));
        let entry = idx.lookup("uber eats").unwrap();
        assert_eq!(entry.category, "Comida");
        assert_eq!(entry.tipo, "Variable");
    }

    #[test]
    fn test_duplicate_key_last_row_wins() {
        let idx = CatalogIndex::from_rows(&rows(&[
            &["uber", "Transport", "Ride"],
            &["uber", "Transport", "RideV2"],
        ]));
        assert_eq!(idx.lookup("uber").unwrap().tipo, "RideV2");
    }

    #[test]
    fn test_short_and_empty_rows_skipped() {
        let idx = CatalogIndex::from_rows(&rows(&[
            &["luz", "Servicios"],
            &["   ", "Servicios", "Fijo"],
            &[],
        ]));
        assert!(idx.is_empty());
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let idx = CatalogIndex::default();
        assert!(idx.lookup("uber").is_none());
    }
}
