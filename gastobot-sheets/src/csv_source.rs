//! Local CSV catalog source, same row shape as the spreadsheet range.
//! Useful for offline runs and for seeding a deployment before the sheet
//! token is wired up.

use std::path::Path;

use anyhow::{Context, Result};

/// Read all rows of a catalog CSV as raw cells. Header handling and key
/// normalization happen in the index builder, not here.
pub fn load_catalog_csv(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_catalog_csv_rows() {
        let path = std::env::temp_dir().join("gastobot_catalog_test.csv");
        fs::write(&path, "Descripción,Categoría,Tipo\nluz,Servicios,Fijo\nuber,Transporte,Variable\n")
            .unwrap();

        let rows = load_catalog_csv(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["luz", "Servicios", "Fijo"]);
        assert_eq!(rows[2][0], "uber");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_catalog_csv("/nonexistent/catalog.csv").is_err());
    }
}
