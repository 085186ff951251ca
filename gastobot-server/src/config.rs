use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gastobot_core::{ColumnKey, HouseholdRules, default_columns};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub llm: LlmSection,
    pub sheets: SheetsSection,
    pub rules: HouseholdRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: String,
    /// IANA timezone used to compute "today"; the host clock is usually UTC
    /// on a PaaS and would shift the date boundary.
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub model: String,
    pub base_url: String,
    /// Env var holding the API key; the key itself never lives in the file.
    pub api_key_env: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsSection {
    pub spreadsheet_id: String,
    pub catalog_range: String,
    pub ledger_range: String,
    pub token_env: String,
    /// Ledger column order; the sheet schema evolved, so it is configurable.
    pub columns: Vec<ColumnKey>,
    pub source_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerSection::default(),
            llm: LlmSection::default(),
            sheets: SheetsSection::default(),
            rules: HouseholdRules::default(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            timezone: "America/Mexico_City".to_string(),
        }
    }
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.0,
        }
    }
}

impl Default for SheetsSection {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            catalog_range: "CatalogoGastos!A:C".to_string(),
            ledger_range: "Gastos AI!A:I".to_string(),
            token_env: "SHEETS_TOKEN".to_string(),
            columns: default_columns(),
            source_label: "WhatsApp".to_string(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).context("parse config")
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    let s = toml::to_string_pretty(&Config::default()).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.server.bind, "0.0.0.0:5000");
        assert_eq!(back.sheets.columns, default_columns());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [server]
            bind = "127.0.0.1:8080"

            [rules]
            payers = ["ana"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:8080");
        assert_eq!(cfg.server.timezone, "America/Mexico_City");
        assert_eq!(cfg.rules.payers, vec!["ana"]);
        assert_eq!(cfg.rules.rent_keyword, "renta");
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn test_column_order_configurable() {
        let cfg: Config = toml::from_str(
            r#"
            [sheets]
            columns = ["fecha", "pagador", "monto"]
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.sheets.columns,
            vec![ColumnKey::Date, ColumnKey::Payer, ColumnKey::Amount]
        );
    }
}
