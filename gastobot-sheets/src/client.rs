//! Spreadsheet values-API client: read a reference range, append ledger rows.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::debug;

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Client for one spreadsheet. The bearer token is provisioned outside the
/// process (service-account flow on the host); a slow or failed call only
/// affects the request that made it.
pub struct SheetsClient {
    http: reqwest::Client,
    token: String,
    spreadsheet_id: String,
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    pub fn new(spreadsheet_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            token: token.into(),
            spreadsheet_id: spreadsheet_id.into(),
        })
    }

    /// Fetch all rows of a range like `"CatalogoGastos!A:C"`. The caller
    /// decides whether a failure is fatal; the catalog load treats it as
    /// soft and falls back to an empty index.
    pub async fn fetch_rows(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let url = format!("{BASE_URL}/{}/values/{range}", self.spreadsheet_id);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("sheets values request")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("sheets values error: {status} {body}");
        }

        let out: ValuesResponse = resp.json().await.context("parse sheets values response")?;
        debug!(range, rows = out.values.len(), "fetched sheet range");
        Ok(out.values)
    }

    /// Append one row to a range like `"Gastos AI!A:I"`, letting the sheet
    /// parse dates and numbers (`USER_ENTERED`, as the ledger expects).
    pub async fn append_row(&self, range: &str, row: &[String]) -> Result<()> {
        let url = format!(
            "{BASE_URL}/{}/values/{range}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.spreadsheet_id
        );
        let body = serde_json::json!({ "values": [row] });

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .context("sheets append request")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("sheets append error: {status} {body}");
        }

        debug!(range, cells = row.len(), "appended ledger row");
        Ok(())
    }
}
