use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, web};
use anyhow::{Context, Result};
use clap::Parser;
use gastobot_core::{CatalogIndex, Interpreter};
use gastobot_sheets::SheetsClient;
use serde::Deserialize;
use tracing::{info, warn};

mod bot;
mod config;
mod llm;
mod twiml;

use bot::Bot;

struct AppState {
    bot: Bot<llm::OpenAiClient>,
    /// Shared catalog handle. A reload builds a new index and swaps the Arc
    /// wholesale; in-flight requests keep reading the snapshot they cloned.
    catalog: RwLock<Arc<CatalogIndex>>,
    catalog_range: String,
}

#[get("/")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("gastobot ok")
}

#[derive(Debug, Deserialize)]
struct TwilioForm {
    #[serde(rename = "Body", default)]
    body: String,
    #[serde(rename = "From", default)]
    from: String,
}

/// Twilio calls this for every inbound WhatsApp message. Any failure maps to
/// the one generic reply; details stay in the log.
#[post("/webhook-whatsapp")]
async fn webhook(form: web::Form<TwilioForm>, state: web::Data<AppState>) -> impl Responder {
    info!(from = %form.from, "incoming message");

    let catalog = {
        let guard = state.catalog.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    };

    let reply = match state.bot.register(&form.body, &catalog).await {
        Ok(msg) => msg,
        Err(err) => {
            warn!(error = ?err, "failed to register expense");
            bot::GENERIC_ERROR.to_string()
        }
    };

    HttpResponse::Ok()
        .content_type("application/xml")
        .body(twiml::message_response(&reply))
}

/// Manual catalog refresh: rebuild from the sheet and swap the reference.
#[post("/catalog/reload")]
async fn reload_catalog(state: web::Data<AppState>) -> impl Responder {
    match state.bot.sheets.fetch_rows(&state.catalog_range).await {
        Ok(rows) => {
            let index = CatalogIndex::from_rows(&rows);
            let entries = index.len();
            *state.catalog.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(index);
            info!(entries, "catalog reloaded");
            HttpResponse::Ok().json(serde_json::json!({ "entries": entries }))
        }
        Err(err) => {
            warn!(error = ?err, "catalog reload failed");
            HttpResponse::BadGateway()
                .json(serde_json::json!({ "error": "catalog source unreachable" }))
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gastobot", version, about = "WhatsApp expense bot")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = "gastobot.toml")]
    config: PathBuf,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    if args.init_config {
        return config::init_config(&args.config);
    }

    let cfg = config::load_config(&args.config)?;
    let tz: chrono_tz::Tz = cfg
        .server
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {}", cfg.server.timezone))?;

    let token = std::env::var(&cfg.sheets.token_env)
        .with_context(|| format!("missing {} in environment", cfg.sheets.token_env))?;
    let sheets = SheetsClient::new(&cfg.sheets.spreadsheet_id, token)?;
    let model = llm::OpenAiClient::from_config(&cfg.llm)?;

    // Catalog load fails soft: with an empty index every lookup falls back
    // to "otros"/"otros" and the bot keeps answering.
    let catalog = match sheets.fetch_rows(&cfg.sheets.catalog_range).await {
        Ok(rows) => CatalogIndex::from_rows(&rows),
        Err(err) => {
            warn!(error = ?err, "catalog load failed, starting with empty index");
            CatalogIndex::default()
        }
    };
    info!(entries = catalog.len(), "catalog loaded");

    let bot = Bot {
        interpreter: Interpreter::new(model, cfg.rules.clone()),
        sheets,
        ledger_range: cfg.sheets.ledger_range.clone(),
        columns: cfg.sheets.columns.clone(),
        source_label: cfg.sheets.source_label.clone(),
        tz,
    };

    let state = web::Data::new(AppState {
        bot,
        catalog: RwLock::new(Arc::new(catalog)),
        catalog_range: cfg.sheets.catalog_range.clone(),
    });

    info!(bind = %cfg.server.bind, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(health)
            .service(webhook)
            .service(reload_catalog)
    })
    .bind(&cfg.server.bind)?
    .run()
    .await?;

    Ok(())
}
