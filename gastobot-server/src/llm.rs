//! OpenAI-compatible chat-completions client implementing the core's
//! [`ModelClient`] seam.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use gastobot_core::ModelClient;
use serde::{Deserialize, Serialize};

use crate::config::LlmSection;

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn from_config(cfg: &LlmSection) -> Result<Self> {
        let api_key = std::env::var(&cfg.api_key_env)
            .with_context(|| format!("missing {} in environment", cfg.api_key_env))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            api_key,
            model: cfg.model.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            temperature: cfg.temperature,
        })
    }
}

impl ModelClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: MsgOut,
        }

        #[derive(Deserialize)]
        struct MsgOut {
            content: Option<String>,
        }

        let body = Req {
            model: &self.model,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let resp = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("openai request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("openai error: {status} {txt}");
        }

        let out: Resp = resp.json().await.context("parse openai response")?;
        let content = out
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }
}
