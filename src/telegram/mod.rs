//! Telegram gateway.
//!
//! Long-polls the Bot API for channel messages and feeds their text into
//! the pipeline, one message per call. Transport hiccups are retried on
//! the next poll cycle; the pipeline itself stays retry-free.

mod types;

pub use types::{ApiResponse, Chat, Message, Update};

use crate::config::TelegramConfig;
use crate::pipeline::SignalPipeline;
use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};

const API_BASE: &str = "https://api.telegram.org";
/// Long-poll hold time; the HTTP timeout leaves headroom above it.
const POLL_TIMEOUT_SECS: u64 = 50;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Polls one bot's update stream, filtered to a single chat.
pub struct TelegramListener {
    http: Client,
    base_url: String,
    chat_id: i64,
    offset: i64,
}

impl TelegramListener {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        Self::with_api_base(API_BASE, &config.token, config.chat_id)
    }

    fn with_api_base(api_base: &str, token: &str, chat_id: i64) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            base_url: format!("{api_base}/bot{token}"),
            chat_id,
            offset: 0,
        })
    }

    /// Poll-and-dispatch until the shutdown flag is raised.
    pub async fn run(&mut self, pipeline: &SignalPipeline, shutdown: &AtomicBool) -> Result<()> {
        info!(chat_id = self.chat_id, "Starting telegram polling");
        while !shutdown.load(Ordering::SeqCst) {
            let updates = match self.fetch_updates().await {
                Ok(updates) => updates,
                Err(e) => {
                    warn!(error = %e, "Update poll failed, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                self.offset = self.offset.max(update.update_id + 1);
                let Some(text) = chat_text(update, self.chat_id) else {
                    continue;
                };
                debug!(preview = %text.replace('\n', " ").chars().take(80).collect::<String>(),
                    "Incoming message");

                match pipeline.handle_message(&text).await {
                    Ok(outcomes) if outcomes.is_empty() => {}
                    Ok(outcomes) => {
                        let filled = outcomes.iter().filter(|o| o.success).count();
                        info!(filled, total = outcomes.len(), "Signal dispatched");
                    }
                    Err(e) => error!(error = %e, "Pipeline failed for message"),
                }
            }
        }
        info!("Telegram polling stopped");
        Ok(())
    }

    /// Fetch the next update batch past the current offset.
    async fn fetch_updates(&self) -> Result<Vec<Update>> {
        let url = format!("{}/getUpdates", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("timeout", POLL_TIMEOUT_SECS.to_string()),
                ("offset", self.offset.to_string()),
            ])
            .send()
            .await
            .context("Failed to fetch telegram updates")?;

        let body: ApiResponse<Vec<Update>> = response
            .json()
            .await
            .context("Failed to parse getUpdates response")?;

        if !body.ok {
            bail!(
                "telegram API error: {}",
                body.description.unwrap_or_else(|| "unknown".to_string())
            );
        }
        Ok(body.result.unwrap_or_default())
    }
}

/// Text of an update addressed to the configured chat, from either the
/// `message` or `channel_post` envelope.
fn chat_text(update: Update, chat_id: i64) -> Option<String> {
    let message = update.message.or(update.channel_post)?;
    if message.chat.id != chat_id {
        debug!(chat = message.chat.id, "Ignoring message from foreign chat");
        return None;
    }
    message.text
}
