use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::core::config::DiscordConfig;
use crate::models::orders::Order;

/// Discord rejects embed field values longer than this.
pub const EMBED_FIELD_LIMIT: usize = 1024;
const ORDER_EMBED_COLOR: u32 = 0x00FF00;
const FOOTER_TEXT: &str = "Cipet Creative Freelancer";

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook responded with {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DiscordEmbed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DiscordWebhookPayload {
    pub embeds: Vec<DiscordEmbed>,
}

/// Display label for a category or sub-service code. Unknown codes pass through.
pub fn service_label(code: &str) -> &str {
    match code {
        "graphicDesign" => "Graphic Design",
        "academicHelp" => "Academic Help (Joki Tugas)",
        "flyer" => "Flyer & Brochure",
        "poster" => "Poster",
        "socialMedia" => "Social Media Content",
        "uiux" => "UI/UX Design",
        "essay" => "Essay / Paper",
        "ppt" => "PowerPoint Presentation",
        "resume" => "Resume / Summary",
        other => other,
    }
}

/// Cap at [`EMBED_FIELD_LIMIT`] characters, marking the cut with `...`.
pub fn truncate_for_embed(text: &str) -> String {
    if text.chars().count() <= EMBED_FIELD_LIMIT {
        return text.to_string();
    }
    let kept: String = text.chars().take(EMBED_FIELD_LIMIT - 3).collect();
    format!("{}...", kept)
}

fn field(name: &str, value: impl Into<String>, inline: bool) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value: value.into(),
        inline,
    }
}

pub fn build_order_payload(order: &Order) -> DiscordWebhookPayload {
    let category = order.service_category.as_str();

    let embed = DiscordEmbed {
        title: "🚀 New Order Received!".to_string(),
        description: Some("A new order has been submitted via the Cipet website.".to_string()),
        color: ORDER_EMBED_COLOR,
        fields: vec![
            field("👤 Client Name", order.name.as_str(), true),
            field("📱 WhatsApp", order.contact.as_str(), true),
            field("📁 Service Category", service_label(category), true),
            field("🔧 Specific Service", service_label(&order.sub_service), true),
            field("⏰ Deadline", order.deadline.as_str(), true),
            field("💰 Budget", format!("Rp {}", order.budget), true),
            field("📝 Project Description", truncate_for_embed(&order.topic), false),
        ],
        footer: Some(EmbedFooter {
            text: FOOTER_TEXT.to_string(),
        }),
        timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    };

    DiscordWebhookPayload {
        embeds: vec![embed],
    }
}

pub struct WebhookService {
    http_client: Client,
    webhook_url: Option<Secret<String>>,
}

impl WebhookService {
    pub fn new(config: &DiscordConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            webhook_url: config.webhook_url().cloned(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Post the new-order embed. `Ok(false)` means no webhook is configured.
    #[tracing::instrument(name = "Notify New Order", skip(self, order), fields(order_id = order.id))]
    pub async fn notify_new_order(&self, order: &Order) -> Result<bool, WebhookError> {
        let url = match &self.webhook_url {
            Some(url) => url,
            None => return Ok(false),
        };

        let response = self
            .http_client
            .post(url.expose_secret())
            .json(&build_order_payload(order))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Rejected { status, body });
        }

        tracing::info!("Order notification delivered");
        Ok(true)
    }
}
