use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::config::GeminiConfig;

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        Some(text.trim().to_string()).filter(|t| !t.is_empty())
    }
}

fn translation_prompt(indonesian_text: &str) -> String {
    format!(
        "Translate the following Indonesian text to English. Only return the translated text, \
         nothing else. If the text is already in English or contains mixed languages, just clean \
         it up and return proper English.\n\nText to translate:\n{}",
        indonesian_text
    )
}

/// Indonesian to English through Gemini. Fails open: any problem yields the
/// source text unchanged.
pub struct TranslationService {
    http_client: Client,
    api_key: Option<Secret<String>>,
    base_url: String,
    model: String,
}

impl TranslationService {
    pub fn new(config: &GeminiConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: config.api_key().cloned(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    #[tracing::instrument(name = "Translate To English", skip(self, text))]
    pub async fn translate_to_english(&self, text: &str) -> String {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::info!("No Gemini API key configured, returning original text");
                return text.to_string();
            }
        };

        if text.trim().is_empty() {
            return text.to_string();
        }

        match self.generate(api_key, &translation_prompt(text)).await {
            Ok(Some(translated)) => translated,
            Ok(None) => {
                tracing::warn!("Gemini returned no text, returning original text");
                text.to_string()
            }
            Err(e) => {
                tracing::error!("Gemini translation error: {}", e);
                text.to_string()
            }
        }
    }

    async fn generate(
        &self,
        api_key: &Secret<String>,
        prompt: &str,
    ) -> Result<Option<String>, reqwest::Error> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(url)
            .query(&[("key", api_key.expose_secret())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        Ok(response.text())
    }
}
