//! HTTP implementations of the generation and translation collaborators.
//!
//! Both are thin JSON clients against configurable endpoints. The translator
//! honors the fail-open contract: any failure logs a warning and hands the
//! caller its input back.

use async_trait::async_trait;
use rozgar_core::traits::{Generator, Translator};
use rozgar_core::types::{ConversationTurn, Document, Intent};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    query: &'a str,
    context: Vec<&'a str>,
    intent: &'a str,
    language: &'a str,
    history: &'a [ConversationTurn],
}

#[derive(Deserialize)]
struct GenerateResponse {
    text: String,
}

pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpGenerator {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint: endpoint.into(), api_key })
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(
        &self,
        query: &str,
        context: &[Document],
        intent: Intent,
        language: &str,
        history: &[ConversationTurn],
    ) -> anyhow::Result<String> {
        let payload = GenerateRequest {
            query,
            context: context.iter().map(|d| d.content.as_str()).collect(),
            intent: intent.as_str(),
            language,
            history,
        };
        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?.error_for_status()?;
        let body: GenerateResponse = response.json().await?;
        Ok(body.text)
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    text: String,
}

pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint: endpoint.into() })
    }

    async fn request(&self, text: &str, source: &str, target: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TranslateRequest { text, source, target })
            .send()
            .await?
            .error_for_status()?;
        let body: TranslateResponse = response.json().await?;
        Ok(body.text)
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> String {
        match self.request(text, source, target).await {
            Ok(translated) => translated,
            Err(error) => {
                tracing::warn!(%error, "translation failed, returning original text");
                text.to_string()
            }
        }
    }
}

/// Used when no translation endpoint is configured.
pub struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _source: &str, _target: &str) -> String {
        text.to_string()
    }
}
