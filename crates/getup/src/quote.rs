//! Fetches the daily poem line from the quote API.

use anyhow::{Context as _, Result};
use thiserror::Error;

use crate::config::QuoteConfig;
use crate::version::user_agent;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP status: {0}")]
    Status(reqwest::StatusCode),
    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Response has no string `content` field")]
    MissingContent,
}

/// Where the quote text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub source: QuoteSource,
}

pub struct QuoteProvider {
    http_client: reqwest::Client,
    endpoint: String,
    fallback: String,
}

impl QuoteProvider {
    pub fn new(config: &QuoteConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent())
            .build()
            .context("Failed to create HTTP client for quote provider")?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            fallback: config.fallback.clone(),
        })
    }

    /// Fetches a quote, substituting the fallback on any failure.
    pub async fn fetch(&self) -> Quote {
        match self.fetch_remote().await {
            Ok(text) => Quote {
                text,
                source: QuoteSource::Remote,
            },
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    error = %e,
                    "Failed to fetch quote, using fallback"
                );
                Quote {
                    text: self.fallback.clone(),
                    source: QuoteSource::Fallback,
                }
            }
        }
    }

    async fn fetch_remote(&self) -> Result<String, QuoteError> {
        let response = self.http_client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            return Err(QuoteError::Status(response.status()));
        }

        let body = response.text().await?;
        parse_content(&body)
    }
}

fn parse_content(body: &str) -> Result<String, QuoteError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    value
        .get("content")
        .and_then(|c| c.as_str())
        .map(str::to_owned)
        .ok_or(QuoteError::MissingContent)
}
