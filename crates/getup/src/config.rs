use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use std::fs;
use std::path::Path;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Shanghai;
pub const DEFAULT_QUOTE_ENDPOINT: &str = "https://v1.jinrishici.com/all";
pub const DEFAULT_FALLBACK_QUOTE: &str =
    "赏花归去马如飞\r\n去马如飞酒力微\r\n酒力微醒时已暮\r\n醒时已暮赏花归\r\n";

pub const MEMOS_URL_VAR: &str = "MEMOS_URL";
pub const MEMOS_TOKEN_VAR: &str = "MEMOS_TOKEN";

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    #[serde_as(as = "DisplayFromStr")]
    pub timezone: Tz,
    pub quote: QuoteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            quote: QuoteConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub endpoint: String,
    pub fallback: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_QUOTE_ENDPOINT.to_string(),
            fallback: DEFAULT_FALLBACK_QUOTE.to_string(),
        }
    }
}

/// Memos connection settings. Only ever sourced from the environment so the
/// token never lands in a config file.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub url: String,
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Reads `MEMOS_URL` and `MEMOS_TOKEN` from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds credentials from an arbitrary variable lookup.
    ///
    /// Returns `None` if either value is missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(MEMOS_URL_VAR).filter(|v| !v.is_empty())?;
        let token = lookup(MEMOS_TOKEN_VAR).filter(|v| !v.is_empty())?;
        Some(Self { url, token })
    }
}

pub fn open_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
    let config: Config = toml::from_str(&content).context("Failed to parse configuration file")?;
    Ok(config)
}

/// Like [`open_config`], but a missing file yields the built-in defaults.
pub fn open_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        open_config(path)
    } else {
        Ok(Config::default())
    }
}

pub fn write_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let content =
        toml::to_string_pretty(&Config::default()).context("Failed to serialize configuration")?;
    fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
    Ok(())
}
