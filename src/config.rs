use crate::constants::{
    DEFAULT_HOST, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_OPENAI_API_BASE, DEFAULT_PINATA_API_URL,
    DEFAULT_PORT,
};
use std::{env, time::Duration};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Process-wide settings. Provider credentials never live here; they arrive
/// with each request.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openai_api_base: String,
    pub pinata_api_url: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            openai_api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            pinata_api_url: DEFAULT_PINATA_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(non_empty_env)
    }

    /// Builds a config from any variable source; `var` returns `None` for
    /// unset or blank values.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse_var(&var, "PORT")?.unwrap_or(defaults.port),
            openai_api_base: var("OPENAI_API_BASE")
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openai_api_base),
            pinata_api_url: var("PINATA_API_URL")
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or(defaults.pinata_api_url),
            http_timeout: parse_var(&var, "HTTP_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.openai_api_base)
    }

    pub fn image_generations_url(&self) -> String {
        format!("{}/images/generations", self.openai_api_base)
    }

    pub fn build_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder().timeout(self.http_timeout).build()
    }
}

pub fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T, F>(var: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(None),
    }
}
