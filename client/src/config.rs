use std::env;

use reqwest::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "local-model";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_PROMPT_PREFIX: &str = "Extract invoice details: ";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Where and how the chat-completion request is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub model: String,
    pub temperature: f32,
    pub prompt_prefix: String,
}

impl ClientConfig {
    /// Reads `CHAT_ENDPOINT`, `CHAT_MODEL`, `CHAT_TEMPERATURE` and `PROMPT_PREFIX`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = lookup("CHAT_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model = lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let prompt_prefix =
            lookup("PROMPT_PREFIX").unwrap_or_else(|| DEFAULT_PROMPT_PREFIX.to_string());
        let temperature = match lookup("CHAT_TEMPERATURE") {
            Some(raw) => parse_temperature(&raw)?,
            None => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            endpoint: parse_endpoint(&endpoint)?,
            model,
            temperature,
            prompt_prefix,
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_prompt_prefix(mut self, prompt_prefix: impl Into<String>) -> Self {
        self.prompt_prefix = prompt_prefix.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Result<Self, ConfigError> {
        self.temperature = check_temperature(temperature)?;
        Ok(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            prompt_prefix: DEFAULT_PROMPT_PREFIX.to_string(),
        }
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        key: "CHAT_ENDPOINT",
        message: format!("{raw:?} is not a valid URL ({e})"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidValue {
            key: "CHAT_ENDPOINT",
            message: format!("unsupported scheme {other:?}"),
        }),
    }
}

fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let value = raw.trim().parse::<f32>().map_err(|_| ConfigError::InvalidValue {
        key: "CHAT_TEMPERATURE",
        message: format!("{raw:?} is not a number"),
    })?;
    check_temperature(value)
}

fn check_temperature(value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            key: "CHAT_TEMPERATURE",
            message: format!("{value} must be a non-negative number"),
        })
    }
}
