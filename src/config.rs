use crate::constants::protocols::ALLOWED_HTTP;
use crate::errors::ConfigError;
use url::Url;

const ENV_BASE_URL: &str = "APIHUB_BASE_URL";
const ENV_TOKEN: &str = "APIHUB_TOKEN";

/// Immutable backend configuration, read once at startup. The transport
/// holds onto this for the lifetime of the process; nothing re-reads the
/// environment afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub token: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = read_required(ENV_BASE_URL)?;
        let token = read_required(ENV_TOKEN)?;
        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            token,
        })
    }

    pub fn new(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::MissingVar(ENV_TOKEN));
        }
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            token: token.to_string(),
        })
    }
}

fn read_required(var: &'static str) -> Result<String, ConfigError> {
    let value = std::env::var(var).unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingVar(var));
    }
    Ok(trimmed.to_string())
}

fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidBaseUrl {
        var: ENV_BASE_URL,
        reason: err.to_string(),
    })?;
    if !ALLOWED_HTTP.contains(&url.scheme()) {
        return Err(ConfigError::InvalidBaseUrl {
            var: ENV_BASE_URL,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    url.set_fragment(None);
    url.set_query(None);
    // Keep a trailing slash so Url::join treats the path as a directory.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
