//! Client configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `WARDROBE_API_BASE` | `http://localhost:3000` |
//! | `WARDROBE_RESOURCE` | `roupas` |
//! | `WARDROBE_CURRENCY` | `BRL` (`BRL` or `USD`) |

use std::env;

use url::Url;

use crate::error::ConfigError;
use crate::render::CurrencyFormat;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";
pub const DEFAULT_RESOURCE: &str = "roupas";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub resource: String,
    pub currency: CurrencyFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            currency: CurrencyFormat::brl(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys fall back to
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base = get("WARDROBE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Url::parse(&api_base).map_err(|e| ConfigError::InvalidBaseUrl {
            value: api_base.clone(),
            reason: e.to_string(),
        })?;

        let resource = get("WARDROBE_RESOURCE").unwrap_or_else(|| DEFAULT_RESOURCE.to_string());
        let resource = resource.trim_matches('/').to_string();
        if resource.is_empty() {
            return Err(ConfigError::EmptyResource);
        }

        let currency = match get("WARDROBE_CURRENCY").as_deref() {
            None => CurrencyFormat::brl(),
            Some(code) if code.eq_ignore_ascii_case("BRL") => CurrencyFormat::brl(),
            Some(code) if code.eq_ignore_ascii_case("USD") => CurrencyFormat::usd(),
            Some(other) => return Err(ConfigError::UnknownCurrency(other.to_string())),
        };

        Ok(Self {
            api_base,
            resource,
            currency,
        })
    }
}
