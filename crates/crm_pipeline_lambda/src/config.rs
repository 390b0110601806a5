//! Environment configuration for both Lambda binaries.
//!
//! Values are read once at cold start. Parsing goes through a lookup function
//! so tests can supply variables without touching the process environment.

use std::time::Duration;

use crate::adapters::lookup::LEAD_ID_PLACEHOLDER;

pub const DEFAULT_RAW_PREFIX: &str = "crm/";
pub const DEFAULT_ENRICHED_PREFIX: &str = "leads/";
pub const DEFAULT_LOOKUP_URL_TEMPLATE: &str =
    "https://dea-lead-owner.s3.us-east-1.amazonaws.com/{lead_id}.json";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub raw_bucket: String,
    pub raw_prefix: String,
    pub queue_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichConfig {
    pub enriched_bucket: String,
    pub enriched_prefix: String,
    pub topic_arn: String,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub url_template: String,
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_LOOKUP_URL_TEMPLATE.to_string(),
            timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
        }
    }
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            raw_bucket: required(&lookup, "CRM_RAW_BUCKET")?,
            raw_prefix: optional(&lookup, "CRM_RAW_PREFIX", DEFAULT_RAW_PREFIX),
            queue_url: required(&lookup, "CRM_QUEUE_URL")?,
        })
    }
}

impl EnrichConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            enriched_bucket: required(&lookup, "CRM_ENRICHED_BUCKET")?,
            enriched_prefix: optional(&lookup, "CRM_ENRICHED_PREFIX", DEFAULT_ENRICHED_PREFIX),
            topic_arn: required(&lookup, "CRM_NOTIFICATION_TOPIC_ARN")?,
            lookup: LookupConfig::from_lookup(&lookup)?,
        })
    }
}

impl LookupConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url_template = optional(
            &lookup,
            "CRM_LOOKUP_URL_TEMPLATE",
            DEFAULT_LOOKUP_URL_TEMPLATE,
        );
        if !url_template.contains(LEAD_ID_PLACEHOLDER) {
            return Err(ConfigError::Invalid {
                name: "CRM_LOOKUP_URL_TEMPLATE",
                reason: format!("template must contain {LEAD_ID_PLACEHOLDER}"),
            });
        }

        let timeout_secs = match non_blank(&lookup, "CRM_LOOKUP_TIMEOUT_SECS") {
            None => DEFAULT_LOOKUP_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "CRM_LOOKUP_TIMEOUT_SECS",
                        reason: format!("expected a positive number of seconds, got '{raw}'"),
                    })
                }
            },
        };

        Ok(Self {
            url_template,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn non_blank(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    non_blank(lookup, name).ok_or(ConfigError::Missing(name))
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    non_blank(lookup, name).unwrap_or_else(|| default.to_string())
}
