//! Read-only client for the lead owner lookup service.
//!
//! Every failure mode (transport error, timeout, non-200 status, malformed or
//! non-object body) is logged and collapses into an empty [`LookupResult`];
//! enrichment proceeds either way.

use std::time::Duration;

use crm_pipeline_core::contract::LookupResult;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::{error, info, warn};

use super::blocking::block_on_current;

pub const LEAD_ID_PLACEHOLDER: &str = "{lead_id}";

pub trait LeadLookup {
    fn fetch(&self, lead_id: &str) -> LookupResult;
}

#[derive(Debug, Clone)]
pub struct HttpLeadLookup {
    client: Client,
    url_template: String,
}

impl HttpLeadLookup {
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| format!("failed to build lookup http client: {error}"))?;
        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    pub fn lookup_url(&self, lead_id: &str) -> Result<Url, String> {
        let raw = self.url_template.replace(LEAD_ID_PLACEHOLDER, lead_id);
        Url::parse(&raw).map_err(|error| format!("invalid lookup url '{raw}': {error}"))
    }

    async fn fetch_async(&self, lead_id: &str) -> LookupResult {
        let url = match self.lookup_url(lead_id) {
            Ok(url) => url,
            Err(message) => {
                error!(component = "lead_lookup", lead_id, error = %message, "lookup url rejected");
                return LookupResult::empty();
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(source) => {
                error!(component = "lead_lookup", lead_id, error = %source, "lookup request failed");
                return LookupResult::empty();
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                component = "lead_lookup",
                lead_id,
                status = status.as_u16(),
                "lookup returned non-success status"
            );
            return LookupResult::empty();
        }

        let body = match response.json::<Value>().await {
            Ok(body) => body,
            Err(source) => {
                error!(component = "lead_lookup", lead_id, error = %source, "lookup body was not valid json");
                return LookupResult::empty();
            }
        };

        match LookupResult::from_value(body) {
            Some(result) => {
                info!(component = "lead_lookup", lead_id, "lookup found");
                result
            }
            None => {
                warn!(component = "lead_lookup", lead_id, "lookup body was not a json object");
                LookupResult::empty()
            }
        }
    }
}

impl LeadLookup for HttpLeadLookup {
    fn fetch(&self, lead_id: &str) -> LookupResult {
        block_on_current(self.fetch_async(lead_id))
    }
}
