//! Error taxonomy shared by the ingest and enrichment stages.
//!
//! Client errors map to HTTP 400 with a short plain-text body. Everything else
//! is [`PipelineError::Unhandled`], which maps to HTTP 500; its detail is kept
//! for logs and never echoed back to callers. The ingest stage answers a 500
//! with a JSON body, the enrichment stage with plain text.

use crate::json_format::to_spaced_string;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    Enrich,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Missing body")]
    MissingBody,

    #[error("Missing lead_id")]
    MissingLeadId,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("unhandled failure: {0}")]
    Unhandled(String),
}

impl PipelineError {
    pub fn unhandled(detail: impl Into<String>) -> Self {
        Self::Unhandled(detail.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingBody | Self::MissingLeadId | Self::InvalidJson(_) => 400,
            Self::Unhandled(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() == 400
    }

    /// Body returned to direct callers. Parser and transport details stay out of it.
    pub fn response_body(&self, stage: Stage) -> String {
        match (self, stage) {
            (Self::MissingBody, _) => "Missing body".to_string(),
            (Self::MissingLeadId, _) => "Missing lead_id".to_string(),
            (Self::InvalidJson(_), _) => "Invalid JSON".to_string(),
            (Self::Unhandled(_), Stage::Ingest) => {
                to_spaced_string(&serde_json::json!({ "error": INTERNAL_SERVER_ERROR }))
            }
            (Self::Unhandled(_), Stage::Enrich) => INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_syntax() || error.is_eof() {
            Self::InvalidJson(error.to_string())
        } else {
            Self::Unhandled(error.to_string())
        }
    }
}
