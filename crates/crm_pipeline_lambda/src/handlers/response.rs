use crm_pipeline_core::error::{PipelineError, Stage};
use crm_pipeline_core::json_format::to_spaced_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const EVENTS_PROCESSED_MESSAGE: &str = "✅️ Events processed";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl ApiGatewayResponse {
    /// `{"message": "✅️ Events processed"}`, plus `lead_id` when one lead was handled.
    pub fn processed(lead_id: Option<&str>) -> Self {
        let mut payload = Map::new();
        payload.insert(
            "message".to_string(),
            Value::from(EVENTS_PROCESSED_MESSAGE),
        );
        if let Some(lead_id) = lead_id {
            payload.insert("lead_id".to_string(), Value::from(lead_id));
        }

        Self {
            status_code: 200,
            body: to_spaced_string(&payload),
        }
    }

    pub fn from_error(error: &PipelineError, stage: Stage) -> Self {
        Self {
            status_code: error.status_code(),
            body: error.response_body(stage),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
