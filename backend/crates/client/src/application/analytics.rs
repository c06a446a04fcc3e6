//! Analytics handle
//!
//! Events are emitted as structured `tracing` records under the `analytics`
//! target, tagged with the measurement id.

use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Analytics {
    measurement_id: String,
    enabled: bool,
}

impl Analytics {
    pub fn new(measurement_id: impl Into<String>) -> Self {
        let measurement_id = measurement_id.into();
        let enabled = !measurement_id.trim().is_empty();
        Self {
            measurement_id,
            enabled,
        }
    }

    pub fn measurement_id(&self) -> &str {
        &self.measurement_id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_event(&self, name: &str, params: &Value) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            target: "analytics",
            measurement_id = %self.measurement_id,
            event = name,
            params = %params,
            "analytics event"
        );
    }
}
