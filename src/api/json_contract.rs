use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::render::TimelineFrame;

use super::TimelineConfig;

pub const TIMELINE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: TimelineConfig,
}

impl TimelineConfig {
    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = TimelineConfigJsonContractV1 {
            schema_version: TIMELINE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Parses either a bare config object or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse config json: {e}"))
        })?;

        let config = if value.get("schema_version").is_some() {
            let payload: TimelineConfigJsonContractV1 =
                serde_json::from_value(value).map_err(|e| {
                    TimelineError::InvalidData(format!("failed to parse config contract: {e}"))
                })?;
            if payload.schema_version != TIMELINE_CONFIG_JSON_SCHEMA_V1 {
                return Err(TimelineError::InvalidData(format!(
                    "unsupported config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value).map_err(|e| {
                TimelineError::InvalidData(format!("failed to parse config json: {e}"))
            })?
        };

        config.validate()?;
        Ok(config)
    }
}

impl TimelineFrame {
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize timeline frame: {e}"))
        })
    }
}
