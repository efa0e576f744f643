use crate::core::constants::DEFAULT_PROGRAM_ID;
use crate::error::{DriftSdkError, Result};
use serde::{Deserialize, Deserializer};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Explicit client configuration.
///
/// ```json
/// { "program_id": "EGovrRumVsvCzcvHSAYZxzsiUiMTTsMSRjuwUVSxYkXt" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Drift client program the facade targets
    #[serde(deserialize_with = "deserialize_pubkey")]
    pub program_id: Pubkey,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
        }
    }
}

impl ClientConfig {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DriftSdkError::InvalidConfig(e.to_string()))
    }
}

fn deserialize_pubkey<'de, D>(deserializer: D) -> std::result::Result<Pubkey, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    Pubkey::from_str(&encoded).map_err(serde::de::Error::custom)
}
