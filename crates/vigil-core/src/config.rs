use crate::types::beacon::{hex32, ChainTiming};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading or validating a receiver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {reason}")]
    Invalid { reason: String },
}

/// Receiver configuration.
///
/// Immutable after construction except for `image_id` and
/// `permissible_timespan_secs`, which the privileged admin operations may
/// replace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Program identifier the seal verifier checks proofs against.
    #[serde(with = "hex32")]
    pub image_id: [u8; 32],
    /// Maximum permitted lag, in seconds, between a transition's finalized
    /// epoch timestamp and the wall clock.
    pub permissible_timespan_secs: u64,
    /// Chain id cross-chain confirmations must originate from.
    pub emitter_chain_id: u16,
    /// Sender identity cross-chain confirmations must carry.
    #[serde(with = "hex32")]
    pub emitter_address: [u8; 32],
    /// Genesis timestamp of the tracked chain.
    pub genesis_timestamp: u64,
    /// Timing parameters of the tracked chain.
    #[serde(default)]
    pub timing: ChainTiming,
}

impl ReceiverConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Reject configurations no deployment can operate under.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.seconds_per_slot == 0 {
            return Err(ConfigError::Invalid {
                reason: "seconds_per_slot must be non-zero".to_string(),
            });
        }
        if self.timing.slots_per_epoch == 0 {
            return Err(ConfigError::Invalid {
                reason: "slots_per_epoch must be non-zero".to_string(),
            });
        }
        if self.timing.history_buffer_length == 0 {
            return Err(ConfigError::Invalid {
                reason: "history_buffer_length must be non-zero".to_string(),
            });
        }
        if self.permissible_timespan_secs == 0 {
            return Err(ConfigError::Invalid {
                reason: "permissible_timespan_secs must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_json() -> String {
        format!(
            r#"{{
                "image_id": "{}",
                "permissible_timespan_secs": 86400,
                "emitter_chain_id": 2,
                "emitter_address": "0x{}",
                "genesis_timestamp": 1606824000
            }}"#,
            hex::encode([0x01; 32]),
            hex::encode([0x02; 32]),
        )
    }

    #[test]
    fn test_from_json_with_default_timing() {
        let config = ReceiverConfig::from_json(&valid_json()).unwrap();
        assert_eq!(config.image_id, [0x01; 32]);
        assert_eq!(config.emitter_chain_id, 2);
        assert_eq!(config.emitter_address, [0x02; 32]);
        assert_eq!(config.genesis_timestamp, 1_606_824_000);
        assert_eq!(config.timing, ChainTiming::default());
    }

    #[test]
    fn test_explicit_timing_overrides_default() {
        let json = valid_json().replacen(
            "\"genesis_timestamp\": 1606824000",
            "\"genesis_timestamp\": 1606824000,
             \"timing\": {\"slots_per_epoch\": 16, \"seconds_per_slot\": 6, \"history_buffer_length\": 100}",
            1,
        );
        let config = ReceiverConfig::from_json(&json).unwrap();
        assert_eq!(config.timing.slots_per_epoch, 16);
        assert_eq!(config.timing.seconds_per_slot, 6);
        assert_eq!(config.timing.history_buffer_length, 100);
    }

    #[test]
    fn test_rejects_zero_timespan() {
        let json = valid_json().replace("86400", "0");
        let result = ReceiverConfig::from_json(&json);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_rejects_malformed_image_id() {
        let json = valid_json().replace(&hex::encode([0x01; 32]), "zz");
        let result = ReceiverConfig::from_json(&json);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
