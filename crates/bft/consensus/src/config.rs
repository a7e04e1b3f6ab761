//! Chain-level BFT parameters.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors loading a [`BftConfig`].
#[derive(Debug, thiserror::Error)]
pub enum BftConfigError {
    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this type
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// Epoch length is zero
    #[error("epoch length must be positive")]
    ZeroEpochLength,

    /// Block period is zero
    #[error("block period must be positive")]
    ZeroBlockPeriod,

    /// Gas limit bounds are inverted
    #[error("min gas limit {min} exceeds max gas limit {max}")]
    InvalidGasLimitRange {
        /// Configured minimum
        min: u64,
        /// Configured maximum
        max: u64,
    },
}

/// BFT chain parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BftConfig {
    /// Minimum seconds between a block and its parent
    #[serde(alias = "blockperiodseconds")]
    pub block_period_seconds: u64,
    /// Blocks between vote checkpoints
    #[serde(alias = "epochlength")]
    pub epoch_length: u64,
    /// Seconds a header timestamp may run ahead of the local clock
    pub future_block_drift_seconds: u64,
    /// Smallest accepted gas limit
    pub min_gas_limit: u64,
    /// Largest accepted gas limit
    pub max_gas_limit: u64,
}

impl Default for BftConfig {
    fn default() -> Self {
        Self {
            block_period_seconds: 1,
            epoch_length: 30_000,
            future_block_drift_seconds: 10,
            min_gas_limit: 5_000,
            max_gas_limit: 0x7fff_ffff_ffff_ffff,
        }
    }
}

impl BftConfig {
    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self, BftConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BftConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> Result<(), BftConfigError> {
        if self.epoch_length == 0 {
            return Err(BftConfigError::ZeroEpochLength)
        }
        if self.block_period_seconds == 0 {
            return Err(BftConfigError::ZeroBlockPeriod)
        }
        if self.min_gas_limit > self.max_gas_limit {
            return Err(BftConfigError::InvalidGasLimitRange {
                min: self.min_gas_limit,
                max: self.max_gas_limit,
            })
        }
        Ok(())
    }
}
