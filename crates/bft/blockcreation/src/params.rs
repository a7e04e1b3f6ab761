use alloy_primitives::{Bytes, U256};
use serde::{Deserialize, Serialize};

/// Operator-controlled block production parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningParameters {
    /// Vanity bytes placed in extra-data, padded or truncated to 32 bytes
    pub extra_data: Bytes,
    /// Minimum gas price for transactions to be included
    pub min_transaction_gas_price: U256,
    /// Fraction of the gas limit to fill before sealing
    pub min_block_occupancy_ratio: f64,
    /// Gas limit produced blocks move toward, if any
    pub target_gas_limit: Option<u64>,
}

impl Default for MiningParameters {
    fn default() -> Self {
        Self {
            extra_data: Bytes::new(),
            min_transaction_gas_price: U256::from(1_000),
            min_block_occupancy_ratio: 0.8,
            target_gas_limit: None,
        }
    }
}
