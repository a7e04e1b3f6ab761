use alloy_consensus::Header;
use tracing::trace;

use crate::DetachedHeaderRule;

/// Gas limit may move by strictly less than `parent_gas_limit / GAS_LIMIT_BOUND_DIVISOR`.
pub const GAS_LIMIT_BOUND_DIVISOR: u64 = 1024;

/// Gas used never exceeds the gas limit.
#[derive(Debug, Default, Clone, Copy)]
pub struct GasUsageRule;

impl DetachedHeaderRule for GasUsageRule {
    fn validate(&self, header: &Header, _parent: &Header) -> bool {
        if header.gas_used > header.gas_limit {
            trace!(
                target: "bft::validation",
                gas_used = header.gas_used,
                gas_limit = header.gas_limit,
                "Gas used exceeds gas limit"
            );
            return false
        }
        true
    }
}

/// Gas limit stays within configured bounds and close to the parent's.
#[derive(Debug, Clone, Copy)]
pub struct GasLimitRangeAndDeltaRule {
    min_gas_limit: u64,
    max_gas_limit: u64,
}

impl GasLimitRangeAndDeltaRule {
    /// Create a new rule
    pub const fn new(min_gas_limit: u64, max_gas_limit: u64) -> Self {
        Self { min_gas_limit, max_gas_limit }
    }
}

impl DetachedHeaderRule for GasLimitRangeAndDeltaRule {
    fn validate(&self, header: &Header, parent: &Header) -> bool {
        let gas_limit = header.gas_limit;
        if gas_limit < self.min_gas_limit || gas_limit > self.max_gas_limit {
            trace!(
                target: "bft::validation",
                gas_limit,
                min = self.min_gas_limit,
                max = self.max_gas_limit,
                "Gas limit out of range"
            );
            return false
        }

        let difference = gas_limit.abs_diff(parent.gas_limit);
        let bound = parent.gas_limit / GAS_LIMIT_BOUND_DIVISOR;
        if difference >= bound {
            trace!(
                target: "bft::validation",
                gas_limit,
                parent_gas_limit = parent.gas_limit,
                difference,
                bound,
                "Gas limit moved too far from parent"
            );
            return false
        }

        true
    }
}
