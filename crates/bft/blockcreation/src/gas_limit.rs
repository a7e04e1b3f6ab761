use parking_lot::RwLock;
use std::fmt::Debug;

/// Gas limit may change by less than `parent / GAS_LIMIT_ADJUSTMENT_FACTOR` per block.
const GAS_LIMIT_ADJUSTMENT_FACTOR: u64 = 1024;

/// Chooses the gas limit of a new block.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait GasLimitCalculator: Send + Sync + Debug {
    /// Gas limit for the child of a block with `parent_gas_limit`
    fn next_gas_limit(&self, parent_gas_limit: u64) -> u64;

    /// Replace the gas limit later blocks move toward; `None` keeps the parent's
    fn change_target_gas_limit(&self, target: Option<u64>);
}

/// Moves the gas limit toward a target by the largest step the chain accepts.
#[derive(Debug)]
pub struct TargetingGasLimitCalculator {
    target: RwLock<Option<u64>>,
    min_gas_limit: u64,
    max_gas_limit: u64,
}

impl TargetingGasLimitCalculator {
    /// Create a calculator; without a target the parent's gas limit is kept.
    pub fn new(target: Option<u64>, min_gas_limit: u64, max_gas_limit: u64) -> Self {
        Self { target: RwLock::new(target), min_gas_limit, max_gas_limit }
    }

    /// Current target
    pub fn target(&self) -> Option<u64> {
        *self.target.read()
    }
}

impl GasLimitCalculator for TargetingGasLimitCalculator {
    fn next_gas_limit(&self, parent_gas_limit: u64) -> u64 {
        let Some(target) = self.target() else { return parent_gas_limit };
        let step = (parent_gas_limit / GAS_LIMIT_ADJUSTMENT_FACTOR).saturating_sub(1);
        if target > parent_gas_limit {
            target.min(parent_gas_limit.saturating_add(step).min(self.max_gas_limit))
        } else if target < parent_gas_limit {
            target.max(parent_gas_limit.saturating_sub(step).max(self.min_gas_limit))
        } else {
            parent_gas_limit
        }
    }

    fn change_target_gas_limit(&self, target: Option<u64>) {
        *self.target.write() = target;
    }
}
