//! Generic detached header rules.
//!
//! Each rule logs the concrete reason for a rejection at `trace` and reports a plain
//! pass/fail to the pipeline.

mod ancestry;
mod constant;
mod gas;
mod timestamp;

pub use ancestry::AncestryRule;
pub use constant::ConstantFieldRule;
pub use gas::{GasLimitRangeAndDeltaRule, GasUsageRule, GAS_LIMIT_BOUND_DIVISOR};
pub use timestamp::{TimestampBoundedByFutureRule, TimestampMoreRecentThanParentRule};
