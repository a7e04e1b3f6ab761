//! Block header validation pipeline.
//!
//! A [`BlockHeaderValidator`] holds an ordered, immutable list of rules. Two kinds of
//! rule share that list:
//!
//! - detached rules see only the header and its parent and may take part in light
//!   validation
//! - attached rules additionally see the [`ProtocolContext`] and only run in full
//!   validation
//!
//! ```text
//! FULL   every rule, registration order, stop at first failure
//! LIGHT  detached rules flagged for light validation only, same order, same stop
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod context;
mod mode;
mod rule;
pub mod rules;
mod validator;

pub use context::ProtocolContext;
pub use mode::HeaderValidationMode;
pub use rule::{AttachedHeaderRule, DetachedHeaderRule, HeaderValidationRule};
pub use validator::{BlockHeaderValidator, BlockHeaderValidatorBuilder, ValidationOutcome};

#[cfg(test)]
mod test_utils;
