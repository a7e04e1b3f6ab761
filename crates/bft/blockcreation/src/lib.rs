//! Block creation for BFT chains.
//!
//! The [`BftBlockCreatorFactory`] is shared between the consensus engine, which asks it for
//! a [`BftBlockCreator`] per proposal, and operator tooling, which changes its vanity and
//! transaction selection knobs while it runs.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod creator;
mod factory;
mod gas_limit;
mod params;

pub use creator::BftBlockCreator;
pub use factory::BftBlockCreatorFactory;
pub use gas_limit::{GasLimitCalculator, TargetingGasLimitCalculator};
pub use params::MiningParameters;

use bft_voting::ValidatorProviderError;

/// Errors creating a block.
#[derive(Debug, thiserror::Error)]
pub enum BlockCreationError {
    /// Validator membership is not vote-driven
    #[error("bft block creation requires a vote provider")]
    MissingVoteProvider,

    /// Parent is at the largest representable block number
    #[error("block number overflow")]
    BlockNumberOverflow,

    /// Validators or the vote could not be resolved for the parent
    #[error(transparent)]
    Validators(#[from] ValidatorProviderError),
}
