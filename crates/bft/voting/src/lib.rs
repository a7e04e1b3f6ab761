//! Validator-set voting.
//!
//! ```text
//! operator ──cast/discard──▶ VoteStore ◀──snapshot── BlockVoteProvider ──▶ creator
//!                                                          │
//! chain headers ──▶ VoteTallyCache (validators + votes after each block)
//! ```
//!
//! The [`VoteStore`] holds the local node's pending proposals. When the node proposes a
//! block, the [`VoteProvider`] picks at most one of them to embed, skipping proposals the
//! validator set after the parent already satisfies.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod block;
pub mod cache;
pub mod proposer;
pub mod provider;
pub mod store;
pub mod tally;

#[cfg(test)]
mod test_utils;

pub use block::{BlockValidatorProvider, BlockVoteProvider, FixedValidatorProvider};
pub use cache::{VoteTallyCache, DEFAULT_TALLY_CACHE_SIZE};
pub use proposer::select_vote;
pub use provider::{ValidatorProvider, VoteProvider};
pub use store::VoteStore;
pub use tally::VoteTally;

use alloy_primitives::B256;
use bft_primitives::{ExtraDataError, ProviderError};

/// Errors resolving validator membership.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorProviderError {
    /// Chain storage failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A header's extra-data could not be decoded
    #[error("invalid extra-data in block {hash}: {source}")]
    ExtraData {
        /// Hash of the offending header
        hash: B256,
        /// Decoding failure
        #[source]
        source: ExtraDataError,
    },

    /// An ancestor needed to replay votes is not stored
    #[error("ancestor {0} not found")]
    MissingAncestor(B256),

    /// No header is stored yet
    #[error("chain has no head")]
    EmptyChain,
}
