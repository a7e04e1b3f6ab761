//! Shared primitives for the BFT consensus layer.
//!
//! - [`VoteType`], [`Vote`] and [`ValidatorVote`]: validator-set votes
//! - [`BftExtraData`] and [`BftExtraDataCodec`]: the consensus payload carried in
//!   a header's extra-data field
//! - [`ChainHeaderReader`]: the narrow view of chain storage the consensus layer reads
//!
//! Headers are plain [`alloy_consensus::Header`] values.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod codec;
pub mod extra_data;
pub mod storage;
pub mod vote;

pub use codec::{BftExtraDataCodec, ExtraDataError, RlpExtraDataCodec};
pub use extra_data::{vanity_from_slice, zero_left_pad, BftExtraData, EXTRA_VANITY_LENGTH};
pub use storage::{ChainHeaderReader, InMemoryChainHeaders, ProviderError};
pub use vote::{ValidatorVote, Vote, VoteType};

pub use alloy_consensus::Header;
pub use alloy_primitives::{Address, Bytes, B256};

use alloy_primitives::b256;

/// Mix hash carried by every BFT header ("ctical byzantine fault tolerance").
pub const BFT_MIX_HASH: B256 =
    b256!("63746963616c2062797a616e74696e65206661756c7420746f6c6572616e6365");

/// Difficulty of every BFT header.
pub const BFT_DIFFICULTY: u64 = 1;
