//! Validator membership and vote provider interfaces.

use alloy_consensus::Header;
use alloy_primitives::Address;
use bft_primitives::{ValidatorVote, VoteType};
use std::{collections::HashMap, fmt::Debug};

use crate::ValidatorProviderError;

/// Source of the validator-set vote a locally proposed block carries.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait VoteProvider: Send + Sync + Debug {
    /// Vote to embed in the block built on `parent` by `local_address`, if any.
    ///
    /// Read-only: the chosen proposal stays pending until it is discarded.
    fn next_vote(
        &self,
        parent: &Header,
        local_address: Address,
    ) -> Result<Option<ValidatorVote>, ValidatorProviderError>;

    /// Propose adding `address` to the validator set
    fn auth_vote(&self, address: Address);

    /// Propose dropping `address` from the validator set
    fn drop_vote(&self, address: Address);

    /// Withdraw any proposal for `address`
    fn discard_vote(&self, address: Address);

    /// Copy of the pending proposals
    fn proposals(&self) -> HashMap<Address, VoteType>;
}

/// Validator membership as of a block.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait ValidatorProvider: Send + Sync + Debug {
    /// Validators after the canonical head
    fn validators_at_head(&self) -> Result<Vec<Address>, ValidatorProviderError>;

    /// Validators after `header` has been applied, sorted by address
    fn validators_after_block(&self, header: &Header)
        -> Result<Vec<Address>, ValidatorProviderError>;

    /// Validators `header` must be proposed by and list, sorted by address
    fn validators_for_block(&self, header: &Header)
        -> Result<Vec<Address>, ValidatorProviderError>;

    /// Vote provider backing this membership, if membership is vote-driven
    fn vote_provider(&self) -> Option<&dyn VoteProvider>;
}
