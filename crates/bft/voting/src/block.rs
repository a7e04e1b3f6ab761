//! Validator membership derived from the votes recorded in block headers.

use alloy_consensus::Header;
use alloy_primitives::Address;
use bft_primitives::{BftExtraDataCodec, ChainHeaderReader, ValidatorVote, VoteType};
use std::{collections::HashMap, sync::Arc};
use tracing::trace;

use crate::{
    select_vote, ValidatorProvider, ValidatorProviderError, VoteProvider, VoteStore,
    VoteTallyCache,
};

/// [`VoteProvider`] over the local [`VoteStore`] and the tallies recorded on chain.
#[derive(Debug, Clone)]
pub struct BlockVoteProvider {
    store: Arc<VoteStore>,
    tallies: Arc<VoteTallyCache>,
}

impl BlockVoteProvider {
    /// Create a new vote provider
    pub const fn new(store: Arc<VoteStore>, tallies: Arc<VoteTallyCache>) -> Self {
        Self { store, tallies }
    }

    /// Pending proposals
    pub fn store(&self) -> &VoteStore {
        &self.store
    }
}

impl VoteProvider for BlockVoteProvider {
    fn next_vote(
        &self,
        parent: &Header,
        local_address: Address,
    ) -> Result<Option<ValidatorVote>, ValidatorProviderError> {
        let tally = self.tallies.tally_after(parent)?;
        let vote = select_vote(&self.store.snapshot(), local_address, &tally, parent.number);
        trace!(target: "bft::voting", parent = parent.number, ?vote, "Selected vote");
        Ok(vote)
    }

    fn auth_vote(&self, address: Address) {
        self.store.cast(address, VoteType::Add);
    }

    fn drop_vote(&self, address: Address) {
        self.store.cast(address, VoteType::Drop);
    }

    fn discard_vote(&self, address: Address) {
        self.store.discard(address);
    }

    fn proposals(&self) -> HashMap<Address, VoteType> {
        self.store.snapshot()
    }
}

/// [`ValidatorProvider`] whose membership is decided by votes in block headers.
///
/// Shares its [`VoteTallyCache`] with the [`BlockVoteProvider`] it exposes, so the
/// proposer skips proposals the chain has already satisfied.
#[derive(Debug, Clone)]
pub struct BlockValidatorProvider {
    tallies: Arc<VoteTallyCache>,
    vote_provider: BlockVoteProvider,
}

impl BlockValidatorProvider {
    /// Create a provider with an empty [`VoteStore`]
    pub fn new(
        chain: Arc<dyn ChainHeaderReader>,
        codec: Arc<dyn BftExtraDataCodec>,
        epoch_length: u64,
    ) -> Self {
        Self::with_vote_store(chain, codec, epoch_length, Arc::default())
    }

    /// Create a provider proposing votes from `store`
    pub fn with_vote_store(
        chain: Arc<dyn ChainHeaderReader>,
        codec: Arc<dyn BftExtraDataCodec>,
        epoch_length: u64,
        store: Arc<VoteStore>,
    ) -> Self {
        let tallies = Arc::new(VoteTallyCache::new(chain, codec, epoch_length));
        Self { vote_provider: BlockVoteProvider::new(store, tallies.clone()), tallies }
    }

    /// Tallies backing this provider
    pub fn tallies(&self) -> &VoteTallyCache {
        &self.tallies
    }
}

impl ValidatorProvider for BlockValidatorProvider {
    fn validators_at_head(&self) -> Result<Vec<Address>, ValidatorProviderError> {
        let head = self.tallies.chain().chain_head()?.ok_or(ValidatorProviderError::EmptyChain)?;
        self.validators_after_block(&head)
    }

    fn validators_after_block(
        &self,
        header: &Header,
    ) -> Result<Vec<Address>, ValidatorProviderError> {
        Ok(self.tallies.tally_after(header)?.validators())
    }

    fn validators_for_block(
        &self,
        header: &Header,
    ) -> Result<Vec<Address>, ValidatorProviderError> {
        if header.number == 0 {
            return self.validators_after_block(header)
        }
        let parent = self
            .tallies
            .chain()
            .header_by_hash(header.parent_hash)?
            .ok_or(ValidatorProviderError::MissingAncestor(header.parent_hash))?;
        self.validators_after_block(&parent)
    }

    fn vote_provider(&self) -> Option<&dyn VoteProvider> {
        Some(&self.vote_provider)
    }
}

/// [`ValidatorProvider`] with a fixed validator set and no voting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedValidatorProvider {
    validators: Vec<Address>,
}

impl FixedValidatorProvider {
    /// Create a provider always reporting `validators`
    pub fn new(validators: impl IntoIterator<Item = Address>) -> Self {
        let mut validators: Vec<_> = validators.into_iter().collect();
        validators.sort_unstable();
        validators.dedup();
        Self { validators }
    }
}

impl ValidatorProvider for FixedValidatorProvider {
    fn validators_at_head(&self) -> Result<Vec<Address>, ValidatorProviderError> {
        Ok(self.validators.clone())
    }

    fn validators_after_block(
        &self,
        _header: &Header,
    ) -> Result<Vec<Address>, ValidatorProviderError> {
        Ok(self.validators.clone())
    }

    fn validators_for_block(
        &self,
        _header: &Header,
    ) -> Result<Vec<Address>, ValidatorProviderError> {
        Ok(self.validators.clone())
    }

    fn vote_provider(&self) -> Option<&dyn VoteProvider> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{addr, ChainBuilder};
    use assert_matches::assert_matches;
    use bft_primitives::{InMemoryChainHeaders, RlpExtraDataCodec, Vote};

    fn provider(chain: &ChainBuilder) -> BlockValidatorProvider {
        BlockValidatorProvider::new(chain.reader(), Arc::new(RlpExtraDataCodec::new()), 30_000)
    }

    #[test]
    fn test_validators_for_block_uses_parent() {
        let mut chain = ChainBuilder::new([addr(2), addr(1)]);
        chain.push(addr(1), Some(Vote::add(addr(9))));
        chain.push(addr(2), Some(Vote::add(addr(9))));
        let added = chain.head();
        chain.push(addr(9), None);
        let provider = provider(&chain);

        assert_eq!(provider.validators_for_block(&added).unwrap(), vec![addr(1), addr(2)]);
        assert_eq!(
            provider.validators_after_block(&added).unwrap(),
            vec![addr(1), addr(2), addr(9)]
        );
        assert_eq!(provider.validators_at_head().unwrap(), vec![addr(1), addr(2), addr(9)]);
        assert_eq!(
            provider.validators_for_block(&chain.genesis()).unwrap(),
            vec![addr(1), addr(2)]
        );
    }

    #[test]
    fn test_empty_chain() {
        let provider = BlockValidatorProvider::new(
            Arc::new(InMemoryChainHeaders::new()),
            Arc::new(RlpExtraDataCodec::new()),
            30_000,
        );
        assert_matches!(provider.validators_at_head(), Err(ValidatorProviderError::EmptyChain));
    }

    #[test]
    fn test_vote_provider_skips_satisfied() {
        let mut chain = ChainBuilder::new([addr(1), addr(2), addr(3)]);
        let provider = provider(&chain);
        let votes = provider.vote_provider().unwrap();
        votes.auth_vote(addr(9));
        votes.drop_vote(addr(3));

        let vote = votes.next_vote(&chain.head(), addr(1)).unwrap();
        assert_eq!(vote, Some(ValidatorVote::new(VoteType::Drop, addr(1), addr(3))));

        // once addr(1) has voted to drop addr(3), only the add remains eligible
        chain.push(addr(1), Some(Vote::drop(addr(3))));
        let vote = votes.next_vote(&chain.head(), addr(1)).unwrap();
        assert_eq!(vote, Some(ValidatorVote::new(VoteType::Add, addr(1), addr(9))));

        // selection is read-only
        assert_eq!(votes.proposals().len(), 2);
        votes.discard_vote(addr(9));
        votes.discard_vote(addr(3));
        assert_eq!(votes.next_vote(&chain.head(), addr(1)).unwrap(), None);
    }

    #[test]
    fn test_fixed_provider() {
        let provider = FixedValidatorProvider::new([addr(3), addr(1), addr(3)]);
        assert_eq!(provider.validators_at_head().unwrap(), vec![addr(1), addr(3)]);
        assert!(provider.vote_provider().is_none());
    }
}
