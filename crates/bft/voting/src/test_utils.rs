use alloy_consensus::Header;
use alloy_primitives::Address;
use bft_primitives::{
    BftExtraData, BftExtraDataCodec, InMemoryChainHeaders, RlpExtraDataCodec, ValidatorVote, Vote,
};
use std::sync::Arc;

use crate::{VoteTally, VoteTallyCache};

pub(crate) fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// Builds a chain of headers whose extra-data tracks the validator set.
#[derive(Debug)]
pub(crate) struct ChainBuilder {
    headers: Arc<InMemoryChainHeaders>,
    genesis: Header,
    head: Header,
    tally: VoteTally,
}

impl ChainBuilder {
    pub(crate) fn new(validators: impl IntoIterator<Item = Address>) -> Self {
        let tally = VoteTally::new(validators);
        let genesis = Header {
            gas_limit: 10_000_000,
            extra_data: extra_data(None, &tally),
            ..Default::default()
        };
        let headers = Arc::new(InMemoryChainHeaders::from_headers([genesis.clone()]));
        Self { headers, head: genesis.clone(), genesis, tally }
    }

    pub(crate) fn push(&mut self, proposer: Address, vote: Option<Vote>) {
        let header = Header {
            parent_hash: self.head.hash_slow(),
            number: self.head.number + 1,
            timestamp: self.head.timestamp + 1,
            gas_limit: self.head.gas_limit,
            beneficiary: proposer,
            extra_data: extra_data(vote, &self.tally),
            ..Default::default()
        };
        if let Some(vote) = vote {
            self.tally.apply_vote(&ValidatorVote::from_vote(vote, proposer));
        }
        self.headers.insert(header.clone());
        self.head = header;
    }

    pub(crate) fn genesis(&self) -> Header {
        self.genesis.clone()
    }

    pub(crate) fn head(&self) -> Header {
        self.head.clone()
    }

    pub(crate) fn reader(&self) -> Arc<InMemoryChainHeaders> {
        self.headers.clone()
    }

    pub(crate) fn cache(&self, epoch_length: u64) -> VoteTallyCache {
        VoteTallyCache::new(self.reader(), Arc::new(RlpExtraDataCodec::new()), epoch_length)
    }
}

fn extra_data(vote: Option<Vote>, tally: &VoteTally) -> alloy_primitives::Bytes {
    RlpExtraDataCodec::new().encode(&BftExtraData::unsealed(&[], vote, 0, tally.validators()))
}
